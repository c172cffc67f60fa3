//! Feed dates and validity windows.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid feed date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date: {reason}")]
pub struct InvalidDate {
    reason: &'static str,
}

/// A date from the fares feed, in `DDMMYYYY` text form.
///
/// Feed dates are ordered field-wise as (year, month, day). They are
/// deliberately not calendar-validated: validity checks only need ordering,
/// and the feed carries reserved values (such as the open-ended marker)
/// that a calendar type could reject.
///
/// # Examples
///
/// ```
/// use fare_reach::domain::FareDate;
///
/// let travel = FareDate::parse("16062024").unwrap();
/// let later = FareDate::parse("01012025").unwrap();
/// assert!(travel < later);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FareDate {
    year: u16,
    month: u8,
    day: u8,
}

impl FareDate {
    /// Reserved end date meaning "valid until further notice".
    pub const OPEN_ENDED: FareDate = FareDate {
        year: 2999,
        month: 12,
        day: 31,
    };

    /// Parse a date from `DDMMYYYY` text.
    ///
    /// All 8 characters must be ASCII digits. No calendar validation is
    /// performed beyond that.
    pub fn parse(s: &str) -> Result<Self, InvalidDate> {
        let bytes = s.as_bytes();

        if bytes.len() != 8 {
            return Err(InvalidDate {
                reason: "must be exactly 8 characters (DDMMYYYY)",
            });
        }

        if !bytes.iter().all(|b| b.is_ascii_digit()) {
            return Err(InvalidDate {
                reason: "must be ASCII digits (DDMMYYYY)",
            });
        }

        // Slices are digit-checked above, so these cannot fail
        let day: u8 = s[0..2].parse().unwrap();
        let month: u8 = s[2..4].parse().unwrap();
        let year: u16 = s[4..8].parse().unwrap();

        Ok(FareDate { year, month, day })
    }

    /// Build a date from components, without calendar validation.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        FareDate { year, month, day }
    }
}

impl FromStr for FareDate {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FareDate::parse(s)
    }
}

impl fmt::Debug for FareDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FareDate({:04}-{:02}-{:02})",
            self.year, self.month, self.day
        )
    }
}

impl fmt::Display for FareDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:04}", self.day, self.month, self.year)
    }
}

/// An inclusive date range during which a record applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    /// First date on which the record applies.
    pub starts: FareDate,

    /// Last date on which the record applies; `FareDate::OPEN_ENDED` means
    /// no upper bound.
    pub ends: FareDate,
}

impl ValidityWindow {
    /// Create a window from its bounds.
    pub fn new(starts: FareDate, ends: FareDate) -> Self {
        Self { starts, ends }
    }

    /// Returns true if `travel` falls within this window.
    ///
    /// The window is inclusive at both ends. An open-ended window only
    /// checks the lower bound.
    pub fn is_active(&self, travel: FareDate) -> bool {
        self.starts <= travel && (self.ends == FareDate::OPEN_ENDED || travel <= self.ends)
    }
}
