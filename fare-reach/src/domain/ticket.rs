//! Ticket type codes.

use std::fmt;

/// Ticket types with a fixed walk-up price.
///
/// Advance fares are excluded: their printed price depends on booking-time
/// quota, so the feed value is not the price a passenger would pay.
const FIXED_PRICE_CODES: [&str; 4] = ["CDS", "CBB", "SDS", "SWS"];

/// Error returned when parsing an invalid ticket type code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ticket code: {reason}")]
pub struct InvalidTicketCode {
    reason: &'static str,
}

/// A 3-character ticket type code from the fares feed.
///
/// Classifies a fare's purchase conditions (single/return, peak/off-peak,
/// advance, ...). This type guarantees 3 ASCII alphanumeric characters by
/// construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicketCode([u8; 3]);

impl TicketCode {
    /// Parse a ticket type code from a string.
    ///
    /// The input must be exactly 3 ASCII alphanumeric characters.
    pub fn parse(s: &str) -> Result<Self, InvalidTicketCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidTicketCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_alphanumeric() {
                return Err(InvalidTicketCode {
                    reason: "must be ASCII letters or digits",
                });
            }
        }

        Ok(TicketCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII alphanumeric bytes
        std::str::from_utf8(&self.0).unwrap()
    }

    /// Returns true if this ticket type has a fixed, known price.
    ///
    /// Only fixed-price tickets are allowed to contribute graph edges.
    pub fn is_fixed_price(&self) -> bool {
        FIXED_PRICE_CODES.contains(&self.as_str())
    }
}

impl fmt::Debug for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TicketCode({})", self.as_str())
    }
}

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_code() {
        assert!(TicketCode::parse("CDS").is_ok());
        assert!(TicketCode::parse("SOS").is_ok());
        assert!(TicketCode::parse("7DF").is_ok());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(TicketCode::parse("").is_err());
        assert!(TicketCode::parse("CD").is_err());
        assert!(TicketCode::parse("CDSX").is_err());
    }

    #[test]
    fn reject_non_alphanumeric() {
        assert!(TicketCode::parse("C S").is_err());
        assert!(TicketCode::parse("C-S").is_err());
    }

    #[test]
    fn fixed_price_allow_list() {
        for code in ["CDS", "CBB", "SDS", "SWS"] {
            assert!(TicketCode::parse(code).unwrap().is_fixed_price());
        }
        for code in ["SOS", "SVR", "FDS", "CDR"] {
            assert!(!TicketCode::parse(code).unwrap().is_fixed_price());
        }
    }

    #[test]
    fn display() {
        let code = TicketCode::parse("CDS").unwrap();
        assert_eq!(format!("{}", code), "CDS");
        assert_eq!(format!("{:?}", code), "TicketCode(CDS)");
    }
}
