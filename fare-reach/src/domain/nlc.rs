//! Location code types.

use std::fmt;

/// Error returned when parsing an invalid location code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location code: {reason}")]
pub struct InvalidNlc {
    reason: &'static str,
}

/// A valid 4-character NLC (National Location Code) from the fares feed.
///
/// Station codes are four digits; cluster codes mix letters and digits.
/// This type guarantees that any `Nlc` value is 4 ASCII alphanumeric
/// characters by construction.
///
/// # Examples
///
/// ```
/// use fare_reach::domain::Nlc;
///
/// let kgx = Nlc::parse("6121").unwrap();
/// assert_eq!(kgx.as_str(), "6121");
/// assert!(kgx.is_station_code());
///
/// let cluster = Nlc::parse("Q015").unwrap();
/// assert!(!cluster.is_station_code());
///
/// // Wrong length is rejected
/// assert!(Nlc::parse("612").is_err());
/// assert!(Nlc::parse("61211").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nlc([u8; 4]);

impl Nlc {
    /// Parse a location code from a string.
    ///
    /// The input must be exactly 4 ASCII alphanumeric characters.
    pub fn parse(s: &str) -> Result<Self, InvalidNlc> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 {
            return Err(InvalidNlc {
                reason: "must be exactly 4 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_alphanumeric() {
                return Err(InvalidNlc {
                    reason: "must be ASCII letters or digits",
                });
            }
        }

        Ok(Nlc([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII alphanumeric bytes
        std::str::from_utf8(&self.0).unwrap()
    }

    /// Returns true if this is an all-digit station code.
    ///
    /// Cluster codes and non-rail locations (ferry terminals, bus stops)
    /// carry at least one letter.
    pub fn is_station_code(&self) -> bool {
        self.0.iter().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Debug for Nlc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nlc({})", self.as_str())
    }
}

impl fmt::Display for Nlc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_nlc() {
        assert!(Nlc::parse("6121").is_ok());
        assert!(Nlc::parse("0433").is_ok());
        assert!(Nlc::parse("Q015").is_ok());
        assert!(Nlc::parse("k816").is_ok());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(Nlc::parse("").is_err());
        assert!(Nlc::parse("6").is_err());
        assert!(Nlc::parse("612").is_err());
        assert!(Nlc::parse("61211").is_err());
    }

    #[test]
    fn reject_non_alphanumeric() {
        assert!(Nlc::parse("61 1").is_err());
        assert!(Nlc::parse("61-1").is_err());
        assert!(Nlc::parse("61é1").is_err());
        assert!(Nlc::parse("6121\n").is_err());
    }

    #[test]
    fn station_code_detection() {
        assert!(Nlc::parse("6121").unwrap().is_station_code());
        assert!(!Nlc::parse("Q015").unwrap().is_station_code());
        assert!(!Nlc::parse("612F").unwrap().is_station_code());
    }

    #[test]
    fn as_str_roundtrip() {
        let nlc = Nlc::parse("6121").unwrap();
        assert_eq!(nlc.as_str(), "6121");
    }

    #[test]
    fn display_and_debug() {
        let nlc = Nlc::parse("Q015").unwrap();
        assert_eq!(format!("{}", nlc), "Q015");
        assert_eq!(format!("{:?}", nlc), "Nlc(Q015)");
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Nlc::parse("6121").unwrap());
        assert!(set.contains(&Nlc::parse("6121").unwrap()));
        assert!(!set.contains(&Nlc::parse("0433").unwrap()));
    }
}
