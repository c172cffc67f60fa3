//! Fixed-offset record decoding.
//!
//! Feed lines locate fields by byte offset, not by delimiter. Offsets
//! below follow the RSP fares-feed layout: a one-character update marker
//! at offset 0, a record-type tag at offset 1, then the record's fields.
//! A '/' at offset 0 marks a comment line.

use std::fmt;
use std::ops::Range;

use crate::domain::{
    FareDate, InvalidDate, InvalidNlc, InvalidTicketCode, Nlc, TicketCode, ValidityWindow,
};

/// Numeric key grouping a flow header with its fare lines.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowId(pub u32);

impl fmt::Debug for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlowId({})", self.0)
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:07}", self.0)
    }
}

/// Error returned when a line cannot be decoded.
///
/// These are reported and skipped by the ingest scans; a malformed line
/// never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Line ends before the field at `start..end`
    #[error("line is {len} bytes, field needs {need}")]
    TooShort { len: usize, need: usize },

    /// Record-type tag is not one this file carries
    #[error("unrecognised record tag {tag:?}")]
    UnknownTag { tag: String },

    /// A location code field failed validation
    #[error("bad {field} code: {source}")]
    BadCode {
        field: &'static str,
        source: InvalidNlc,
    },

    /// A date field failed validation
    #[error("bad {field} date: {source}")]
    BadDate {
        field: &'static str,
        source: InvalidDate,
    },

    /// The ticket type field failed validation
    #[error("bad ticket code: {0}")]
    BadTicket(#[from] InvalidTicketCode),

    /// A numeric field contains non-digits
    #[error("bad {field}: not a number")]
    BadNumber { field: &'static str },
}

/// One cluster-membership record: `member` belongs to `cluster` while the
/// window is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterRecord {
    pub cluster: Nlc,
    pub member: Nlc,
    pub validity: ValidityWindow,
}

/// Classification of one line of the cluster file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterLine {
    /// Comment line, skip
    Comment,

    /// The member is not an all-digit station code (ferry terminal, bus
    /// stop, ...), which a rail graph has no use for
    NonStationMember,

    /// A usable membership record
    Member(ClusterRecord),
}

/// A flow header: a directed (or reversible) station pair that subsequent
/// fare lines reference by flow id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowHeader {
    pub flow_id: FlowId,
    pub origin: Nlc,
    pub destination: Nlc,
    pub reversible: bool,
    pub validity: ValidityWindow,
}

/// One priced ticket type for a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareRecord {
    pub flow_id: FlowId,
    pub ticket: TicketCode,
    pub price_pence: u32,
}

/// Classification of one line of the flow file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowLine {
    /// Comment line, skip
    Comment,

    /// 'F' record
    Header(FlowHeader),

    /// 'T' record
    Fare(FareRecord),
}

/// Extract the field at `range`, failing gracefully on short lines.
fn field(line: &str, range: Range<usize>) -> Result<&str, RecordError> {
    let need = range.end;
    line.get(range).ok_or(RecordError::TooShort {
        len: line.len(),
        need,
    })
}

fn code_field(line: &str, range: Range<usize>, name: &'static str) -> Result<Nlc, RecordError> {
    Nlc::parse(field(line, range)?).map_err(|source| RecordError::BadCode {
        field: name,
        source,
    })
}

fn date_field(line: &str, range: Range<usize>, name: &'static str) -> Result<FareDate, RecordError> {
    FareDate::parse(field(line, range)?).map_err(|source| RecordError::BadDate {
        field: name,
        source,
    })
}

fn number_field(line: &str, range: Range<usize>, name: &'static str) -> Result<u32, RecordError> {
    let text = field(line, range)?;
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecordError::BadNumber { field: name });
    }
    text.parse().map_err(|_| RecordError::BadNumber { field: name })
}

/// Decode one line of the cluster file.
///
/// Layout: cluster code at 1..5, member code at 5..9, end date at 9..17,
/// start date at 17..25. The end date precedes the start date.
pub fn parse_cluster_line(line: &str) -> Result<ClusterLine, RecordError> {
    if line.starts_with('/') {
        return Ok(ClusterLine::Comment);
    }

    let cluster = code_field(line, 1..5, "cluster")?;
    let member_text = field(line, 5..9)?;
    let ends = date_field(line, 9..17, "end")?;
    let starts = date_field(line, 17..25, "start")?;

    let member = match Nlc::parse(member_text) {
        Ok(member) if member.is_station_code() => member,
        // Anything that is not an all-digit station code is a non-rail
        // location we have no data for
        _ => return Ok(ClusterLine::NonStationMember),
    };

    Ok(ClusterLine::Member(ClusterRecord {
        cluster,
        member,
        validity: ValidityWindow::new(starts, ends),
    }))
}

/// Decode one line of the flow file.
///
/// 'F' layout: origin at 2..6, destination at 6..10, direction flag at 19
/// ('R' = reversible), end date at 20..28, start date at 28..36, flow id
/// at 42..49. 'T' layout: flow id at 2..9, ticket code at 9..12, price in
/// pence at 12..20.
pub fn parse_flow_line(line: &str) -> Result<FlowLine, RecordError> {
    if line.starts_with('/') {
        return Ok(FlowLine::Comment);
    }

    match field(line, 1..2)? {
        "F" => {
            let origin = code_field(line, 2..6, "origin")?;
            let destination = code_field(line, 6..10, "destination")?;
            let reversible = field(line, 19..20)? == "R";
            let ends = date_field(line, 20..28, "end")?;
            let starts = date_field(line, 28..36, "start")?;
            let flow_id = FlowId(number_field(line, 42..49, "flow id")?);

            Ok(FlowLine::Header(FlowHeader {
                flow_id,
                origin,
                destination,
                reversible,
                validity: ValidityWindow::new(starts, ends),
            }))
        }
        "T" => {
            let flow_id = FlowId(number_field(line, 2..9, "flow id")?);
            let ticket = TicketCode::parse(field(line, 9..12)?)?;
            let price_pence = number_field(line, 12..20, "price")?;

            Ok(FlowLine::Fare(FareRecord {
                flow_id,
                ticket,
                price_pence,
            }))
        }
        tag => Err(RecordError::UnknownTag {
            tag: tag.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 marker + 4 cluster + 4 member + 8 end + 8 start = 25 bytes
    const CLUSTER_LINE: &str = "RQ01561213112299901012020";

    // 1 marker + 1 tag + 4 origin + 4 dest + 5 route + 3 status + 1 usage
    // + 1 direction + 8 end + 8 start + 6 toc/flags + 7 flow id = 49 bytes
    const FLOW_HEADER_LINE: &str = "RF61210433011250001R3112299901012020ATWNNY0123456";
    const FARE_LINE: &str = "RT0123456CDS00012500";

    fn nlc(s: &str) -> Nlc {
        Nlc::parse(s).unwrap()
    }

    fn date(s: &str) -> FareDate {
        FareDate::parse(s).unwrap()
    }

    #[test]
    fn cluster_line_fields() {
        let parsed = parse_cluster_line(CLUSTER_LINE).unwrap();
        assert_eq!(
            parsed,
            ClusterLine::Member(ClusterRecord {
                cluster: nlc("Q015"),
                member: nlc("6121"),
                validity: ValidityWindow::new(date("01012020"), date("31122999")),
            })
        );
    }

    #[test]
    fn cluster_comment_line() {
        assert_eq!(
            parse_cluster_line("/!! this is a header comment").unwrap(),
            ClusterLine::Comment
        );
    }

    #[test]
    fn cluster_non_station_member() {
        // Member "F033" carries a letter: a non-rail location
        let line = "RQ015F0333112299901012020";
        assert_eq!(
            parse_cluster_line(line).unwrap(),
            ClusterLine::NonStationMember
        );
    }

    #[test]
    fn cluster_short_line() {
        let err = parse_cluster_line("RQ0156121").unwrap_err();
        assert!(matches!(err, RecordError::TooShort { .. }));
    }

    #[test]
    fn flow_header_fields() {
        let parsed = parse_flow_line(FLOW_HEADER_LINE).unwrap();
        assert_eq!(
            parsed,
            FlowLine::Header(FlowHeader {
                flow_id: FlowId(123456),
                origin: nlc("6121"),
                destination: nlc("0433"),
                reversible: true,
                validity: ValidityWindow::new(date("01012020"), date("31122999")),
            })
        );
    }

    #[test]
    fn flow_header_one_way() {
        // Direction flag at offset 19 set to 'O'
        let mut bytes = FLOW_HEADER_LINE.as_bytes().to_vec();
        bytes[19] = b'O';
        let line = String::from_utf8(bytes).unwrap();

        let FlowLine::Header(header) = parse_flow_line(&line).unwrap() else {
            panic!("expected header");
        };
        assert!(!header.reversible);
    }

    #[test]
    fn fare_line_fields() {
        let parsed = parse_flow_line(FARE_LINE).unwrap();
        assert_eq!(
            parsed,
            FlowLine::Fare(FareRecord {
                flow_id: FlowId(123456),
                ticket: TicketCode::parse("CDS").unwrap(),
                price_pence: 12500,
            })
        );
    }

    #[test]
    fn fare_price_leading_zeros() {
        let line = "RT0123456SDS00000150";
        let FlowLine::Fare(fare) = parse_flow_line(line).unwrap() else {
            panic!("expected fare");
        };
        assert_eq!(fare.price_pence, 150);
    }

    #[test]
    fn flow_comment_line() {
        assert_eq!(parse_flow_line("/!! RJFAF063").unwrap(), FlowLine::Comment);
    }

    #[test]
    fn flow_unknown_tag() {
        let err = parse_flow_line("RX0123456").unwrap_err();
        assert_eq!(
            err,
            RecordError::UnknownTag {
                tag: "X".to_string()
            }
        );
    }

    #[test]
    fn flow_short_line() {
        let err = parse_flow_line("RF6121").unwrap_err();
        assert!(matches!(err, RecordError::TooShort { .. }));
    }

    #[test]
    fn fare_bad_price() {
        let line = "RT0123456CDS000125xx";
        let err = parse_flow_line(line).unwrap_err();
        assert_eq!(err, RecordError::BadNumber { field: "price" });
    }

    #[test]
    fn flow_id_display_pads_to_seven_digits() {
        assert_eq!(FlowId(42).to_string(), "0000042");
    }
}
