//! Whole-file scans over the fares feed.
//!
//! The feed names its files by extension off a shared base path: the
//! cluster file is `<base>.FSC`, the flow file `<base>.FFL`. Every scan
//! here degrades to an empty contribution when its file is missing; the
//! caller reads the stats to decide whether the run is still meaningful.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::{FareDate, Nlc};
use crate::graph::GraphBuilder;
use crate::stations::{ClusterTable, LocationRegistry};

use super::records::{self, ClusterLine, FlowLine};

const CLUSTER_EXTENSION: &str = ".FSC";
const FLOW_EXTENSION: &str = ".FFL";

fn with_extension(base: &Path, extension: &str) -> PathBuf {
    let mut path = base.as_os_str().to_os_string();
    path.push(extension);
    PathBuf::from(path)
}

fn open_lines(path: &Path) -> Option<impl Iterator<Item = std::io::Result<String>>> {
    match File::open(path) {
        Ok(file) => Some(BufReader::new(file).lines()),
        Err(error) => {
            warn!("cannot open {}: {error}", path.display());
            None
        }
    }
}

/// Counters from the cluster-file scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterStats {
    /// Membership records accepted.
    pub members_added: usize,

    /// Records whose member is not an all-digit station code.
    pub non_station_members: usize,

    /// Records outside their validity window on the travel date.
    pub inactive_records: usize,

    /// Lines that could not be decoded.
    pub malformed_lines: usize,

    /// True if `<base>.FSC` could not be opened.
    pub file_missing: bool,
}

/// Scan `<base>.FSC`, registering cluster codes and recording membership.
///
/// Cluster codes are interned before anything else touches the registry,
/// so clusters occupy the lowest indices.
pub fn load_clusters(
    base: &Path,
    travel_date: FareDate,
    registry: &mut LocationRegistry,
    table: &mut ClusterTable,
) -> ClusterStats {
    let path = with_extension(base, CLUSTER_EXTENSION);
    let mut stats = ClusterStats::default();

    let Some(lines) = open_lines(&path) else {
        stats.file_missing = true;
        return stats;
    };

    for line in lines {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!("unreadable cluster line: {error}");
                stats.malformed_lines += 1;
                continue;
            }
        };

        match records::parse_cluster_line(&line) {
            Ok(ClusterLine::Comment) => {}
            Ok(ClusterLine::NonStationMember) => stats.non_station_members += 1,
            Ok(ClusterLine::Member(record)) => {
                if !record.validity.is_active(travel_date) {
                    stats.inactive_records += 1;
                    continue;
                }
                registry.intern_cluster(record.cluster);
                table.add(record.cluster, record.member);
                stats.members_added += 1;
            }
            Err(error) => {
                warn!("bad cluster line: {error}");
                stats.malformed_lines += 1;
            }
        }
    }

    debug!(
        "{}: {} members across {} clusters, {} non-station, {} inactive",
        path.display(),
        stats.members_added,
        table.len(),
        stats.non_station_members,
        stats.inactive_records
    );
    stats
}

/// Counters from the referenced-code harvest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestStats {
    /// Flow headers seen.
    pub flows_seen: usize,

    /// Lines whose endpoint fields were unusable.
    pub malformed_lines: usize,

    /// True if `<base>.FFL` could not be opened.
    pub file_missing: bool,
}

/// First pass over `<base>.FFL`: collect every code a flow header
/// references.
///
/// The result is consumed read-only by the reference-file scan, which
/// skips the bulk of CORPUS rows that no fare mentions. Only the endpoint
/// fields are decoded here; full validation happens in the later pass.
pub fn harvest_referenced_codes(base: &Path) -> (HashSet<Nlc>, HarvestStats) {
    let path = with_extension(base, FLOW_EXTENSION);
    let mut referenced = HashSet::new();
    let mut stats = HarvestStats::default();

    let Some(lines) = open_lines(&path) else {
        stats.file_missing = true;
        return (referenced, stats);
    };

    for line in lines {
        let Ok(line) = line else {
            stats.malformed_lines += 1;
            continue;
        };
        if line.starts_with('/') || line.get(1..2) != Some("F") {
            continue;
        }

        stats.flows_seen += 1;
        match (
            line.get(2..6).map(Nlc::parse),
            line.get(6..10).map(Nlc::parse),
        ) {
            (Some(Ok(origin)), Some(Ok(destination))) => {
                referenced.insert(origin);
                referenced.insert(destination);
            }
            _ => stats.malformed_lines += 1,
        }
    }

    debug!(
        "{}: {} codes referenced by {} flow headers",
        path.display(),
        referenced.len(),
        stats.flows_seen
    );
    (referenced, stats)
}

/// Counters from the flow-file scan (file-level; the builder keeps its own
/// record-level counters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowScanStats {
    /// Lines that could not be decoded.
    pub malformed_lines: usize,

    /// True if `<base>.FFL` could not be opened.
    pub file_missing: bool,
}

/// Scan `<base>.FFL` and feed the graph builder.
///
/// The scan is two full passes: every flow header is registered before any
/// fare line is applied, so a fare line never depends on where its header
/// sits in the file. Headers and fare lines may be interleaved arbitrarily.
pub fn load_fares(
    base: &Path,
    registry: &LocationRegistry,
    builder: &mut GraphBuilder,
) -> FlowScanStats {
    let path = with_extension(base, FLOW_EXTENSION);
    let mut stats = FlowScanStats::default();

    // Pass 1: headers. Malformed lines are reported and counted here.
    let Some(lines) = open_lines(&path) else {
        stats.file_missing = true;
        return stats;
    };
    for line in lines {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!("unreadable flow line: {error}");
                stats.malformed_lines += 1;
                continue;
            }
        };

        match records::parse_flow_line(&line) {
            Ok(FlowLine::Header(header)) => builder.register_flow(&header, registry),
            Ok(FlowLine::Fare(_)) | Ok(FlowLine::Comment) => {}
            Err(error) => {
                warn!("bad flow line: {error}");
                stats.malformed_lines += 1;
            }
        }
    }

    // Pass 2: fare lines. Decoding failures were already counted above.
    let Some(lines) = open_lines(&path) else {
        stats.file_missing = true;
        return stats;
    };
    for line in lines {
        let Ok(line) = line else { continue };
        if let Ok(FlowLine::Fare(fare)) = records::parse_flow_line(&line) {
            builder.apply_fare(&fare);
        }
    }

    let build = builder.stats();
    debug!(
        "{}: {} flows registered ({} inactive, {} unknown-endpoint), {} fares applied",
        path.display(),
        build.flows_registered,
        build.flows_inactive,
        build.flows_unknown_endpoint,
        build.fares_applied
    );
    stats
}
