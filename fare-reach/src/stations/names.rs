//! CORPUS reference file ingestion.
//!
//! The reference file is comma-separated with a header row: column 0 is the
//! station name, column 1 the location code (of which only the first 4
//! characters are significant). Only codes actually referenced by the flow
//! file are registered; the rest of CORPUS covers locations with no fares.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::Nlc;

use super::registry::LocationRegistry;

/// Counters from one pass over the reference file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameStats {
    /// Station rows registered.
    pub stations_added: usize,

    /// Rows whose code was already registered; the first registration wins.
    pub duplicate_codes: usize,

    /// Rows skipped because no flow references their code.
    pub unreferenced_rows: usize,

    /// Rows without a usable name and 4-character code.
    pub malformed_rows: usize,

    /// True if the file could not be opened; nothing was registered.
    pub file_missing: bool,
}

/// Load station names from the reference file at `path`.
///
/// A missing or unreadable file is logged and yields an empty contribution;
/// the run carries on without names (and therefore without seeds).
pub fn load_station_names(
    path: &Path,
    referenced: &HashSet<Nlc>,
    registry: &mut LocationRegistry,
) -> NameStats {
    let reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(error) => {
            warn!("cannot open reference file {}: {error}", path.display());
            return NameStats {
                file_missing: true,
                ..NameStats::default()
            };
        }
    };

    let stats = read_names(reader, referenced, registry);
    debug!(
        "reference file {}: {} stations, {} duplicates, {} unreferenced",
        path.display(),
        stats.stations_added,
        stats.duplicate_codes,
        stats.unreferenced_rows
    );
    stats
}

/// Register the station rows of a CORPUS-format CSV stream.
///
/// Split from [`load_station_names`] so the parsing can be tested without
/// a file on disk.
fn read_names<R: io::Read>(
    mut reader: csv::Reader<R>,
    referenced: &HashSet<Nlc>,
    registry: &mut LocationRegistry,
) -> NameStats {
    let mut stats = NameStats::default();

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(error) => {
                warn!("unreadable reference row: {error}");
                stats.malformed_rows += 1;
                continue;
            }
        };

        let (Some(name), Some(raw_code)) = (row.get(0), row.get(1)) else {
            stats.malformed_rows += 1;
            continue;
        };

        // Only the first 4 characters key the fares feed
        let code = match raw_code.get(..4).map(Nlc::parse) {
            Some(Ok(code)) => code,
            _ => {
                warn!("reference row for {name:?} has unusable code {raw_code:?}");
                stats.malformed_rows += 1;
                continue;
            }
        };

        if !referenced.contains(&code) {
            stats.unreferenced_rows += 1;
            continue;
        }

        match registry.insert_station(code, name.to_string()) {
            Ok(_) => stats.stations_added += 1,
            Err(duplicate) => {
                warn!("duplicate location in reference file: {duplicate}");
                stats.duplicate_codes += 1;
            }
        }
    }

    stats
}
