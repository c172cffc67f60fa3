//! End-to-end pipeline: reference data, graph construction, search.
//!
//! Phases run in strict sequence, each a barrier before the next. Nothing
//! here aborts: missing files and bad records degrade to empty
//! contributions, and every anomaly is counted in [`PipelineStats`] so the
//! caller can decide whether the result is trustworthy.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::FareDate;
use crate::fares::{self, ClusterStats, FlowScanStats, HarvestStats};
use crate::graph::{BuildStats, FareGraph, GraphBuilder};
use crate::planner::{self, ShortestPaths};
use crate::stations::{
    ClusterTable, LocationRegistry, NameStats, NodeId, load_station_names,
};

/// Where the input files live and which date to price.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base path of the fares feed; `.FSC` and `.FFL` are appended.
    pub fare_base: PathBuf,

    /// CORPUS reference CSV path.
    pub reference_csv: PathBuf,

    /// The date the tickets are for.
    pub travel_date: FareDate,

    /// Newline-separated station names to start from.
    pub origins_file: PathBuf,
}

/// Counters from every phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    pub clusters: ClusterStats,
    pub harvest: HarvestStats,
    pub names: NameStats,
    pub flow_scan: FlowScanStats,
    pub build: BuildStats,

    /// Origin names that did not resolve to a station.
    pub unresolved_origins: usize,

    /// True if the starting-stations file could not be opened.
    pub origins_file_missing: bool,
}

/// Everything one run produced.
#[derive(Debug)]
pub struct PipelineOutput {
    pub registry: LocationRegistry,
    pub clusters: ClusterTable,
    pub graph: FareGraph,
    pub seeds: Vec<NodeId>,
    pub paths: ShortestPaths,
    pub stats: PipelineStats,
}

/// Run every phase in order.
pub fn run(config: &PipelineConfig) -> PipelineOutput {
    let mut stats = PipelineStats::default();
    let mut registry = LocationRegistry::new();
    let mut clusters = ClusterTable::new();

    // Clusters claim the lowest indices, before any station registers
    let phase = Instant::now();
    stats.clusters = fares::load_clusters(
        &config.fare_base,
        config.travel_date,
        &mut registry,
        &mut clusters,
    );
    debug!("cluster phase took {:?}", phase.elapsed());

    // Harvest which codes the flows actually reference, then register only
    // those stations from the reference file
    let phase = Instant::now();
    let (referenced, harvest) = fares::harvest_referenced_codes(&config.fare_base);
    stats.harvest = harvest;
    stats.names = load_station_names(&config.reference_csv, &referenced, &mut registry);
    debug!("reference phase took {:?}", phase.elapsed());
    info!("{} stations and clusters registered", registry.len());

    let origins = resolve_origins(&config.origins_file, &registry);
    stats.unresolved_origins = origins.unresolved;
    stats.origins_file_missing = origins.file_missing;
    info!("{} starting stations resolved", origins.seeds.len());

    // Full flow scan against the now-complete registry
    let phase = Instant::now();
    let mut builder = GraphBuilder::new(config.travel_date);
    stats.flow_scan = fares::load_fares(&config.fare_base, &registry, &mut builder);
    let (graph, build) = builder.into_graph(registry.len());
    stats.build = build;
    debug!("flow phase took {:?}", phase.elapsed());
    info!(
        "graph has {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let phase = Instant::now();
    let paths = planner::cheapest_from(&graph, &origins.seeds);
    debug!("search phase took {:?}", phase.elapsed());

    PipelineOutput {
        registry,
        clusters,
        graph,
        seeds: origins.seeds,
        paths,
        stats,
    }
}

struct ResolvedOrigins {
    seeds: Vec<NodeId>,
    unresolved: usize,
    file_missing: bool,
}

/// Resolve origin station names to seed nodes.
///
/// Unknown names are warned about and contribute no seed; duplicates
/// collapse to one seed. Seed order follows the file.
fn resolve_origins(path: &Path, registry: &LocationRegistry) -> ResolvedOrigins {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) => {
            warn!(
                "cannot open starting-stations file {}: {error}",
                path.display()
            );
            return ResolvedOrigins {
                seeds: Vec::new(),
                unresolved: 0,
                file_missing: true,
            };
        }
    };

    let mut seeds = Vec::new();
    let mut unresolved = 0;

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!("unreadable starting-station line: {error}");
                unresolved += 1;
                continue;
            }
        };

        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        match registry.resolve_name(name) {
            Some(node) => {
                if !seeds.contains(&node) {
                    seeds.push(node);
                }
            }
            None => {
                warn!("starting station {name:?} does not exist or has no fares");
                unresolved += 1;
            }
        }
    }

    ResolvedOrigins {
        seeds,
        unresolved,
        file_missing: false,
    }
}
