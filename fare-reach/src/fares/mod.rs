//! Fares feed parsing and ingestion.
//!
//! [`records`] decodes single fixed-offset lines into typed records;
//! [`ingest`] runs the whole-file scans that feed the registry, the
//! cluster table and the graph builder.

pub mod ingest;
pub mod records;

pub use ingest::{
    ClusterStats, FlowScanStats, HarvestStats, harvest_referenced_codes, load_clusters,
    load_fares,
};
pub use records::{
    ClusterLine, ClusterRecord, FareRecord, FlowHeader, FlowId, FlowLine, RecordError,
    parse_cluster_line, parse_flow_line,
};
