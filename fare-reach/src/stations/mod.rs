//! Location reference data.
//!
//! The registry owns the code ↔ dense-index mapping that every later phase
//! works in terms of. Cluster membership is kept alongside it for
//! diagnostics; station names come from the CORPUS reference file.

mod clusters;
mod names;
mod registry;

pub use clusters::ClusterTable;
pub use names::{NameStats, load_station_names};
pub use registry::{DuplicateLocation, LocationRegistry, NodeId};
