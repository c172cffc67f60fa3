//! Code ↔ index interning for stations and clusters.

use std::collections::HashMap;
use std::fmt;

use crate::domain::Nlc;

/// Dense index of one station or cluster, stable for the duration of a run.
///
/// Indices are assigned in first-seen order: cluster file first, then the
/// reference file. Stations and clusters share one index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a station code is registered a second time.
///
/// The original index is always kept; the caller decides whether to warn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("location {code} already registered as node {existing}")]
pub struct DuplicateLocation {
    pub code: Nlc,
    pub existing: NodeId,
}

#[derive(Debug, Clone)]
struct Node {
    code: Nlc,
    is_cluster: bool,
    name: Option<String>,
}

/// Owned bidirectional mapping between location codes and node indices.
///
/// Also resolves human-readable station names (for seeding the search from
/// a list of station names) and records which nodes are clusters.
#[derive(Debug, Default)]
pub struct LocationRegistry {
    by_code: HashMap<Nlc, NodeId>,
    by_name: HashMap<String, NodeId>,
    nodes: Vec<Node>,
}

impl LocationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a cluster code, returning its node.
    ///
    /// Idempotent: a code seen before returns its existing node.
    pub fn intern_cluster(&mut self, code: Nlc) -> NodeId {
        if let Some(&id) = self.by_code.get(&code) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.by_code.insert(code, id);
        self.nodes.push(Node {
            code,
            is_cluster: true,
            name: None,
        });
        id
    }

    /// Register a station code with its name.
    ///
    /// Fails if the code is already registered; the first registration is
    /// kept (first-wins, deterministic). If two stations share a name, the
    /// first keeps the name binding.
    pub fn insert_station(
        &mut self,
        code: Nlc,
        name: String,
    ) -> Result<NodeId, DuplicateLocation> {
        if let Some(&existing) = self.by_code.get(&code) {
            return Err(DuplicateLocation { code, existing });
        }
        let id = NodeId(self.nodes.len());
        self.by_code.insert(code, id);
        self.by_name.entry(name.clone()).or_insert(id);
        self.nodes.push(Node {
            code,
            is_cluster: false,
            name: Some(name),
        });
        Ok(id)
    }

    /// Look up the node for a code.
    pub fn lookup(&self, code: Nlc) -> Option<NodeId> {
        self.by_code.get(&code).copied()
    }

    /// Resolve a station name to its node.
    pub fn resolve_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Returns true if the node is a cluster.
    pub fn is_cluster(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_cluster
    }

    /// The code of a node.
    pub fn code(&self, id: NodeId) -> Nlc {
        self.nodes[id.0].code
    }

    /// The station name of a node, if it has one (clusters do not).
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].name.as_deref()
    }

    /// Human-readable description of a node for reports and logs.
    pub fn describe(&self, id: NodeId) -> String {
        let node = &self.nodes[id.0];
        match &node.name {
            Some(name) => name.clone(),
            None if node.is_cluster => format!("cluster {}", node.code),
            None => format!("station {}", node.code),
        }
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
