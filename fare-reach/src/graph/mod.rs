//! The best-price fare graph.
//!
//! Nodes are the registry's stations and clusters; a directed edge carries
//! the cheapest eligible fare found for that ordered pair. At most one
//! edge exists per ordered pair, and every edge weight is a positive
//! number of pence above the sanity threshold.

mod builder;

pub use builder::{BuildStats, GraphBuilder, MIN_SANE_FARE_PENCE};

use crate::domain::TicketCode;
use crate::stations::NodeId;

/// One directed edge: the cheapest eligible fare for (from → to), with the
/// ticket type that priced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareEdge {
    pub to: NodeId,
    pub price_pence: u32,
    pub ticket: TicketCode,
}

/// Directed weighted graph over the registry's node space.
#[derive(Debug, Clone)]
pub struct FareGraph {
    adjacency: Vec<Vec<FareEdge>>,
}

impl FareGraph {
    pub(crate) fn from_adjacency(adjacency: Vec<Vec<FareEdge>>) -> Self {
        Self { adjacency }
    }

    /// Number of nodes (including nodes with no edges).
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Outgoing edges of a node, ordered by destination index.
    pub fn edges_from(&self, node: NodeId) -> &[FareEdge] {
        &self.adjacency[node.0]
    }

    /// The edge for an ordered pair, if one was built.
    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&FareEdge> {
        self.adjacency[from.0].iter().find(|edge| edge.to == to)
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> TicketCode {
        TicketCode::parse("CDS").unwrap()
    }

    #[test]
    fn accessors() {
        let graph = FareGraph::from_adjacency(vec![
            vec![
                FareEdge {
                    to: NodeId(1),
                    price_pence: 500,
                    ticket: ticket(),
                },
                FareEdge {
                    to: NodeId(2),
                    price_pence: 800,
                    ticket: ticket(),
                },
            ],
            vec![],
            vec![],
        ]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges_from(NodeId(0)).len(), 2);
        assert_eq!(graph.edges_from(NodeId(1)).len(), 0);
        assert_eq!(graph.edge(NodeId(0), NodeId(2)).unwrap().price_pence, 800);
        assert!(graph.edge(NodeId(1), NodeId(0)).is_none());
    }
}
