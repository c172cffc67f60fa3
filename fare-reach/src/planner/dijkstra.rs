//! Multi-source Dijkstra over the fare graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::FareGraph;
use crate::stations::NodeId;

/// Frontier entry, ordered so the smallest tentative cost pops first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    cost: u32,
    node: NodeId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-node cheapest cost and predecessor, forming a shortest-path tree
/// rooted at the seed set.
///
/// A `None` cost means the node was never reached. Seeds have cost 0 and
/// no predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    cost: Vec<Option<u32>>,
    predecessor: Vec<Option<NodeId>>,
}

impl ShortestPaths {
    /// Number of nodes covered by the search.
    pub fn node_count(&self) -> usize {
        self.cost.len()
    }

    /// Cheapest total cost to a node, if reachable.
    pub fn cost(&self, node: NodeId) -> Option<u32> {
        self.cost[node.0]
    }

    /// The node preceding `node` on its cheapest path.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessor[node.0]
    }

    /// Reconstruct the cheapest path to `node`, seed first.
    ///
    /// Returns `None` for unreachable nodes. For a seed the path is just
    /// the seed itself.
    pub fn path_to(&self, node: NodeId) -> Option<Vec<NodeId>> {
        self.cost[node.0]?;

        let mut path = vec![node];
        let mut current = node;
        while let Some(previous) = self.predecessor[current.0] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

/// Run Dijkstra from every seed at cost zero.
///
/// Stale frontier entries (their node already settled at a cheaper cost)
/// are discarded on pop. Edge weights are positive, so a node's cost is
/// final the first time it pops fresh.
pub fn cheapest_from(graph: &FareGraph, seeds: &[NodeId]) -> ShortestPaths {
    let node_count = graph.node_count();
    let mut cost: Vec<Option<u32>> = vec![None; node_count];
    let mut predecessor: Vec<Option<NodeId>> = vec![None; node_count];
    let mut frontier = BinaryHeap::new();

    for &seed in seeds {
        if cost[seed.0].is_none() {
            cost[seed.0] = Some(0);
            frontier.push(State {
                cost: 0,
                node: seed,
            });
        }
    }

    while let Some(State { cost: popped, node }) = frontier.pop() {
        if cost[node.0] != Some(popped) {
            continue; // stale
        }

        for edge in graph.edges_from(node) {
            let candidate = popped + edge.price_pence;
            if cost[edge.to.0].is_none_or(|best| candidate < best) {
                cost[edge.to.0] = Some(candidate);
                predecessor[edge.to.0] = Some(node);
                frontier.push(State {
                    cost: candidate,
                    node: edge.to,
                });
            }
        }
    }

    ShortestPaths { cost, predecessor }
}
