//! Presentation ordering for search results.

use crate::stations::{LocationRegistry, NodeId};

use super::dijkstra::ShortestPaths;

/// A reachable station with its cheapest total cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedStation {
    pub node: NodeId,
    pub cost_pence: u32,
}

/// Rank reachable stations for output.
///
/// Ascending cost, with equal costs ordered by registration index (the
/// sort is stable). Clusters are internal grouping nodes rather than
/// places a passenger can name, so they are excluded, as is anything
/// costing more than `ceiling_pence`. Unreachable nodes never appear.
pub fn rank_reachable(
    paths: &ShortestPaths,
    registry: &LocationRegistry,
    ceiling_pence: Option<u32>,
) -> Vec<RankedStation> {
    let mut ranked: Vec<RankedStation> = (0..paths.node_count())
        .filter_map(|index| {
            let node = NodeId(index);
            let cost_pence = paths.cost(node)?;
            if registry.is_cluster(node) {
                return None;
            }
            if ceiling_pence.is_some_and(|limit| cost_pence > limit) {
                return None;
            }
            Some(RankedStation { node, cost_pence })
        })
        .collect();

    ranked.sort_by_key(|station| station.cost_pence);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Nlc, TicketCode};
    use crate::graph::{FareEdge, FareGraph};
    use crate::planner::cheapest_from;

    fn nlc(s: &str) -> Nlc {
        Nlc::parse(s).unwrap()
    }

    /// One cluster at node 0, stations at nodes 1..=3.
    fn registry() -> LocationRegistry {
        let mut registry = LocationRegistry::new();
        registry.intern_cluster(nlc("Q015"));
        for (code, name) in [("6121", "Alpha"), ("0433", "Beta"), ("8571", "Gamma")] {
            registry.insert_station(nlc(code), name.to_string()).unwrap();
        }
        registry
    }

    fn graph(node_count: usize, edges: &[(usize, usize, u32)]) -> FareGraph {
        let ticket = TicketCode::parse("CDS").unwrap();
        let mut adjacency = vec![Vec::new(); node_count];
        for &(from, to, price_pence) in edges {
            adjacency[from].push(FareEdge {
                to: NodeId(to),
                price_pence,
                ticket,
            });
        }
        FareGraph::from_adjacency(adjacency)
    }

    #[test]
    fn orders_by_cost_then_registration_index() {
        let registry = registry();
        // Node 3 and node 2 both cost 500; node 2 registered earlier
        let graph = graph(4, &[(1, 3, 500), (1, 2, 500)]);
        let paths = cheapest_from(&graph, &[NodeId(1)]);

        let ranked = rank_reachable(&paths, &registry, None);
        let nodes: Vec<_> = ranked.iter().map(|r| r.node).collect();
        assert_eq!(nodes, vec![NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(ranked[0].cost_pence, 0);
    }

    #[test]
    fn excludes_clusters() {
        let registry = registry();
        // Path to station 2 runs through cluster 0
        let graph = graph(4, &[(1, 0, 300), (0, 2, 300)]);
        let paths = cheapest_from(&graph, &[NodeId(1)]);

        let ranked = rank_reachable(&paths, &registry, None);
        assert!(ranked.iter().all(|r| r.node != NodeId(0)));
        assert!(ranked.iter().any(|r| r.node == NodeId(2) && r.cost_pence == 600));
    }

    #[test]
    fn excludes_costs_above_ceiling() {
        let registry = registry();
        let graph = graph(4, &[(1, 2, 500), (1, 3, 2500)]);
        let paths = cheapest_from(&graph, &[NodeId(1)]);

        let ranked = rank_reachable(&paths, &registry, Some(2000));
        let nodes: Vec<_> = ranked.iter().map(|r| r.node).collect();
        assert_eq!(nodes, vec![NodeId(1), NodeId(2)]);

        // A ceiling equal to the cost keeps the station (inclusive bound)
        let ranked = rank_reachable(&paths, &registry, Some(2500));
        assert!(ranked.iter().any(|r| r.node == NodeId(3)));
    }

    #[test]
    fn excludes_unreachable_stations() {
        let registry = registry();
        let graph = graph(4, &[(1, 2, 500)]);
        let paths = cheapest_from(&graph, &[NodeId(1)]);

        let ranked = rank_reachable(&paths, &registry, None);
        assert!(ranked.iter().all(|r| r.node != NodeId(3)));
    }
}
