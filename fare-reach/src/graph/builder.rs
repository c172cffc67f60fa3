//! Graph construction from flow headers and fare lines.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::{FareDate, TicketCode};
use crate::fares::records::{FareRecord, FlowHeader, FlowId};
use crate::stations::{LocationRegistry, NodeId};

use super::{FareEdge, FareGraph};

/// Fares at or below this many pence are placeholder values, not prices a
/// passenger could pay, and never become edges.
pub const MIN_SANE_FARE_PENCE: u32 = 100;

/// A registered flow: resolved endpoints awaiting fare lines.
#[derive(Debug, Clone, Copy)]
struct Flow {
    origin: NodeId,
    destination: NodeId,
    reversible: bool,
}

#[derive(Debug, Clone, Copy)]
struct BestFare {
    price_pence: u32,
    ticket: TicketCode,
}

/// Counters describing what construction kept and dropped.
///
/// Nothing in construction is fatal; these let the caller decide whether
/// the data was too degraded to trust.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Flow headers stored for fare lines to reference.
    pub flows_registered: usize,

    /// Flow headers outside their validity window on the travel date.
    pub flows_inactive: usize,

    /// Flow headers naming a code the registry has never seen.
    pub flows_unknown_endpoint: usize,

    /// Flow headers whose origin and destination resolve to the same node.
    pub flows_self_pair: usize,

    /// Fare lines that improved (or created) an edge.
    pub fares_applied: usize,

    /// Fare lines with a non-fixed-price ticket type or a degenerate price.
    pub fares_ineligible: usize,

    /// Fare lines referencing a flow that was filtered out or never seen.
    pub fares_unknown_flow: usize,
}

/// Accumulates the best-known price per ordered station pair.
///
/// Flow headers and fare lines arrive as separate record streams (many
/// fare lines per flow, one per ticket type), so the builder keeps a
/// transient flow table and tolerates fare lines whose flow was dropped.
#[derive(Debug)]
pub struct GraphBuilder {
    travel_date: FareDate,
    flows: HashMap<FlowId, Flow>,
    best: HashMap<(NodeId, NodeId), BestFare>,
    stats: BuildStats,
}

impl GraphBuilder {
    /// Create a builder for the given travel date.
    pub fn new(travel_date: FareDate) -> Self {
        Self {
            travel_date,
            flows: HashMap::new(),
            best: HashMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Register a flow header.
    ///
    /// The flow is kept only if its validity window covers the travel date
    /// and both endpoints are known to the registry; otherwise it is
    /// dropped and counted. Fare lines for a dropped flow become no-ops.
    pub fn register_flow(&mut self, header: &FlowHeader, registry: &LocationRegistry) {
        if !header.validity.is_active(self.travel_date) {
            self.stats.flows_inactive += 1;
            return;
        }

        let (Some(origin), Some(destination)) = (
            registry.lookup(header.origin),
            registry.lookup(header.destination),
        ) else {
            self.stats.flows_unknown_endpoint += 1;
            return;
        };

        if origin == destination {
            self.stats.flows_self_pair += 1;
            return;
        }

        self.flows.insert(
            header.flow_id,
            Flow {
                origin,
                destination,
                reversible: header.reversible,
            },
        );
        self.stats.flows_registered += 1;
    }

    /// Apply one fare line to the best-price table.
    ///
    /// An unknown flow id is a legitimate no-op (the flow may have been
    /// filtered by date or unknown endpoints). An eligible price replaces
    /// the stored price only when strictly lower; for reversible flows the
    /// same offer is made to the reverse pair.
    pub fn apply_fare(&mut self, fare: &FareRecord) {
        let Some(flow) = self.flows.get(&fare.flow_id).copied() else {
            self.stats.fares_unknown_flow += 1;
            return;
        };

        if !fare.ticket.is_fixed_price() || fare.price_pence <= MIN_SANE_FARE_PENCE {
            self.stats.fares_ineligible += 1;
            return;
        }

        let mut improved = self.offer(flow.origin, flow.destination, fare);
        if flow.reversible {
            improved |= self.offer(flow.destination, flow.origin, fare);
        }
        if improved {
            self.stats.fares_applied += 1;
        }
    }

    /// Offer a price for one ordered pair; returns true if it was taken.
    fn offer(&mut self, from: NodeId, to: NodeId, fare: &FareRecord) -> bool {
        match self.best.entry((from, to)) {
            Entry::Vacant(slot) => {
                slot.insert(BestFare {
                    price_pence: fare.price_pence,
                    ticket: fare.ticket,
                });
                true
            }
            Entry::Occupied(mut slot) => {
                if fare.price_pence < slot.get().price_pence {
                    slot.insert(BestFare {
                        price_pence: fare.price_pence,
                        ticket: fare.ticket,
                    });
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Materialize the adjacency structure.
    ///
    /// The sparse pair table becomes per-node edge lists ordered by
    /// destination index, so iteration order is deterministic. The flow
    /// table is discarded here; edges are never re-opened.
    pub fn into_graph(self, node_count: usize) -> (FareGraph, BuildStats) {
        let mut pairs: Vec<_> = self.best.into_iter().collect();
        pairs.sort_by_key(|&(pair, _)| pair);

        let mut adjacency = vec![Vec::new(); node_count];
        for ((from, to), best) in pairs {
            adjacency[from.0].push(FareEdge {
                to,
                price_pence: best.price_pence,
                ticket: best.ticket,
            });
        }

        (FareGraph::from_adjacency(adjacency), self.stats)
    }
}
