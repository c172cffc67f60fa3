//! Report rows for the launcher to print or serialize.
//!
//! The core hands over costs and a predecessor tree; this module flattens
//! them into self-contained rows so the printing side needs no access to
//! the registry or the graph.

use serde::Serialize;

use crate::pipeline::PipelineOutput;
use crate::planner::rank_reachable;

/// One hop of a cheapest path.
#[derive(Debug, Clone, Serialize)]
pub struct PathLeg {
    /// Location code of the hop's destination.
    pub to_code: String,

    /// Description of the hop's destination.
    pub to: String,

    /// Ticket type pricing this hop.
    pub ticket: String,

    /// Price of this hop in pence.
    pub price_pence: u32,
}

/// One reachable station, in ranked order.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    /// Location code of the station.
    pub code: String,

    /// Station name.
    pub name: String,

    /// Cheapest total cost in pence.
    pub cost_pence: u32,

    /// Description of the starting station the cheapest path leaves from.
    pub origin: String,

    /// Hops from the starting station; empty when the station is itself a
    /// seed.
    pub legs: Vec<PathLeg>,
}

/// Build ranked report rows from a pipeline run.
///
/// Stations costing more than `ceiling_pence` are omitted, as are
/// unreachable stations and cluster nodes.
pub fn build_report(output: &PipelineOutput, ceiling_pence: Option<u32>) -> Vec<ReportRow> {
    rank_reachable(&output.paths, &output.registry, ceiling_pence)
        .iter()
        .map(|station| {
            let path = output.paths.path_to(station.node).unwrap_or_default();
            let origin = path
                .first()
                .map(|&node| output.registry.describe(node))
                .unwrap_or_default();

            let legs = path
                .windows(2)
                .map(|hop| {
                    let edge = output.graph.edge(hop[0], hop[1]);
                    PathLeg {
                        to_code: output.registry.code(hop[1]).to_string(),
                        to: output.registry.describe(hop[1]),
                        ticket: edge.map(|e| e.ticket.to_string()).unwrap_or_default(),
                        price_pence: edge.map(|e| e.price_pence).unwrap_or_default(),
                    }
                })
                .collect();

            ReportRow {
                code: output.registry.code(station.node).to_string(),
                name: output.registry.describe(station.node),
                cost_pence: station.cost_pence,
                origin,
                legs,
            }
        })
        .collect()
}

/// Render rows as the human-readable text report.
pub fn render_text(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "{} ({}) for {}p\n",
            row.name, row.code, row.cost_pence
        ));
        if !row.legs.is_empty() {
            out.push_str(&format!("    {}\n", row.origin));
            for leg in &row.legs {
                out.push_str(&format!(
                    "    - {} ({}) [{}, {}p]\n",
                    leg.to, leg.to_code, leg.ticket, leg.price_pence
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FareDate, Nlc, TicketCode, ValidityWindow};
    use crate::fares::records::{FareRecord, FlowHeader, FlowId};
    use crate::graph::GraphBuilder;
    use crate::pipeline::PipelineStats;
    use crate::planner::cheapest_from;
    use crate::stations::{ClusterTable, LocationRegistry};

    fn nlc(s: &str) -> Nlc {
        Nlc::parse(s).unwrap()
    }

    /// Alpha → Beta for 500p, Beta → Gamma for 300p, seeded at Alpha.
    fn output() -> PipelineOutput {
        let mut registry = LocationRegistry::new();
        for (code, name) in [("6121", "Alpha"), ("0433", "Beta"), ("8571", "Gamma")] {
            registry.insert_station(nlc(code), name.to_string()).unwrap();
        }

        let travel = FareDate::parse("16062024").unwrap();
        let window = ValidityWindow::new(FareDate::parse("01012020").unwrap(), FareDate::OPEN_ENDED);
        let mut builder = GraphBuilder::new(travel);
        for (id, origin, dest) in [(1, "6121", "0433"), (2, "0433", "8571")] {
            builder.register_flow(
                &FlowHeader {
                    flow_id: FlowId(id),
                    origin: nlc(origin),
                    destination: nlc(dest),
                    reversible: false,
                    validity: window,
                },
                &registry,
            );
        }
        builder.apply_fare(&FareRecord {
            flow_id: FlowId(1),
            ticket: TicketCode::parse("CDS").unwrap(),
            price_pence: 500,
        });
        builder.apply_fare(&FareRecord {
            flow_id: FlowId(2),
            ticket: TicketCode::parse("SDS").unwrap(),
            price_pence: 300,
        });

        let (graph, build) = builder.into_graph(registry.len());
        let seeds = vec![registry.resolve_name("Alpha").unwrap()];
        let paths = cheapest_from(&graph, &seeds);

        PipelineOutput {
            registry,
            clusters: ClusterTable::new(),
            graph,
            seeds,
            paths,
            stats: PipelineStats {
                build,
                ..PipelineStats::default()
            },
        }
    }

    #[test]
    fn rows_are_ranked_with_paths() {
        let output = output();
        let rows = build_report(&output, None);

        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);

        let gamma = &rows[2];
        assert_eq!(gamma.cost_pence, 800);
        assert_eq!(gamma.origin, "Alpha");
        assert_eq!(gamma.legs.len(), 2);
        assert_eq!(gamma.legs[0].to, "Beta");
        assert_eq!(gamma.legs[0].ticket, "CDS");
        assert_eq!(gamma.legs[1].to, "Gamma");
        assert_eq!(gamma.legs[1].price_pence, 300);
    }

    #[test]
    fn seed_row_has_no_legs() {
        let output = output();
        let rows = build_report(&output, None);
        assert_eq!(rows[0].name, "Alpha");
        assert_eq!(rows[0].cost_pence, 0);
        assert!(rows[0].legs.is_empty());
    }

    #[test]
    fn ceiling_limits_rows() {
        let output = output();
        let rows = build_report(&output, Some(500));
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn text_rendering() {
        let output = output();
        let rows = build_report(&output, None);
        let text = render_text(&rows);

        assert!(text.contains("Beta (0433) for 500p"));
        assert!(text.contains("Gamma (8571) for 800p"));
        assert!(text.contains("    - Beta (0433) [CDS, 500p]"));
    }

    #[test]
    fn rows_serialize_to_json() {
        let output = output();
        let rows = build_report(&output, None);
        let json = serde_json::to_string(&rows).unwrap();
        assert!(json.contains("\"cost_pence\":500"));
        assert!(json.contains("\"ticket\":\"SDS\""));
    }
}
