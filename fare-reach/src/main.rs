use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fare_reach::domain::FareDate;
use fare_reach::pipeline::{self, PipelineConfig};
use fare_reach::report;

/// Cheapest reachable fares from a set of starting stations.
#[derive(Parser)]
#[command(name = "fare-reach")]
struct Args {
    /// Base path of the fares feed (".FSC" and ".FFL" are appended)
    fare_base: PathBuf,

    /// CORPUS reference CSV (station name, location code)
    reference_csv: PathBuf,

    /// Travel date as DDMMYYYY, e.g. 16062024
    travel_date: FareDate,

    /// Newline-separated station names to start from
    starting_stations: PathBuf,

    /// Only report stations reachable for at most this many pence
    max_cost_pence: Option<u32>,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = PipelineConfig {
        fare_base: args.fare_base,
        reference_csv: args.reference_csv,
        travel_date: args.travel_date,
        origins_file: args.starting_stations,
    };

    let started = Instant::now();
    let output = pipeline::run(&config);
    tracing::info!("pipeline finished in {:?}", started.elapsed());

    let stats = &output.stats;
    if stats.build.flows_unknown_endpoint > 0 {
        tracing::info!(
            "{} flows referenced locations outside the registry",
            stats.build.flows_unknown_endpoint
        );
    }
    if stats.unresolved_origins > 0 {
        tracing::warn!(
            "{} starting stations could not be resolved",
            stats.unresolved_origins
        );
    }

    let rows = report::build_report(&output, args.max_cost_pence);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).expect("report rows serialize")
        );
    } else {
        print!("{}", report::render_text(&rows));
    }
}
