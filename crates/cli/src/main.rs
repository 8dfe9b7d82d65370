mod config;
mod graph_io;
mod output;
mod provenance;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loopfinder::{filter_similar_loops, CancelFlag, LoopSampler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use config::Parameters;
use output::LoopsFile;
use provenance::Sidecar;

#[derive(Parser)]
#[command(name = "loops")]
#[command(about = "Find closed walking loops of a target length around a start point")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Search loops on a walking-network export and write them as JSON
    Search(SearchArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Walking network export (JSON nodes + edges)
    #[arg(long)]
    graph: PathBuf,
    /// Run parameters (YAML)
    #[arg(long, default_value = "parameters.yaml")]
    params: PathBuf,
    /// Start point override: latitude and longitude
    #[arg(
        long,
        short = 'c',
        num_args = 2,
        value_names = ["LAT", "LON"],
        allow_negative_numbers = true
    )]
    coordinates: Option<Vec<f64>>,
    /// RNG seed; drawn from entropy (and logged) when absent
    #[arg(long)]
    seed: Option<u64>,
    /// Stop sampling after this many seconds and keep what was found
    #[arg(long)]
    time_limit_secs: Option<u64>,
    /// Output file; defaults to a name under RESULTS_PATH
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    // RUST_LOG wins; otherwise INFO, which shows each found loop.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Search(args) => search(args).map(|_| ()),
        Action::Report => report(),
    }
}

/// Returns the written loop file, or `None` when nothing was found.
fn search(args: SearchArgs) -> Result<Option<PathBuf>> {
    let mut params = Parameters::load(&args.params)?;
    if let Some(c) = &args.coordinates {
        params.override_start(c[0], c[1]);
    }
    params.validate()?;
    let start_point = params.start_point();
    let cfg = params.search_cfg();

    let network = graph_io::load_graph(&args.graph)?;
    let radius_km = cfg.search_radius_km();
    let local = network.restricted_to_radius(start_point, radius_km);
    tracing::info!(
        nodes = network.node_count(),
        kept_nodes = local.node_count(),
        kept_edges = local.edge_count(),
        radius_km,
        "graph loaded"
    );

    let start = local
        .nearest_node(start_point)
        .with_context(|| format!("no graph node within {radius_km:.2} km of the start point"))?;
    tracing::info!(start_node = %start, "nearest node");

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let cancel = CancelFlag::new();
    if let Some(secs) = args.time_limit_secs {
        let flag = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs(secs));
            flag.cancel();
        });
    }

    let (lo, hi) = cfg.length_window_km();
    tracing::info!(
        target_km = cfg.target_km,
        lo_km = lo,
        hi_km = hi,
        attempts = cfg.attempts,
        seed,
        "searching for loops"
    );
    let report = LoopSampler::new(&local, start, cfg)
        .with_cancel(cancel)
        .run(&mut rng)?;

    if report.loops.is_empty() {
        tracing::info!("No loops found within tolerance.");
        return Ok(None);
    }
    let found = report.loops.len();
    let loops = match params.similarity_threshold() {
        Some(t) => filter_similar_loops(report.loops, t),
        None => report.loops,
    };
    tracing::info!(found, kept = loops.len(), "loops ready");

    let out = args.out.clone().unwrap_or_else(|| {
        params.paths.results_path.join(format!(
            "loops_{radius_km}km-around-({},{}).json",
            start_point.lat, start_point.lon
        ))
    });
    LoopsFile::build(&local, start_point, start, cfg.target_km, &loops)?.write(&out)?;

    let run = RunRecord {
        settings: &params.settings,
        seed,
        start_node: start.0,
        search_radius_km: radius_km,
        attempts: report.stats.attempts,
        accepted: report.stats.accepted,
        kept_after_similarity: loops.len(),
        cancelled: report.stats.cancelled,
    };
    Sidecar::for_artifact(&out, run)
        .with_input(&args.params)
        .with_input(&args.graph)
        .write()?;
    tracing::info!(out = %out.display(), "loops written");
    Ok(Some(out))
}

/// Settings and counters of one `search` run, as recorded in the sidecar.
#[derive(Serialize)]
struct RunRecord<'a> {
    settings: &'a config::Settings,
    seed: u64,
    start_node: u64,
    search_radius_km: f64,
    attempts: usize,
    accepted: usize,
    kept_after_similarity: usize,
    cancelled: bool,
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_revision(),
        "version": loopfinder::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
