//! gmatch command-line tool
//!
//! Loads a pattern and a target graph from JSON files and prints the subgraph
//! mappings, a match count, or the maximum common subgraphs.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;
mod error;
mod run;

use clap::Parser;
use tracing::info;

use args::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let pattern = run::load_graph(&args.pattern)?;
    let target = run::load_graph(&args.target)?;

    info!(mode = ?args.mode, semantics = ?args.semantics, "running search");
    let report = run::run(&args, &pattern, &target)?;

    for line in report.lines() {
        println!("{line}");
    }
    Ok(())
}
