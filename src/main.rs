//! avlbench: times concurrent insertion into an AVL tree and checks the result.
//!
//! # Usage
//!
//! ```bash
//! avlbench --threads 8 --tree persistent
//! RUST_LOG=avlbench=info avlbench
//! ```
//!
//! Prints one line per scenario to stdout: the insertion time in milliseconds, or a note that
//! the result was wrong or the scenario faulted. Logs go to stderr.

use avlbench::harness::{run_scenario_as, scenarios, BenchConfig};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Benchmark concurrent insertion into an AVL tree.
#[derive(Parser, Debug)]
#[command(name = "avlbench")]
#[command(about = "Benchmark concurrent insertion into an AVL tree")]
struct Cli {
    #[command(flatten)]
    config: BenchConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = cli.config;

    for e in config.clamp() {
        warn!(error = %e, "invalid configuration, using 1 instead");
    }

    debug!(?config, "configuration");

    // failures are reported per scenario, the exit status stays 0
    for scenario in scenarios(&config) {
        let outcome = run_scenario_as(config.tree, &scenario, &config);
        println!("{}", scenario.report(&outcome));
    }
}
