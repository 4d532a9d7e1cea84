//! Qiita CLI
//!
//! Command-line front end for `qiita-core`. Every subcommand maps to one
//! client accessor and prints its result as pretty JSON on stdout.

mod commands;
mod runner;

use clap::Parser;
use commands::Cli;
use runner::Runner;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, env.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);
    if let Err(e) = runner.run(&mut std::io::stdout().lock()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `--verbose` means debug everywhere. Otherwise `RUST_LOG` applies as
/// given, falling back to `info` when unset or unparseable.
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    env.and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
