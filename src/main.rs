//! classloader-model - classloader model resolver for Mule deployables
//!
//! Resolves the dependency graph of an application, domain or policy together
//! with every plugin it loads, validates the plugin set and writes one
//! classloader model document per artifact.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod path_utils;
mod resolver;
mod serialization;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Show(args) => commands::show::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        tracing::debug!(kind = ?e.kind(), "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
