//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - resolve: Resolve command arguments and the shared model inputs
//! - show: Show command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod resolve;
pub mod show;

pub use completions::CompletionsArgs;
pub use resolve::{ModelInputArgs, ResolveArgs};
pub use show::ShowArgs;

/// classloader-model - classloader model resolver for Mule deployables
///
/// Computes the effective classloader model of an application and its plugins.
#[derive(Parser, Debug)]
#[command(
    name = "classloader-model",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Computes the effective classloader model of a Mule deployable",
    long_about = "Resolves the deduplicated, conflict-resolved dependency set of an application \
                  and every plugin it loads, validates plugin, domain and shared library rules, \
                  and writes one classloader-model.json per artifact.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  classloader-model resolve -g graph.json -a org.acme:orders:1.0.0   \x1b[90m# Write documents to target/\x1b[0m\n   \
                  classloader-model resolve -g graph.json -a org.acme:orders:1.0.0 --dry-run\n   \
                  classloader-model show -g graph.json -b build.yaml -a org.acme:orders:1.0.0\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve and write classloader model documents
    Resolve(ResolveArgs),

    /// Show the resolved model as a tree
    Show(ShowArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
