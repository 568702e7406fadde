use std::path::PathBuf;

use clap::{Args, Parser};

use crate::domain::{PackagingKind, ViewKind};

/// Inputs every model command needs
#[derive(Args, Debug, Clone)]
pub struct ModelInputArgs {
    /// Dependency graph manifest (JSON)
    #[arg(long, short = 'g')]
    pub graph: PathBuf,

    /// Build descriptor with packaging tool configuration (YAML)
    #[arg(long, short = 'b')]
    pub build: Option<PathBuf>,

    /// Project coordinates: groupId:artifactId:version[:type[:classifier]]
    #[arg(long, short = 'a')]
    pub artifact: String,

    /// Packaging kind (application, domain, domain-bundle, policy)
    #[arg(long, short = 'k', default_value = "application")]
    pub kind: PackagingKind,

    /// Local repository root (defaults to $CLASSLOADER_MODEL_REPOSITORY or ~/.m2/repository)
    #[arg(long, short = 'r')]
    pub repository: Option<PathBuf>,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve an application:\n    classloader-model resolve -g graph.json -a org.acme:orders:1.0.0\n\n\
                  Resolve with build configuration:\n    classloader-model resolve -g graph.json -b build.yaml -a org.acme:orders:1.0.0\n\n\
                  Write repository-relative URIs:\n    classloader-model resolve -g graph.json -a org.acme:orders:1.0.0 --view parametrized\n\n\
                  Print the application document only:\n    classloader-model resolve -g graph.json -a org.acme:orders:1.0.0 --dry-run")]
pub struct ResolveArgs {
    #[command(flatten)]
    pub input: ModelInputArgs,

    /// Document view (app, parametrized, legacy)
    #[arg(long, default_value = "app")]
    pub view: ViewKind,

    /// Output directory (defaults to target)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the application document instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}
