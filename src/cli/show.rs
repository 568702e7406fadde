use clap::Parser;

use crate::cli::resolve::ModelInputArgs;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the resolved model:\n    classloader-model show -g graph.json -a org.acme:orders:1.0.0\n\n\
                  Show a domain:\n    classloader-model show -g graph.json -a org.acme:shared:1.0.0 --kind domain")]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: ModelInputArgs,
}
