//! Version command implementation

use crate::domain::{LEGACY_MODEL_VERSION, MODEL_VERSION};
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    println!("classloader-model {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Model versions:");
    println!("  Current: {MODEL_VERSION}");
    println!("  Legacy: {LEGACY_MODEL_VERSION}");
    println!("  Profile: {}", build_profile());

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
