//! Configuration handling
//!
//! This module contains:
//! - `tree` - Generic configuration element tree walked by the resolvers
//! - `build` - Build descriptor (`build.yaml`) with packaging tool plugin configuration
//! - `settings` - Repository root and output directory of a run

pub mod build;
pub mod settings;
pub mod tree;

// Re-export commonly used types
pub use build::{BuildConfigReader, NoBuildConfig, YamlBuildConfigReader};
pub use settings::Settings;
