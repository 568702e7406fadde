//! Tool settings
//!
//! Resolved once per command, highest precedence first: command-line flags,
//! environment variables, built-in defaults.

use std::env;
use std::path::{Path, PathBuf};

use normpath::PathExt;

use crate::common::string_utils::is_blank;
use crate::error::{Result, config};

/// Environment variable overriding the local repository root
pub const REPOSITORY_ENV: &str = "CLASSLOADER_MODEL_REPOSITORY";

/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "target";

/// Effective settings of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root of the local Maven-layout repository
    pub repository: PathBuf,
    /// Directory documents are written below
    pub output: PathBuf,
}

impl Settings {
    /// Resolve settings from optional command-line values
    ///
    /// # Errors
    ///
    /// Returns a config error when no repository is given and the home
    /// directory cannot be determined.
    pub fn resolve(repository: Option<PathBuf>, output: Option<PathBuf>) -> Result<Self> {
        let repository = match repository {
            Some(path) => path,
            None => default_repository()?,
        };
        Ok(Self {
            repository: normalize(&repository),
            output: output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }
}

fn default_repository() -> Result<PathBuf> {
    if let Ok(value) = env::var(REPOSITORY_ENV) {
        if !is_blank(&value) {
            return Ok(PathBuf::from(value));
        }
    }
    let home = dirs::home_dir()
        .ok_or_else(|| config::invalid("Could not determine home directory"))?;
    Ok(home.join(".m2").join("repository"))
}

/// Canonical form of `path` if it exists, otherwise `path` unchanged
fn normalize(path: &Path) -> PathBuf {
    path.normalize()
        .map(normpath::BasePathBuf::into_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
