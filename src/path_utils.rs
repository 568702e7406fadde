//! Path utilities for repository layouts
//!
//! Artifacts are addressed the way a Maven repository lays them out:
//! `<group/as/dirs>/<artifactId>/<version>/<file>`. Rendered paths always use
//! forward slashes so serialized documents are identical on every platform.

use std::path::{Path, PathBuf};

use crate::domain::Coordinate;

/// Folder holding bundled artifacts inside a packaged deployable
pub const REPOSITORY_FOLDER: &str = "repository";

/// Convert a path to a string with forward slashes
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Directory of a coordinate relative to a repository root
///
/// # Examples
///
/// ```ignore
/// // org.mule.connectors:mule-http-connector:1.5.0
/// // -> org/mule/connectors/mule-http-connector/1.5.0
/// ```
pub fn repository_dir(coordinate: &Coordinate) -> PathBuf {
    let mut path: PathBuf = coordinate.group_id().split('.').collect();
    path.push(coordinate.artifact_id());
    path.push(coordinate.version());
    path
}

/// File of a coordinate relative to a repository root
pub fn repository_file(coordinate: &Coordinate) -> PathBuf {
    repository_dir(coordinate).join(coordinate.file_name())
}

/// Relative path of a coordinate inside a packaged deployable
pub fn packaged_location(coordinate: &Coordinate) -> String {
    to_forward_slashes(&Path::new(REPOSITORY_FOLDER).join(repository_file(coordinate)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate() -> Coordinate {
        Coordinate::new("org.mule.connectors", "mule-http-connector", "1.5.0")
            .unwrap()
            .with_classifier("mule-plugin")
    }

    #[test]
    fn test_repository_dir() {
        assert_eq!(
            to_forward_slashes(&repository_dir(&coordinate())),
            "org/mule/connectors/mule-http-connector/1.5.0"
        );
    }

    #[test]
    fn test_packaged_location() {
        assert_eq!(
            packaged_location(&coordinate()),
            "repository/org/mule/connectors/mule-http-connector/1.5.0/mule-http-connector-1.5.0-mule-plugin.jar"
        );
    }

    #[test]
    fn test_to_forward_slashes() {
        assert_eq!(to_forward_slashes(Path::new("a\\b/c")), "a/b/c");
    }
}
