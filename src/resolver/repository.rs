//! File-backed dependency provider
//!
//! Reads a dependency-graph manifest produced by an external Maven-like
//! resolver and answers provider queries from it:
//!
//! ```json
//! {
//!   "artifacts": [
//!     {
//!       "coordinates": {"groupId": "org.test", "artifactId": "app", "version": "1.0.0"},
//!       "location": "/work/app/target/app-1.0.0.jar",
//!       "packages": ["org.test.app"],
//!       "resources": [],
//!       "dependencies": [
//!         {"groupId": "org.driver", "artifactId": "driver", "version": "2.1.0", "scope": "compile"}
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Artifacts without a `location` are expected at their Maven layout path
//! below the repository root.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::Coordinate;
use crate::error::{Result, config, fs as fs_error};
use crate::path_utils::repository_file;
use crate::resolver::provider::{
    BundleDependency, DependencyProvider, ExportedContent, ScopeFilter, expand_tree,
};

/// Dependency-graph manifest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphManifest {
    #[serde(default)]
    pub artifacts: Vec<ManifestArtifact>,
}

/// One node of the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestArtifact {
    pub coordinates: Coordinate,
    #[serde(default)]
    pub location: Option<PathBuf>,
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    /// Direct dependencies with their declared scope
    #[serde(default)]
    pub dependencies: Vec<Coordinate>,
}

/// [`DependencyProvider`] answering from a [`GraphManifest`]
#[derive(Debug, Clone)]
pub struct RepositoryProvider {
    repository: PathBuf,
    artifacts: HashMap<Coordinate, ManifestArtifact>,
}

impl RepositoryProvider {
    pub fn new(manifest: GraphManifest, repository: impl Into<PathBuf>) -> Self {
        let mut artifacts = HashMap::with_capacity(manifest.artifacts.len());
        for artifact in manifest.artifacts {
            // First declaration of a coordinate wins
            artifacts
                .entry(artifact.coordinates.clone())
                .or_insert(artifact);
        }
        Self {
            repository: repository.into(),
            artifacts,
        }
    }

    /// Parse a manifest from a JSON string
    #[allow(dead_code)] // used in tests
    pub fn from_json(json: &str, repository: impl Into<PathBuf>) -> Result<Self> {
        let manifest: GraphManifest = serde_json::from_str(json)?;
        Ok(Self::new(manifest, repository))
    }

    /// Load a manifest file
    pub fn load(path: &Path, repository: impl Into<PathBuf>) -> Result<Self> {
        let manifest_path = path.display().to_string();
        if !path.is_file() {
            return Err(config::not_found(manifest_path));
        }
        let content =
            fs::read_to_string(path).map_err(|e| fs_error::read_failed(&manifest_path, e.to_string()))?;
        let manifest: GraphManifest = serde_json::from_str(&content)
            .map_err(|e| config::parse_failed(&manifest_path, e.to_string()))?;
        debug!(
            manifest = %manifest_path,
            artifacts = manifest.artifacts.len(),
            "Loaded dependency graph"
        );
        Ok(Self::new(manifest, repository))
    }

    fn layout_location(&self, coordinate: &Coordinate) -> PathBuf {
        self.repository.join(repository_file(coordinate))
    }

    /// Declared location, resolved against the repository root when relative
    fn location_of(&self, coordinate: &Coordinate) -> PathBuf {
        match self
            .artifacts
            .get(coordinate)
            .and_then(|artifact| artifact.location.as_ref())
        {
            Some(location) if location.is_absolute() => location.clone(),
            Some(location) => self.repository.join(location),
            None => self.layout_location(coordinate),
        }
    }

    fn direct_dependencies(&self, coordinate: &Coordinate) -> Option<Vec<BundleDependency>> {
        self.artifacts.get(coordinate).map(|artifact| {
            artifact
                .dependencies
                .iter()
                .map(|dependency| {
                    BundleDependency::new(dependency.clone())
                        .with_location(self.location_of(dependency))
                })
                .collect()
        })
    }
}

impl DependencyProvider for RepositoryProvider {
    fn resolve_transitive(
        &self,
        coordinate: &Coordinate,
        filter: ScopeFilter,
    ) -> Result<Option<Vec<BundleDependency>>> {
        Ok(expand_tree(coordinate, filter, |node| {
            self.direct_dependencies(node)
        }))
    }

    fn resolve_location(&self, coordinate: &Coordinate) -> Result<Option<PathBuf>> {
        if self.artifacts.contains_key(coordinate) {
            return Ok(Some(self.location_of(coordinate)));
        }
        let layout = self.layout_location(coordinate);
        Ok(layout.is_file().then_some(layout))
    }

    fn exported_content(&self, coordinate: &Coordinate) -> Result<ExportedContent> {
        Ok(self
            .artifacts
            .get(coordinate)
            .map(|artifact| ExportedContent {
                packages: artifact.packages.clone(),
                resources: artifact.resources.clone(),
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Scope;
    use crate::error::ModelError;

    const MANIFEST: &str = r#"{
  "artifacts": [
    {
      "coordinates": {"groupId": "org.test", "artifactId": "app", "version": "1.0.0"},
      "location": "/work/app.jar",
      "packages": ["org.test.app"],
      "dependencies": [
        {"groupId": "org.test", "artifactId": "http", "version": "1.5.0", "classifier": "mule-plugin"},
        {"groupId": "org.test", "artifactId": "api", "version": "1.0.0", "scope": "provided"}
      ]
    },
    {
      "coordinates": {"groupId": "org.test", "artifactId": "http", "version": "1.5.0", "classifier": "mule-plugin"},
      "location": "custom/http.jar",
      "dependencies": [
        {"groupId": "org.test", "artifactId": "netty", "version": "4.1.0"}
      ]
    }
  ]
}"#;

    fn provider() -> RepositoryProvider {
        RepositoryProvider::from_json(MANIFEST, "/m2").unwrap()
    }

    fn coordinate(artifact_id: &str, version: &str) -> Coordinate {
        Coordinate::new("org.test", artifact_id, version).unwrap()
    }

    #[test]
    fn test_resolve_transitive_builds_tree() {
        let tree = provider()
            .resolve_transitive(&coordinate("app", "1.0.0"), ScopeFilter::Runtime)
            .unwrap()
            .unwrap();

        assert_eq!(tree.len(), 2);
        assert!(tree[0].coordinate.is_mule_plugin());
        assert_eq!(tree[0].dependencies.len(), 1);
        assert_eq!(tree[1].scope(), Scope::Provided);
    }

    #[test]
    fn test_locations() {
        let provider = provider();
        let http = coordinate("http", "1.5.0").with_classifier("mule-plugin");

        assert_eq!(
            provider.resolve_location(&http).unwrap(),
            Some(PathBuf::from("/m2/custom/http.jar"))
        );
        assert_eq!(
            provider.resolve_location(&coordinate("app", "1.0.0")).unwrap(),
            Some(PathBuf::from("/work/app.jar"))
        );

        let tree = provider
            .resolve_transitive(&http, ScopeFilter::Runtime)
            .unwrap()
            .unwrap();
        assert_eq!(
            tree[0].location.as_deref(),
            Some(Path::new("/m2/org/test/netty/4.1.0/netty-4.1.0.jar"))
        );
    }

    #[test]
    fn test_unknown_coordinate() {
        let provider = provider();
        let unknown = coordinate("unknown", "1.0.0");
        assert!(
            provider
                .resolve_transitive(&unknown, ScopeFilter::All)
                .unwrap()
                .is_none()
        );
        assert!(provider.resolve_location(&unknown).unwrap().is_none());
    }

    #[test]
    fn test_exported_content() {
        let content = provider()
            .exported_content(&coordinate("app", "1.0.0"))
            .unwrap();
        assert_eq!(content.packages, vec!["org.test.app".to_string()]);
        assert!(content.resources.is_empty());
    }

    #[test]
    fn test_load_reports_missing_manifest() {
        let err = RepositoryProvider::load(Path::new("/nonexistent/graph.json"), "/m2").unwrap_err();
        assert!(matches!(err, ModelError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_rejects_blank_coordinates() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("graph.json");
        fs::write(
            &path,
            r#"{"artifacts": [{"coordinates": {"groupId": "", "artifactId": "a", "version": "1"}}]}"#,
        )
        .unwrap();

        let err = RepositoryProvider::load(&path, "/m2").unwrap_err();
        assert!(matches!(err, ModelError::ConfigParseFailed { .. }));
        assert!(format!("{err:?}").contains("groupId"));
    }
}
