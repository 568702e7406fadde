//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides an in-memory [`DependencyProvider`] and short
//! constructors for the coordinates most tests need.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{FakeProvider, coordinate, plugin};
//!
//! #[test]
//! fn my_test() {
//!     let provider = FakeProvider::new()
//!         .with_dependencies(coordinate("app"), vec![plugin("http"), coordinate("lib")])
//!         .with_dependencies(plugin("http"), vec![coordinate("netty")]);
//! }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::coordinate::{MULE_DOMAIN_CLASSIFIER, MULE_PLUGIN_CLASSIFIER};
use crate::domain::{Artifact, Coordinate};
use crate::error::Result;
use crate::resolver::provider::{
    BundleDependency, DependencyProvider, ExportedContent, ScopeFilter, expand_tree,
};

/// Group id shared by every fixture coordinate
pub const TEST_GROUP_ID: &str = "org.test";

/// `org.test:<artifact_id>:1.0.0`
///
/// # Panics
///
/// Panics if `artifact_id` is blank.
#[must_use]
pub fn coordinate(artifact_id: &str) -> Coordinate {
    versioned(artifact_id, "1.0.0")
}

/// `org.test:<artifact_id>:<version>`
///
/// # Panics
///
/// Panics if `artifact_id` or `version` is blank.
#[must_use]
pub fn versioned(artifact_id: &str, version: &str) -> Coordinate {
    Coordinate::new(TEST_GROUP_ID, artifact_id, version).expect("Invalid fixture coordinate")
}

/// Plugin coordinate `org.test:<artifact_id>:1.0.0:jar:mule-plugin`
#[must_use]
pub fn plugin(artifact_id: &str) -> Coordinate {
    coordinate(artifact_id).with_classifier(MULE_PLUGIN_CLASSIFIER)
}

/// Plugin coordinate with an explicit version
#[must_use]
pub fn plugin_version(artifact_id: &str, version: &str) -> Coordinate {
    versioned(artifact_id, version).with_classifier(MULE_PLUGIN_CLASSIFIER)
}

/// Domain coordinate `org.test:<artifact_id>:1.0.0:jar:mule-domain`
#[must_use]
pub fn domain(artifact_id: &str) -> Coordinate {
    coordinate(artifact_id).with_classifier(MULE_DOMAIN_CLASSIFIER)
}

/// Artifact located at `/repo/<file name>`
#[must_use]
pub fn artifact(coordinate: Coordinate) -> Artifact {
    let location = default_location(&coordinate);
    Artifact::new(coordinate, location)
}

fn default_location(coordinate: &Coordinate) -> PathBuf {
    PathBuf::from("/repo").join(coordinate.file_name())
}

/// In-memory dependency graph
///
/// Every coordinate mentioned in the graph resolves to `/repo/<file name>`
/// unless an explicit location was given. Calls to `resolve_transitive` are
/// recorded so tests can assert how often a node was looked up.
#[derive(Debug, Default)]
pub struct FakeProvider {
    edges: HashMap<Coordinate, Vec<Coordinate>>,
    locations: HashMap<Coordinate, PathBuf>,
    exported: HashMap<Coordinate, ExportedContent>,
    lookups: Mutex<Vec<Coordinate>>,
}

impl FakeProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the direct dependencies of `coordinate`
    #[must_use]
    pub fn with_dependencies(mut self, coordinate: Coordinate, dependencies: Vec<Coordinate>) -> Self {
        self.edges.insert(coordinate, dependencies);
        self
    }

    #[must_use]
    pub fn with_location(mut self, coordinate: Coordinate, location: &str) -> Self {
        self.locations.insert(coordinate, PathBuf::from(location));
        self
    }

    #[must_use]
    pub fn with_exported(mut self, coordinate: Coordinate, packages: &[&str], resources: &[&str]) -> Self {
        self.exported.insert(
            coordinate,
            ExportedContent {
                packages: packages.iter().map(ToString::to_string).collect(),
                resources: resources.iter().map(ToString::to_string).collect(),
            },
        );
        self
    }

    /// Coordinates passed to `resolve_transitive`, in call order
    ///
    /// # Panics
    ///
    /// Panics if the lookup log is poisoned.
    #[must_use]
    pub fn lookups(&self) -> Vec<Coordinate> {
        self.lookups.lock().expect("Lookup log poisoned").clone()
    }

    fn is_known(&self, coordinate: &Coordinate) -> bool {
        self.locations.contains_key(coordinate)
            || self.edges.contains_key(coordinate)
            || self.edges.values().any(|deps| deps.contains(coordinate))
    }
}

impl DependencyProvider for FakeProvider {
    fn resolve_transitive(
        &self,
        coordinate: &Coordinate,
        filter: ScopeFilter,
    ) -> Result<Option<Vec<BundleDependency>>> {
        self.lookups
            .lock()
            .expect("Lookup log poisoned")
            .push(coordinate.clone());
        Ok(expand_tree(coordinate, filter, |node| {
            self.edges.get(node).map(|deps| {
                deps.iter()
                    .map(|dep| {
                        let dependency = BundleDependency::new(dep.clone());
                        match self.locations.get(dep) {
                            Some(location) => dependency.with_location(location),
                            None => dependency,
                        }
                    })
                    .collect()
            })
        }))
    }

    fn resolve_location(&self, coordinate: &Coordinate) -> Result<Option<PathBuf>> {
        if let Some(location) = self.locations.get(coordinate) {
            return Ok(Some(location.clone()));
        }
        Ok(self
            .is_known(coordinate)
            .then(|| default_location(coordinate)))
    }

    fn exported_content(&self, coordinate: &Coordinate) -> Result<ExportedContent> {
        Ok(self.exported.get(coordinate).cloned().unwrap_or_default())
    }
}
