//! Artifact domain type
//!
//! A resolved [`Coordinate`] together with the location of its binary.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

/// A resolved dependency
///
/// Equality and hashing delegate to the coordinate, so an artifact seen at
/// two locations is still one artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "artifactCoordinates")]
    coordinates: Coordinate,

    #[serde(rename = "uri")]
    location: PathBuf,

    #[serde(skip)]
    shared: bool,
}

impl Artifact {
    pub fn new(coordinates: Coordinate, location: impl Into<PathBuf>) -> Self {
        Self {
            coordinates,
            location: location.into(),
            shared: false,
        }
    }

    pub fn coordinates(&self) -> &Coordinate {
        &self.coordinates
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }

    pub fn set_shared(&mut self, shared: bool) {
        self.shared = shared;
    }

    pub fn with_location(&self, location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            ..self.clone()
        }
    }
}

impl PartialEq for Artifact {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates == other.coordinates
    }
}

impl Eq for Artifact {}

impl Hash for Artifact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinates.hash(state);
    }
}

/// Deduplicate artifacts by coordinate, keeping the first occurrence and
/// the original order
pub fn dedup_artifacts<'a>(artifacts: impl IntoIterator<Item = &'a Artifact>) -> Vec<Artifact> {
    let mut seen = HashSet::new();
    artifacts
        .into_iter()
        .filter(|artifact| seen.insert(artifact.coordinates().clone()))
        .cloned()
        .collect()
}
