//! Serialized classloader model schema
//!
//! ```json
//! {
//!   "version": "1.2.0",
//!   "artifactCoordinates": {"groupId": "...", "artifactId": "...", "version": "...", "type": "jar"},
//!   "dependencies": [{"artifactCoordinates": {...}, "uri": "..."}],
//!   "packages": [],
//!   "resources": [],
//!   "additionalPluginDependencies": [{"groupId": "...", "artifactId": "...", "additionalDependencies": [...]}]
//! }
//! ```
//!
//! A `uri` is always relative and uses forward slashes. The app and legacy
//! views give the Maven layout path below the repository root; the
//! parametrized view gives the path inside the packaged deployable. The
//! legacy view has no `additionalPluginDependencies` block.

use serde::{Deserialize, Serialize};

use crate::domain::classloader::view;
use crate::domain::{Artifact, ClassLoaderModel, Coordinate, ResolvedPlugin, ViewKind};
use crate::error::Result;
use crate::path_utils::{repository_file, to_forward_slashes};

/// Serialized form of a [`ClassLoaderModel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassLoaderModelDocument {
    pub version: String,
    pub artifact_coordinates: Coordinate,
    #[serde(default)]
    pub dependencies: Vec<ArtifactDocument>,
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_plugin_dependencies: Option<Vec<PluginDocument>>,
}

/// Serialized form of an [`Artifact`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDocument {
    pub artifact_coordinates: Coordinate,
    pub uri: String,
}

/// Serialized form of a [`ResolvedPlugin`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDocument {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default)]
    pub additional_dependencies: Vec<ArtifactDocument>,
}

impl ArtifactDocument {
    /// Document of an artifact already transformed to `kind`
    fn new(artifact: &Artifact, kind: ViewKind) -> Self {
        let uri = match kind {
            ViewKind::Parametrized => to_forward_slashes(artifact.location()),
            ViewKind::App | ViewKind::Legacy => {
                to_forward_slashes(&repository_file(artifact.coordinates()))
            }
        };
        Self {
            artifact_coordinates: artifact.coordinates().clone(),
            uri,
        }
    }
}

impl PluginDocument {
    fn new(plugin: &ResolvedPlugin, kind: ViewKind) -> Self {
        Self {
            group_id: plugin.group_id.clone(),
            artifact_id: plugin.artifact_id.clone(),
            additional_dependencies: plugin
                .additional_dependencies
                .iter()
                .map(|artifact| ArtifactDocument::new(artifact, kind))
                .collect(),
        }
    }
}

/// Render `model` as a document of the given view
pub fn render(model: &ClassLoaderModel, kind: ViewKind) -> ClassLoaderModelDocument {
    let viewed = view(model, kind);
    let additional_plugin_dependencies = (kind != ViewKind::Legacy).then(|| {
        viewed
            .additional_plugin_dependencies()
            .iter()
            .map(|plugin| PluginDocument::new(plugin, kind))
            .collect()
    });
    ClassLoaderModelDocument {
        version: viewed.version().to_string(),
        artifact_coordinates: viewed.coordinates().clone(),
        dependencies: viewed
            .dependencies()
            .iter()
            .map(|artifact| ArtifactDocument::new(artifact, kind))
            .collect(),
        packages: viewed.packages().to_vec(),
        resources: viewed.resources().to_vec(),
        additional_plugin_dependencies,
    }
}

/// Pretty-printed JSON of a document
pub fn to_json(document: &ClassLoaderModelDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
