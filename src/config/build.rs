//! Build descriptor (build.yaml) reading
//!
//! A build descriptor carries the packaging-tool plugin configuration of the
//! root project and, under `projects`, of any nested plugin project:
//!
//! ```yaml
//! plugins:
//!   - groupId: org.mule.tools.maven
//!     artifactId: mule-maven-plugin
//!     configuration:
//!       sharedLibraries:
//!         - sharedLibrary: {groupId: org.driver, artifactId: driver}
//! projects:
//!   "org.mule.connectors:mule-db-connector":
//!     plugins: []
//! ```
//!
//! The resolution engine only sees the [`BuildConfigReader`] trait and walks
//! the returned [`ConfigNode`] trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::tree::ConfigNode;
use crate::domain::{Coordinate, SharedLibrary};
use crate::error::{Result, argument, config, fs as fs_error};

/// Group id of the application packaging tool
pub const APPLICATION_TOOL_GROUP_ID: &str = "org.mule.tools.maven";
/// Artifact id of the application packaging tool
pub const APPLICATION_TOOL_ARTIFACT_ID: &str = "mule-maven-plugin";
/// Group id of the extension packaging tool
pub const EXTENSION_TOOL_GROUP_ID: &str = "org.mule.runtime.plugins";
/// Artifact id of the extension packaging tool
pub const EXTENSION_TOOL_ARTIFACT_ID: &str = "mule-extensions-maven-plugin";

const CONFIGURATION: &str = "configuration";
const SHARED_LIBRARIES: &str = "sharedLibraries";

/// Source of build-plugin configuration per project
pub trait BuildConfigReader: Send + Sync {
    /// Configuration of build plugin `group_id:artifact_id` declared by
    /// `project`, or `None` when the project does not declare it
    fn plugin_configuration(
        &self,
        project: &Coordinate,
        group_id: &str,
        artifact_id: &str,
    ) -> Result<Option<ConfigNode>>;
}

/// Reader for projects without any build configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBuildConfig;

impl BuildConfigReader for NoBuildConfig {
    fn plugin_configuration(
        &self,
        _project: &Coordinate,
        _group_id: &str,
        _artifact_id: &str,
    ) -> Result<Option<ConfigNode>> {
        Ok(None)
    }
}

/// Parsed build descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildDescriptor {
    /// Build plugins of the root project
    #[serde(default)]
    pub plugins: Vec<BuildPlugin>,

    /// Build sections of other projects, keyed by `groupId:artifactId`
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectBuild>,
}

/// Build section of one nested project
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectBuild {
    #[serde(default)]
    pub plugins: Vec<BuildPlugin>,
}

/// One build plugin declaration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPlugin {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default)]
    pub configuration: serde_yaml::Value,
}

impl BuildDescriptor {
    /// Parse a build descriptor from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let descriptor: Self = serde_yaml::from_str(yaml)?;
        Ok(descriptor)
    }

    /// Load a build descriptor from a file
    pub fn load(path: &Path) -> Result<Self> {
        let descriptor_path = path.display().to_string();
        if !path.is_file() {
            return Err(config::not_found(descriptor_path));
        }
        let content =
            fs::read_to_string(path).map_err(|e| fs_error::read_failed(&descriptor_path, e.to_string()))?;
        serde_yaml::from_str::<Option<Self>>(&content)
            .map(Option::unwrap_or_default)
            .map_err(|e| config::parse_failed(descriptor_path, e.to_string()))
    }
}

/// [`BuildConfigReader`] backed by a [`BuildDescriptor`]
///
/// The descriptor's top-level plugins belong to `root`; every other project
/// is looked up in `projects` by `groupId:artifactId`.
#[derive(Debug, Clone)]
pub struct YamlBuildConfigReader {
    root: Coordinate,
    descriptor: BuildDescriptor,
}

impl YamlBuildConfigReader {
    pub fn new(root: Coordinate, descriptor: BuildDescriptor) -> Self {
        Self { root, descriptor }
    }

    pub fn load(root: Coordinate, path: &Path) -> Result<Self> {
        Ok(Self::new(root, BuildDescriptor::load(path)?))
    }

    fn plugins_of(&self, project: &Coordinate) -> &[BuildPlugin] {
        if project.same_ga(&self.root) {
            return &self.descriptor.plugins;
        }
        self.descriptor
            .projects
            .get(&project.ga())
            .map_or(&[], |build| build.plugins.as_slice())
    }
}

impl BuildConfigReader for YamlBuildConfigReader {
    fn plugin_configuration(
        &self,
        project: &Coordinate,
        group_id: &str,
        artifact_id: &str,
    ) -> Result<Option<ConfigNode>> {
        Ok(self
            .plugins_of(project)
            .iter()
            .find(|plugin| plugin.group_id == group_id && plugin.artifact_id == artifact_id)
            .map(|plugin| ConfigNode::from_yaml(CONFIGURATION, &plugin.configuration)))
    }
}

/// Configuration of whichever packaging tool `project` declares
///
/// The application tool is looked up before the extension tool.
pub fn packaging_tool_configuration(
    reader: &dyn BuildConfigReader,
    project: &Coordinate,
) -> Result<Option<ConfigNode>> {
    for (group_id, artifact_id) in [
        (APPLICATION_TOOL_GROUP_ID, APPLICATION_TOOL_ARTIFACT_ID),
        (EXTENSION_TOOL_GROUP_ID, EXTENSION_TOOL_ARTIFACT_ID),
    ] {
        if let Some(node) = reader.plugin_configuration(project, group_id, artifact_id)? {
            return Ok(Some(node));
        }
    }
    Ok(None)
}

/// Shared libraries declared in a packaging tool configuration
///
/// # Errors
///
/// Returns `ModelError::MissingConfigValue` for an entry without a groupId
/// or artifactId.
pub fn read_shared_libraries(configuration: &ConfigNode) -> Result<Vec<SharedLibrary>> {
    let Some(block) = configuration.child(SHARED_LIBRARIES) else {
        return Ok(Vec::new());
    };
    block
        .children()
        .iter()
        .map(|entry| {
            Ok(SharedLibrary {
                group_id: required_value(entry, "groupId")?.to_string(),
                artifact_id: required_value(entry, "artifactId")?.to_string(),
            })
        })
        .collect()
}

/// Non-blank value of child `name`, or a missing-value error
pub fn required_value<'a>(node: &'a ConfigNode, name: &str) -> Result<&'a str> {
    node.child_value(name)
        .ok_or_else(|| argument::missing_config_value(name))
}
