//! Additional plugin dependencies
//!
//! Packaging tool configuration may attach extra dependencies to a plugin,
//! typically drivers a connector loads reflectively:
//!
//! ```yaml
//! additionalPluginDependencies:
//!   - plugin:
//!       groupId: org.mule.connectors
//!       artifactId: mule-db-connector
//!       additionalDependencies:
//!         - dependency:
//!             groupId: com.mysql
//!             artifactId: mysql-connector-j
//!             version: 8.4.0
//! ```
//!
//! Declarations are read from the [`ConfigNode`] tree, resolved through the
//! dependency provider and accumulated per plugin in [`PluginAdditions`].

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::build::required_value;
use crate::config::tree::ConfigNode;
use crate::domain::{Artifact, ClassLoaderModel, Coordinate};
use crate::error::{Result, config, plugin};
use crate::resolver::provider::{
    BundleDependency, DependencyProvider, ScopeFilter, flatten, resolve_artifact,
};

const ADDITIONAL_PLUGIN_DEPENDENCIES: &str = "additionalPluginDependencies";
const ADDITIONAL_DEPENDENCIES: &str = "additionalDependencies";

/// A plugin entry read from build configuration, not yet resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDeclaration {
    pub group_id: String,
    pub artifact_id: String,
    pub additional_dependencies: Vec<DependencyDeclaration>,
}

impl PluginDeclaration {
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.group_id == coordinate.group_id() && self.artifact_id == coordinate.artifact_id()
    }
}

/// One declared additional dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub artifact_type: Option<String>,
    pub classifier: Option<String>,
}

impl DependencyDeclaration {
    pub fn to_coordinate(&self) -> Result<Coordinate> {
        let mut coordinate = Coordinate::new(&self.group_id, &self.artifact_id, &self.version)?;
        if let Some(artifact_type) = &self.artifact_type {
            coordinate = coordinate.with_type(artifact_type)?;
        }
        if let Some(classifier) = &self.classifier {
            coordinate = coordinate.with_classifier(classifier);
        }
        Ok(coordinate)
    }
}

/// Read the `additionalPluginDependencies` block of a configuration
///
/// An absent block yields no declarations.
///
/// # Errors
///
/// Returns `ModelError::MissingConfigValue` naming the first element
/// without a required value.
pub fn read_plugin_declarations(configuration: &ConfigNode) -> Result<Vec<PluginDeclaration>> {
    let Some(block) = configuration.child(ADDITIONAL_PLUGIN_DEPENDENCIES) else {
        return Ok(Vec::new());
    };
    block.children().iter().map(read_plugin).collect()
}

fn read_plugin(node: &ConfigNode) -> Result<PluginDeclaration> {
    let additional_dependencies = match node.child(ADDITIONAL_DEPENDENCIES) {
        Some(block) => block
            .children()
            .iter()
            .map(read_dependency)
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };
    Ok(PluginDeclaration {
        group_id: required_value(node, "groupId")?.to_string(),
        artifact_id: required_value(node, "artifactId")?.to_string(),
        additional_dependencies,
    })
}

fn read_dependency(node: &ConfigNode) -> Result<DependencyDeclaration> {
    Ok(DependencyDeclaration {
        group_id: required_value(node, "groupId")?.to_string(),
        artifact_id: required_value(node, "artifactId")?.to_string(),
        version: read_version(node)?,
        artifact_type: node.child_value("type").map(str::to_string),
        classifier: node.child_value("classifier").map(str::to_string),
    })
}

/// Version of a dependency element, which must be a YAML string
///
/// An unquoted `1.10` parses as the number `1.1`, so numeric versions are
/// rejected rather than silently resolved to another release.
fn read_version(node: &ConfigNode) -> Result<String> {
    let version = required_value(node, "version")?;
    if node.child("version").is_some_and(ConfigNode::is_numeric) {
        return Err(config::invalid(format!(
            "version {version} of additional dependency {} must be quoted",
            node.child_value("artifactId").unwrap_or_default()
        )));
    }
    Ok(version.to_string())
}

/// Extra dependencies accumulated per plugin, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct PluginAdditions {
    entries: Vec<(Artifact, Vec<Artifact>)>,
}

impl PluginAdditions {
    pub fn get(&self, plugin: &Artifact) -> Option<&[Artifact]> {
        self.entries
            .iter()
            .find(|(key, _)| key == plugin)
            .map(|(_, extras)| extras.as_slice())
    }

    /// Append `extras` to the entry of `plugin`, skipping known artifacts
    fn append(&mut self, plugin: &Artifact, extras: Vec<Artifact>) {
        match self.entries.iter_mut().find(|(key, _)| key == plugin) {
            Some((_, existing)) => {
                for extra in extras {
                    if !existing.contains(&extra) {
                        existing.push(extra);
                    }
                }
            }
            None => self.entries.push((plugin.clone(), extras)),
        }
    }

    /// Merge entries of `other` for plugins not yet present
    ///
    /// A plugin keeps the extras of the first source that declared it.
    pub fn merge_first_wins(&mut self, other: PluginAdditions) {
        for (plugin, extras) in other.entries {
            if self.get(&plugin).is_some() {
                debug!(plugin = %plugin.coordinates(), "Additional dependencies already declared");
                continue;
            }
            self.entries.push((plugin, extras));
        }
    }
}

/// Resolves declared additional dependencies against the plugin set
pub struct AdditionalPluginDependenciesResolver<'a> {
    provider: &'a dyn DependencyProvider,
}

impl<'a> AdditionalPluginDependenciesResolver<'a> {
    pub fn new(provider: &'a dyn DependencyProvider) -> Self {
        Self { provider }
    }

    /// Resolve every declaration
    ///
    /// `plugins` are the resolved plugin artifacts of the deployable and
    /// `models` their classloader models keyed by coordinate. Extras already
    /// among a plugin's dependencies are skipped; a plugin whose extras are
    /// all skipped gets no entry.
    ///
    /// # Errors
    ///
    /// Returns an `IllegalState` error if a declaration names a plugin that
    /// is not resolved or has no model yet, and a resolution error if a
    /// declared dependency cannot be located.
    pub fn resolve(
        &self,
        declarations: &[PluginDeclaration],
        plugins: &[Artifact],
        models: &HashMap<Coordinate, ClassLoaderModel>,
    ) -> Result<PluginAdditions> {
        let mut additions = PluginAdditions::default();

        for declaration in declarations {
            let declared = format!("{}:{}", declaration.group_id, declaration.artifact_id);
            let plugin = plugins
                .iter()
                .find(|plugin| declaration.matches(plugin.coordinates()))
                .ok_or_else(|| plugin::not_present(&declared))?;
            let model = models
                .get(plugin.coordinates())
                .ok_or_else(|| plugin::model_missing(&declared))?;

            let mut extras: Vec<Artifact> = Vec::new();
            for dependency in &declaration.additional_dependencies {
                for artifact in self.resolve_dependency(dependency)? {
                    if model.dependencies().contains(&artifact) {
                        debug!(
                            plugin = %declared,
                            dependency = %artifact.coordinates(),
                            "Skipping additional dependency already present"
                        );
                        continue;
                    }
                    if !extras.contains(&artifact) {
                        extras.push(artifact);
                    }
                }
            }

            if !extras.is_empty() {
                info!(
                    plugin = %declared,
                    count = extras.len(),
                    "Resolved additional plugin dependencies"
                );
                additions.append(plugin, extras);
            }
        }
        Ok(additions)
    }

    /// A declared dependency followed by its runtime closure
    fn resolve_dependency(&self, declaration: &DependencyDeclaration) -> Result<Vec<Artifact>> {
        let root = BundleDependency::new(declaration.to_coordinate()?);
        let mut resolved = vec![resolve_artifact(self.provider, &root)?];
        if let Some(tree) = self
            .provider
            .resolve_transitive(&root.coordinate, ScopeFilter::Runtime)?
        {
            for dependency in flatten(&tree, false) {
                resolved.push(resolve_artifact(self.provider, dependency)?);
            }
        }
        Ok(resolved)
    }
}
