//! Composite classloader model of a deployable
//!
//! Owns the base [`ClassLoaderModel`] of the application together with one
//! sub-model per plugin it loads. Built once per resolution pass; only
//! [`ApplicationClassLoaderModel::merge_dependencies`] and
//! [`ApplicationClassLoaderModel::add_direct_dependencies`] change it.

use crate::domain::{Artifact, ClassLoaderModel, ResolvedPlugin};

/// A plugin model ready to be merged into an application
#[derive(Debug, Clone)]
pub struct PluginModel {
    pub artifact: Artifact,
    pub model: ClassLoaderModel,
    /// Extra dependencies declared for this plugin by build configuration
    pub additional_dependencies: Vec<Artifact>,
}

impl PluginModel {
    pub fn new(artifact: Artifact, model: ClassLoaderModel) -> Self {
        Self {
            artifact,
            model,
            additional_dependencies: Vec::new(),
        }
    }
}

/// Classloader model of an application and every plugin it loads
#[derive(Debug, Clone)]
pub struct ApplicationClassLoaderModel {
    model: ClassLoaderModel,
    plugins: Vec<(Artifact, ClassLoaderModel)>,
    domain: Option<Artifact>,
}

impl ApplicationClassLoaderModel {
    pub fn new(model: ClassLoaderModel) -> Self {
        Self {
            model,
            plugins: Vec::new(),
            domain: None,
        }
    }

    /// Base model of the application itself
    pub fn class_loader_model(&self) -> &ClassLoaderModel {
        &self.model
    }

    /// Model stored for a plugin artifact
    #[allow(dead_code)]
    pub fn get_class_loader_model(&self, plugin: &Artifact) -> Option<&ClassLoaderModel> {
        self.plugins
            .iter()
            .find(|(artifact, _)| artifact == plugin)
            .map(|(_, model)| model)
    }

    /// Plugin artifacts with their models, in merge order
    pub fn plugin_models(&self) -> impl Iterator<Item = (&Artifact, &ClassLoaderModel)> {
        self.plugins.iter().map(|(artifact, model)| (artifact, model))
    }

    pub fn domain(&self) -> Option<&Artifact> {
        self.domain.as_ref()
    }

    pub(crate) fn set_domain(&mut self, domain: Option<Artifact>) {
        self.domain = domain;
    }

    /// Absorb plugin models
    ///
    /// Each plugin's additional dependencies are appended to that plugin's
    /// own model and recorded on the application as a nested list for the
    /// plugin; they never reach the application's top-level dependencies.
    /// Merging a plugin a second time replaces its model.
    pub fn merge_dependencies(&mut self, plugins: Vec<PluginModel>) {
        for plugin in plugins {
            let PluginModel {
                artifact,
                mut model,
                additional_dependencies,
            } = plugin;

            if !additional_dependencies.is_empty() {
                model.extend_dependencies(additional_dependencies.iter().cloned());
                let mut nested: Vec<ResolvedPlugin> = self
                    .model
                    .additional_plugin_dependencies()
                    .iter()
                    .filter(|existing| !existing.matches(artifact.coordinates()))
                    .cloned()
                    .collect();
                nested.push(ResolvedPlugin::new(
                    artifact.coordinates(),
                    additional_dependencies,
                ));
                self.model = self.model.set_additional_plugin_dependencies(nested);
            }

            match self.plugins.iter_mut().find(|(existing, _)| *existing == artifact) {
                Some((_, existing)) => *existing = model,
                None => self.plugins.push((artifact, model)),
            }
        }
    }

    /// Append artifacts to the application's own dependency list
    pub fn add_direct_dependencies(&mut self, artifacts: Vec<Artifact>) {
        self.model.extend_dependencies(artifacts);
    }

    /// Mark application dependencies as shared libraries
    pub(crate) fn mark_shared(&mut self, predicate: impl Fn(&Artifact) -> bool) {
        for artifact in self.model.dependencies_mut() {
            if predicate(artifact) {
                artifact.set_shared(true);
            }
        }
    }

    /// Every artifact of the application and its plugins, deduplicated
    pub fn artifacts(&self) -> Vec<Artifact> {
        let mut all = self.model.artifacts();
        for (_, model) in &self.plugins {
            for artifact in model.artifacts() {
                if !all.contains(&artifact) {
                    all.push(artifact);
                }
            }
        }
        all
    }
}
