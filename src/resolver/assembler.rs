//! Application classloader model assembly
//!
//! Orchestrates one resolution pass over a deployable:
//!
//! 1. Resolve the application's base dependency set
//! 2. Split off domain references
//! 3. Discover plugins with a worklist, building one model per plugin
//! 4. Reject plugins reachable only transitively
//! 5. Check the reconciled plugin set for incompatible majors
//! 6. Attach additional plugin dependencies from build configuration
//! 7. Merge everything into an [`ApplicationClassLoaderModel`]
//! 8. Attach API specification fragments
//! 9. Apply shared libraries and the packaging rules
//!
//! ## Transitive plugins
//!
//! A plugin may depend on another plugin directly. A plugin that is only
//! reachable through a library is rejected unless the application or the
//! owning plugin declares it directly:
//!
//! ```text
//! app ── http (plugin) ── sockets (plugin)      accepted
//! app ── lib ── sockets (plugin)                rejected
//! ```

use std::collections::{HashMap, VecDeque};

use tracing::{debug, info};

use crate::config::build::{BuildConfigReader, packaging_tool_configuration, read_shared_libraries};
use crate::config::tree::ConfigNode;
use crate::domain::packaging::{PackagingFacts, validate_packaging};
use crate::domain::{
    ApplicationClassLoaderModel, Artifact, ClassLoaderModel, Coordinate, MODEL_VERSION,
    PluginModel, ProjectInformation,
};
use crate::error::{Result, resolution, validation};
use crate::resolver::additional::{
    AdditionalPluginDependenciesResolver, PluginAdditions, read_plugin_declarations,
};
use crate::resolver::application::{ApplicationDependencyResolver, filter_application_dependencies};
use crate::resolver::compatibility::validate_compatibility;
use crate::resolver::conflicts::resolve_conflicts;
use crate::resolver::provider::{
    BundleDependency, DependencyProvider, ScopeFilter, flatten, resolve_artifact,
};
use crate::resolver::resources::{ResourceGraphResolver, is_resource_artifact};

/// Dependencies of one model before it is built
struct Closure {
    dependencies: Vec<Artifact>,
    /// Direct plugin dependencies after conflict resolution
    direct_plugins: Vec<BundleDependency>,
}

/// Plugins discovered during one pass
struct PluginSet {
    /// Every plugin, conflict-resolved, in discovery order
    known: Vec<BundleDependency>,
    models: Vec<(Artifact, ClassLoaderModel)>,
}

/// Builds the composite classloader model of a deployable
pub struct ApplicationClassLoaderModelAssembler<'a> {
    provider: &'a dyn DependencyProvider,
    build_config: &'a dyn BuildConfigReader,
}

impl<'a> ApplicationClassLoaderModelAssembler<'a> {
    pub fn new(provider: &'a dyn DependencyProvider, build_config: &'a dyn BuildConfigReader) -> Self {
        Self {
            provider,
            build_config,
        }
    }

    /// Run a full resolution pass for `project`
    ///
    /// # Errors
    ///
    /// Any error aborts the pass: resolution errors from the provider,
    /// `IllegalState` errors for misdeclared additional dependencies and
    /// validation errors for transitive plugins, incompatible plugin
    /// versions, shared libraries and domain references.
    pub fn assemble(&self, project: &ProjectInformation) -> Result<ApplicationClassLoaderModel> {
        let root = &project.coordinates;
        info!(project = %root, packaging = %project.packaging, "Assembling classloader model");

        let direct = ApplicationDependencyResolver::new(self.provider).resolve(root)?;
        let (domains, runtime): (Vec<BundleDependency>, Vec<BundleDependency>) = direct
            .into_iter()
            .partition(|dependency| dependency.coordinate.is_mule_domain());

        let declared: Vec<BundleDependency> = runtime
            .iter()
            .filter(|dependency| dependency.coordinate.is_mule_plugin())
            .cloned()
            .collect();

        let mut violations = Vec::new();
        let application = self.collect(root, &runtime, &declared, &declared, &mut violations)?;
        let plugins = self.discover_plugins(&application.direct_plugins, &declared, &mut violations)?;
        if !violations.is_empty() {
            return Err(validation::transitive_plugins(&violations));
        }
        validate_compatibility(&plugins.known)?;

        let configuration = packaging_tool_configuration(self.build_config, root)?;
        let additions = self.resolve_additions(configuration.as_ref(), &plugins.models)?;

        let exported = self.provider.exported_content(root)?;
        let base = ClassLoaderModel::new(MODEL_VERSION, root.clone())?
            .set_dependencies(application.dependencies)
            .set_packages(exported.packages)
            .set_resources(exported.resources);
        let mut model = ApplicationClassLoaderModel::new(base);
        model.merge_dependencies(
            plugins
                .models
                .into_iter()
                .map(|(artifact, plugin_model)| {
                    let extras = additions.get(&artifact).map(<[Artifact]>::to_vec);
                    let mut entry = PluginModel::new(artifact, plugin_model);
                    entry.additional_dependencies = extras.unwrap_or_default();
                    entry
                })
                .collect(),
        );

        let domain_artifacts = domains
            .iter()
            .map(|domain| resolve_artifact(self.provider, domain))
            .collect::<Result<Vec<_>>>()?;
        model.set_domain(domain_artifacts.first().cloned());

        self.attach_resources(&mut model, &runtime)?;

        let shared_libraries = match &configuration {
            Some(configuration) => read_shared_libraries(configuration)?,
            None => Vec::new(),
        };
        let direct_dependencies: Vec<Artifact> = model
            .class_loader_model()
            .dependencies()
            .iter()
            .filter(|artifact| {
                runtime
                    .iter()
                    .any(|dependency| dependency.coordinate.same_ga(artifact.coordinates()))
            })
            .cloned()
            .collect();
        validate_packaging(
            project.packaging,
            &PackagingFacts {
                domains: &domain_artifacts,
                shared_libraries: &shared_libraries,
                direct_dependencies: &direct_dependencies,
            },
        )?;
        model.mark_shared(|artifact| {
            shared_libraries
                .iter()
                .any(|library| library.matches(artifact.coordinates()))
        });

        info!(
            plugins = model.plugin_models().count(),
            dependencies = model.class_loader_model().dependencies().len(),
            "Assembled classloader model"
        );
        Ok(model)
    }

    /// Build one model per plugin reachable from `direct`
    ///
    /// Each plugin's direct plugin dependencies are resolved against the
    /// plugins already known, so the first version family seen wins.
    fn discover_plugins(
        &self,
        direct: &[BundleDependency],
        declared: &[BundleDependency],
        violations: &mut Vec<String>,
    ) -> Result<PluginSet> {
        let mut known: Vec<BundleDependency> = Vec::new();
        for plugin in direct {
            if !known.iter().any(|k| k.coordinate == plugin.coordinate) {
                known.push(plugin.clone());
            }
        }
        let mut queue: VecDeque<BundleDependency> = known.iter().cloned().collect();
        let mut models: Vec<(Artifact, ClassLoaderModel)> = Vec::new();

        while let Some(plugin) = queue.pop_front() {
            if models
                .iter()
                .any(|(artifact, _)| *artifact.coordinates() == plugin.coordinate)
            {
                continue;
            }

            let roots = self
                .provider
                .resolve_transitive(&plugin.coordinate, ScopeFilter::Runtime)?
                .ok_or_else(|| resolution::artifact_not_found(plugin.coordinate.to_string()))?;
            let roots = filter_application_dependencies(roots);
            let closure = self.collect(&plugin.coordinate, &roots, &known, declared, violations)?;

            let exported = self.provider.exported_content(&plugin.coordinate)?;
            let model = ClassLoaderModel::new(MODEL_VERSION, plugin.coordinate.clone())?
                .set_dependencies(closure.dependencies)
                .set_packages(exported.packages)
                .set_resources(exported.resources);
            debug!(
                plugin = %plugin.coordinate,
                dependencies = model.dependencies().len(),
                "Built plugin classloader model"
            );

            for nested in closure.direct_plugins {
                if !known.iter().any(|k| k.coordinate == nested.coordinate) {
                    known.push(nested.clone());
                    queue.push_back(nested);
                }
            }
            models.push((resolve_artifact(self.provider, &plugin)?, model));
        }

        Ok(PluginSet { known, models })
    }

    /// Runtime closure of `roots` without descending below plugins
    ///
    /// Direct plugin roots are substituted by their `definitive`
    /// counterparts. Plugins found deeper are recorded in `violations`
    /// unless a direct root or a `declared` plugin shares their identity.
    fn collect(
        &self,
        owner: &Coordinate,
        roots: &[BundleDependency],
        definitive: &[BundleDependency],
        declared: &[BundleDependency],
        violations: &mut Vec<String>,
    ) -> Result<Closure> {
        let plugin_roots: Vec<BundleDependency> = roots
            .iter()
            .filter(|root| root.coordinate.is_mule_plugin())
            .cloned()
            .collect();
        let direct_plugins = resolve_conflicts(Some(plugin_roots.as_slice()), Some(definitive))?;

        let mut dependencies: Vec<Artifact> = Vec::new();
        for node in flatten(roots, true) {
            let artifact = if !node.coordinate.is_mule_plugin() {
                resolve_artifact(self.provider, node)?
            } else if let Some(index) = plugin_roots
                .iter()
                .position(|root| root.coordinate == node.coordinate)
            {
                resolve_artifact(self.provider, &direct_plugins[index])?
            } else {
                let allowed = plugin_roots
                    .iter()
                    .chain(declared)
                    .any(|plugin| plugin.coordinate.same_ga(&node.coordinate));
                if !allowed {
                    let violation = node.coordinate.to_string();
                    debug!(plugin = %violation, owner = %owner, "Transitive plugin found");
                    if !violations.contains(&violation) {
                        violations.push(violation);
                    }
                }
                continue;
            };
            if !dependencies.contains(&artifact) {
                dependencies.push(artifact);
            }
        }

        Ok(Closure {
            dependencies,
            direct_plugins,
        })
    }

    /// Additional dependencies from the application's configuration, then
    /// from each plugin's own configuration
    fn resolve_additions(
        &self,
        application: Option<&ConfigNode>,
        models: &[(Artifact, ClassLoaderModel)],
    ) -> Result<PluginAdditions> {
        let plugins: Vec<Artifact> = models.iter().map(|(artifact, _)| artifact.clone()).collect();
        let by_coordinate: HashMap<Coordinate, ClassLoaderModel> = models
            .iter()
            .map(|(artifact, model)| (artifact.coordinates().clone(), model.clone()))
            .collect();

        let mut configurations: Vec<ConfigNode> = application.into_iter().cloned().collect();
        for plugin in &plugins {
            if let Some(configuration) =
                packaging_tool_configuration(self.build_config, plugin.coordinates())?
            {
                configurations.push(configuration);
            }
        }

        let resolver = AdditionalPluginDependenciesResolver::new(self.provider);
        let mut additions = PluginAdditions::default();
        for configuration in &configurations {
            let declarations = read_plugin_declarations(configuration)?;
            if declarations.is_empty() {
                continue;
            }
            additions.merge_first_wins(resolver.resolve(&declarations, &plugins, &by_coordinate)?);
        }
        Ok(additions)
    }

    /// Attach fragments reachable from API specification dependencies
    fn attach_resources(
        &self,
        model: &mut ApplicationClassLoaderModel,
        runtime: &[BundleDependency],
    ) -> Result<()> {
        let frontier: Vec<Coordinate> = runtime
            .iter()
            .filter(|dependency| is_resource_artifact(&dependency.coordinate))
            .map(|dependency| dependency.coordinate.clone())
            .collect();
        if frontier.is_empty() {
            return Ok(());
        }

        let mut graph = ResourceGraphResolver::new(self.provider);
        let missing: Vec<Artifact> = graph
            .resolve(Some(frontier.as_slice()))?
            .into_iter()
            .filter(|artifact| !model.class_loader_model().dependencies().contains(artifact))
            .collect();
        if !missing.is_empty() {
            info!(count = missing.len(), "Attaching API specification fragments");
            model.add_direct_dependencies(missing);
        }
        Ok(())
    }
}
