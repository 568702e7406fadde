//! Classloader model of a single artifact
//!
//! A [`ClassLoaderModel`] records what one artifact needs at runtime: its
//! resolved dependencies, the packages and resources it exposes, and the
//! extra dependencies declared for the plugins it loads.
//!
//! Alternative renderings of a model (repository-relative URIs, the legacy
//! layout understood by older runtimes) are produced by [`view`] as new
//! values; the stored model is never rewritten in place.

use crate::common::string_utils::is_blank;
use crate::domain::artifact::dedup_artifacts;
use crate::domain::{Artifact, Coordinate};
use crate::error::{Result, argument};
use crate::path_utils::packaged_location;

/// Model format written by this tool
pub const MODEL_VERSION: &str = "1.2.0";

/// Model format of runtimes without per-plugin additional dependencies
pub const LEGACY_MODEL_VERSION: &str = "1.0.0";

/// Additional dependencies resolved for one plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlugin {
    pub group_id: String,
    pub artifact_id: String,
    pub additional_dependencies: Vec<Artifact>,
}

impl ResolvedPlugin {
    pub fn new(plugin: &Coordinate, additional_dependencies: Vec<Artifact>) -> Self {
        Self {
            group_id: plugin.group_id().to_string(),
            artifact_id: plugin.artifact_id().to_string(),
            additional_dependencies,
        }
    }

    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.group_id == coordinate.group_id() && self.artifact_id == coordinate.artifact_id()
    }
}

/// Runtime requirements of one artifact
#[derive(Debug, Clone, PartialEq)]
pub struct ClassLoaderModel {
    version: String,
    coordinates: Coordinate,
    dependencies: Vec<Artifact>,
    packages: Vec<String>,
    resources: Vec<String>,
    additional_plugin_dependencies: Vec<ResolvedPlugin>,
}

impl ClassLoaderModel {
    /// Create an empty model
    ///
    /// # Errors
    ///
    /// Returns `ModelError::BlankField` if `version` is blank.
    pub fn new(version: impl Into<String>, coordinates: Coordinate) -> Result<Self> {
        let version = version.into();
        if is_blank(&version) {
            return Err(argument::blank_field("version"));
        }
        Ok(Self {
            version,
            coordinates,
            dependencies: Vec::new(),
            packages: Vec::new(),
            resources: Vec::new(),
            additional_plugin_dependencies: Vec::new(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn coordinates(&self) -> &Coordinate {
        &self.coordinates
    }

    pub fn dependencies(&self) -> &[Artifact] {
        &self.dependencies
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn additional_plugin_dependencies(&self) -> &[ResolvedPlugin] {
        &self.additional_plugin_dependencies
    }

    pub fn set_dependencies(&self, dependencies: Vec<Artifact>) -> Self {
        Self {
            dependencies,
            ..self.clone()
        }
    }

    pub fn set_packages(&self, packages: Vec<String>) -> Self {
        Self {
            packages,
            ..self.clone()
        }
    }

    pub fn set_resources(&self, resources: Vec<String>) -> Self {
        Self {
            resources,
            ..self.clone()
        }
    }

    pub fn set_additional_plugin_dependencies(&self, plugins: Vec<ResolvedPlugin>) -> Self {
        Self {
            additional_plugin_dependencies: plugins,
            ..self.clone()
        }
    }

    /// Append dependencies whose coordinate is not yet present
    pub(crate) fn extend_dependencies(&mut self, artifacts: impl IntoIterator<Item = Artifact>) {
        for artifact in artifacts {
            if !self.dependencies.contains(&artifact) {
                self.dependencies.push(artifact);
            }
        }
    }

    pub(crate) fn dependencies_mut(&mut self) -> &mut Vec<Artifact> {
        &mut self.dependencies
    }

    /// Every artifact this model brings in: the dependencies plus each
    /// plugin's additional dependencies, deduplicated by coordinate
    pub fn artifacts(&self) -> Vec<Artifact> {
        dedup_artifacts(
            self.dependencies.iter().chain(
                self.additional_plugin_dependencies
                    .iter()
                    .flat_map(|plugin| plugin.additional_dependencies.iter()),
            ),
        )
    }
}

/// Rendering of a model for a target runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    /// The model as resolved, URIs relative to the repository root
    #[default]
    App,
    /// Dependency URIs relative to the packaged repository folder
    Parametrized,
    /// Additional plugin dependencies folded into the dependency list
    Legacy,
}

impl std::str::FromStr for ViewKind {
    type Err = crate::error::ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "app" => Ok(ViewKind::App),
            "parametrized" | "parameterized" => Ok(ViewKind::Parametrized),
            "legacy" => Ok(ViewKind::Legacy),
            other => Err(argument::invalid(format!("Unknown view '{other}'"))),
        }
    }
}

fn relocate(artifacts: &[Artifact]) -> Vec<Artifact> {
    artifacts
        .iter()
        .map(|artifact| artifact.with_location(packaged_location(artifact.coordinates())))
        .collect()
}

/// Copy of `model` whose URIs point into the packaged repository folder
pub fn to_parametrized_view(model: &ClassLoaderModel) -> ClassLoaderModel {
    let plugins = model
        .additional_plugin_dependencies
        .iter()
        .map(|plugin| ResolvedPlugin {
            additional_dependencies: relocate(&plugin.additional_dependencies),
            ..plugin.clone()
        })
        .collect();
    model
        .set_dependencies(relocate(&model.dependencies))
        .set_additional_plugin_dependencies(plugins)
}

/// Copy of `model` in the layout older runtimes understand
pub fn to_legacy_view(model: &ClassLoaderModel) -> ClassLoaderModel {
    ClassLoaderModel {
        version: LEGACY_MODEL_VERSION.to_string(),
        dependencies: model.artifacts(),
        additional_plugin_dependencies: Vec::new(),
        ..model.clone()
    }
}

/// Render `model` for the given view
pub fn view(model: &ClassLoaderModel, kind: ViewKind) -> ClassLoaderModel {
    match kind {
        ViewKind::App => model.clone(),
        ViewKind::Parametrized => to_parametrized_view(model),
        ViewKind::Legacy => to_legacy_view(model),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn coordinate(artifact_id: &str, version: &str) -> Coordinate {
        Coordinate::new("org.test", artifact_id, version).unwrap()
    }

    fn artifact(artifact_id: &str) -> Artifact {
        Artifact::new(
            coordinate(artifact_id, "1.0.0"),
            format!("/repo/{artifact_id}.jar"),
        )
    }

    fn model() -> ClassLoaderModel {
        ClassLoaderModel::new(MODEL_VERSION, coordinate("app", "1.0.0")).unwrap()
    }

    #[test]
    fn test_blank_version_rejected() {
        let err = ClassLoaderModel::new(" ", coordinate("app", "1.0.0")).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_new_model_is_empty() {
        let model = model();
        assert!(model.dependencies().is_empty());
        assert!(model.packages().is_empty());
        assert!(model.resources().is_empty());
        assert!(model.artifacts().is_empty());
    }

    #[test]
    fn test_artifacts_collapse_shared_coordinate() {
        let shared = artifact("shared-lib");
        let plugin = ResolvedPlugin::new(&coordinate("plugin", "1.0.0"), vec![shared; 6]);
        let model = model().set_additional_plugin_dependencies(vec![plugin]);

        assert_eq!(model.artifacts().len(), 1);
    }

    #[test]
    fn test_artifacts_union_of_distinct_coordinates() {
        let plugins = (0..6)
            .map(|p| {
                let deps = (0..6).map(|d| artifact(&format!("dep-{p}-{d}"))).collect();
                ResolvedPlugin::new(&coordinate(&format!("plugin-{p}"), "1.0.0"), deps)
            })
            .collect();
        let model = model().set_additional_plugin_dependencies(plugins);

        assert_eq!(model.artifacts().len(), 36);
    }

    #[test]
    fn test_artifacts_include_dependencies() {
        let plugin = ResolvedPlugin::new(
            &coordinate("plugin", "1.0.0"),
            vec![artifact("extra"), artifact("base")],
        );
        let model = model()
            .set_dependencies(vec![artifact("base")])
            .set_additional_plugin_dependencies(vec![plugin]);

        let artifact_ids: Vec<String> = model
            .artifacts()
            .iter()
            .map(|a| a.coordinates().artifact_id().to_string())
            .collect();
        assert_eq!(artifact_ids, vec!["base", "extra"]);
    }

    #[test]
    fn test_setters_copy_on_write() {
        let original = model();
        let updated = original.set_packages(vec!["org.test.api".to_string()]);
        assert!(original.packages().is_empty());
        assert_eq!(updated.packages(), ["org.test.api".to_string()]);
        assert_eq!(updated.coordinates(), original.coordinates());
    }

    #[test]
    fn test_extend_dependencies_skips_duplicates() {
        let mut model = model().set_dependencies(vec![artifact("a")]);
        model.extend_dependencies(vec![artifact("a"), artifact("b")]);
        assert_eq!(model.dependencies().len(), 2);
    }

    #[test]
    fn test_parametrized_view_relocates_uris() {
        let plugin = ResolvedPlugin::new(&coordinate("plugin", "1.0.0"), vec![artifact("extra")]);
        let model = model()
            .set_dependencies(vec![artifact("lib")])
            .set_additional_plugin_dependencies(vec![plugin]);

        let parametrized = view(&model, ViewKind::Parametrized);
        assert_eq!(
            parametrized.dependencies()[0].location(),
            Path::new("repository/org/test/lib/1.0.0/lib-1.0.0.jar")
        );
        assert_eq!(
            parametrized.additional_plugin_dependencies()[0].additional_dependencies[0].location(),
            Path::new("repository/org/test/extra/1.0.0/extra-1.0.0.jar")
        );
        assert_eq!(model.dependencies()[0].location(), Path::new("/repo/lib.jar"));
    }

    #[test]
    fn test_legacy_view_folds_plugin_dependencies() {
        let plugin = ResolvedPlugin::new(&coordinate("plugin", "1.0.0"), vec![artifact("extra")]);
        let model = model()
            .set_dependencies(vec![artifact("lib")])
            .set_additional_plugin_dependencies(vec![plugin]);

        let legacy = view(&model, ViewKind::Legacy);
        assert_eq!(legacy.version(), LEGACY_MODEL_VERSION);
        assert_eq!(legacy.dependencies().len(), 2);
        assert!(legacy.additional_plugin_dependencies().is_empty());
    }

    #[test]
    fn test_view_kind_from_str() {
        assert_eq!("legacy".parse::<ViewKind>().unwrap(), ViewKind::Legacy);
        assert_eq!("Parameterized".parse::<ViewKind>().unwrap(), ViewKind::Parametrized);
        assert!("other".parse::<ViewKind>().is_err());
    }
}
