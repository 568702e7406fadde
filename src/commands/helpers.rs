//! Command helper utilities

use tracing::debug;

use crate::cli::ModelInputArgs;
use crate::config::{BuildConfigReader, NoBuildConfig, Settings, YamlBuildConfigReader};
use crate::domain::{ApplicationClassLoaderModel, Coordinate, ProjectInformation};
use crate::error::Result;
use crate::resolver::{ApplicationClassLoaderModelAssembler, RepositoryProvider};

/// Project described by `input`, built into the settings' output directory
pub fn project_information(input: &ModelInputArgs, settings: &Settings) -> Result<ProjectInformation> {
    ProjectInformation::new(
        Coordinate::parse(&input.artifact)?,
        input.kind,
        settings.output.clone(),
    )
}

/// Load the inputs named by `input` and assemble the model of `project`
pub fn assemble_model(
    input: &ModelInputArgs,
    settings: &Settings,
    project: &ProjectInformation,
) -> Result<ApplicationClassLoaderModel> {
    let provider = RepositoryProvider::load(&input.graph, settings.repository.clone())?;
    let build_config = build_config_reader(input, &project.coordinates)?;

    debug!(
        repository = %settings.repository.display(),
        build_directory = %project.build_directory.display(),
        "Resolved settings"
    );
    ApplicationClassLoaderModelAssembler::new(&provider, build_config.as_ref()).assemble(project)
}

fn build_config_reader(
    input: &ModelInputArgs,
    root: &Coordinate,
) -> Result<Box<dyn BuildConfigReader>> {
    match &input.build {
        Some(path) => Ok(Box::new(YamlBuildConfigReader::load(root.clone(), path)?)),
        None => Ok(Box::new(NoBuildConfig)),
    }
}
