//! Application base dependency set
//!
//! Provided-scope dependencies are supplied by the runtime and never become
//! part of the application. Domain references are the exception: they are
//! kept as metadata so the domain can be recorded and validated.

use tracing::debug;

use crate::domain::{Coordinate, Scope};
use crate::error::{Result, resolution};
use crate::resolver::provider::{BundleDependency, DependencyProvider, ScopeFilter};

/// Produces the base dependency list of an application
pub struct ApplicationDependencyResolver<'a> {
    provider: &'a dyn DependencyProvider,
}

impl<'a> ApplicationDependencyResolver<'a> {
    pub fn new(provider: &'a dyn DependencyProvider) -> Self {
        Self { provider }
    }

    /// Resolve and filter the direct dependencies of `project`
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ArtifactNotFound` if the provider does not know
    /// the project.
    pub fn resolve(&self, project: &Coordinate) -> Result<Vec<BundleDependency>> {
        let dependencies = self
            .provider
            .resolve_transitive(project, ScopeFilter::Runtime)?
            .ok_or_else(|| resolution::artifact_not_found(project.to_string()))?;
        Ok(filter_application_dependencies(dependencies))
    }
}

/// Drop provided dependencies that are not domain references
pub fn filter_application_dependencies(dependencies: Vec<BundleDependency>) -> Vec<BundleDependency> {
    dependencies
        .into_iter()
        .filter(|dependency| {
            let keep =
                dependency.scope() != Scope::Provided || dependency.coordinate.is_mule_domain();
            if !keep {
                debug!(dependency = %dependency.coordinate, "Dropping provided dependency");
            }
            keep
        })
        .collect()
}
