//! Reachability walk over non-binary artifact graphs
//!
//! API specification fragments reference each other freely, including in
//! cycles. [`ResourceGraphResolver`] collects every fragment reachable from a
//! frontier exactly once.
//!
//! ## Algorithm
//!
//! Depth-first search with a visited set:
//!
//! 1. Skip a coordinate already in the visited set
//! 2. Mark it visited and record its artifact
//! 3. Fetch its direct dependencies from the provider and recurse
//!
//! The visited set lives in the resolver, so several `resolve` calls on one
//! instance never return the same coordinate twice.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{Artifact, Coordinate};
use crate::error::{Result, argument};
use crate::resolver::provider::{BundleDependency, DependencyProvider, ScopeFilter, resolve_artifact};

/// Classifiers of API specification artifacts
pub const RESOURCE_CLASSIFIERS: &[&str] = &[
    "raml",
    "raml-fragment",
    "oas",
    "json-schema",
    "traits",
    "library",
];

/// Whether `coordinate` is an API specification artifact
pub fn is_resource_artifact(coordinate: &Coordinate) -> bool {
    coordinate
        .classifier()
        .is_some_and(|classifier| RESOURCE_CLASSIFIERS.contains(&classifier))
}

/// Depth-first collector over a resource graph
pub struct ResourceGraphResolver<'a> {
    provider: &'a dyn DependencyProvider,
    visited: HashSet<Coordinate>,
}

impl<'a> ResourceGraphResolver<'a> {
    pub fn new(provider: &'a dyn DependencyProvider) -> Self {
        Self {
            provider,
            visited: HashSet::new(),
        }
    }

    /// Artifacts reachable from `frontier` that were not visited before
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error for a missing frontier and a
    /// resolution error for a node without a location.
    pub fn resolve(&mut self, frontier: Option<&[Coordinate]>) -> Result<Vec<Artifact>> {
        let frontier = frontier.ok_or_else(|| argument::missing_parameter("frontier"))?;
        let mut collected = Vec::new();
        for coordinate in frontier {
            self.visit(coordinate, &mut collected)?;
        }
        Ok(collected)
    }

    fn visit(&mut self, coordinate: &Coordinate, collected: &mut Vec<Artifact>) -> Result<()> {
        if !self.visited.insert(coordinate.clone()) {
            return Ok(());
        }
        debug!(resource = %coordinate, "Visiting resource");
        collected.push(resolve_artifact(
            self.provider,
            &BundleDependency::new(coordinate.clone()),
        )?);

        let edges: Vec<Coordinate> = self
            .provider
            .resolve_transitive(coordinate, ScopeFilter::All)?
            .unwrap_or_default()
            .into_iter()
            .map(|dependency| dependency.coordinate)
            .collect();
        for edge in &edges {
            self.visit(edge, collected)?;
        }
        Ok(())
    }
}
