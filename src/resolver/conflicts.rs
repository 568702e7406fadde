//! Plugin version conflict resolution
//!
//! Two plugin entries belong to the same version family when group id,
//! artifact id and major version all match. Within a family the entry from
//! the definitive list always replaces the one being resolved, whether it
//! is newer or older.

use tracing::debug;

use crate::domain::{Artifact, Coordinate};
use crate::error::{Result, argument};
use crate::resolver::provider::BundleDependency;

/// Anything identified by a [`Coordinate`]
pub trait HasCoordinate {
    fn coordinate(&self) -> &Coordinate;
}

impl HasCoordinate for Coordinate {
    fn coordinate(&self) -> &Coordinate {
        self
    }
}

impl HasCoordinate for Artifact {
    fn coordinate(&self) -> &Coordinate {
        self.coordinates()
    }
}

impl HasCoordinate for BundleDependency {
    fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }
}

/// Whether `a` and `b` are the same plugin within one major version
///
/// Versions without a numeric major only match themselves.
pub fn has_same_artifact_id_and_major(a: &Coordinate, b: &Coordinate) -> bool {
    if !a.same_ga(b) {
        return false;
    }
    match (a.major(), b.major()) {
        (Some(left), Some(right)) => left == right,
        _ => a.version() == b.version(),
    }
}

/// Substitute entries of `to_resolve` by their definitive counterparts
///
/// The output has exactly one entry per entry of `to_resolve`, in order.
///
/// # Errors
///
/// Returns an `InvalidArgument` error if either list is missing.
pub fn resolve_conflicts<T>(to_resolve: Option<&[T]>, definitive: Option<&[T]>) -> Result<Vec<T>>
where
    T: HasCoordinate + Clone,
{
    let to_resolve = to_resolve.ok_or_else(|| argument::missing_parameter("toResolve"))?;
    let definitive = definitive.ok_or_else(|| argument::missing_parameter("definitive"))?;

    Ok(to_resolve
        .iter()
        .map(|entry| {
            let candidate = definitive.iter().find(|winner| {
                has_same_artifact_id_and_major(entry.coordinate(), winner.coordinate())
            });
            match candidate {
                Some(winner) => {
                    if winner.coordinate() != entry.coordinate() {
                        debug!(
                            replaced = %entry.coordinate(),
                            by = %winner.coordinate(),
                            "Resolved plugin version conflict"
                        );
                    }
                    winner.clone()
                }
                None => entry.clone(),
            }
        })
        .collect())
}
