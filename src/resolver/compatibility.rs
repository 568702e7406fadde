//! Plugin set compatibility
//!
//! A deployable may load several versions of one plugin only when they all
//! share a major version.

use std::collections::HashSet;

use crate::domain::Coordinate;
use crate::error::{Result, validation};
use crate::resolver::conflicts::HasCoordinate;

/// Reject plugin sets holding incompatible majors of the same plugin
///
/// # Errors
///
/// Returns `ModelError::IncompatiblePluginVersions` for the first
/// `groupId:artifactId` whose distinct entries disagree on the major version.
pub fn validate_compatibility<T: HasCoordinate>(plugins: &[T]) -> Result<()> {
    for (ga, entries) in group_by_ga(plugins) {
        let Some(first) = entries.first() else {
            continue;
        };
        if entries.iter().any(|entry| entry.major() != first.major()) {
            let versions: Vec<String> = entries
                .iter()
                .map(|entry| entry.version().to_string())
                .collect();
            return Err(validation::incompatible_plugins(ga, &versions));
        }
    }
    Ok(())
}

/// Distinct coordinates grouped by `groupId:artifactId`, in first-seen order
fn group_by_ga<T: HasCoordinate>(plugins: &[T]) -> Vec<(String, Vec<&Coordinate>)> {
    let mut seen: HashSet<&Coordinate> = HashSet::new();
    let mut groups: Vec<(String, Vec<&Coordinate>)> = Vec::new();

    for coordinate in plugins.iter().map(HasCoordinate::coordinate) {
        if !seen.insert(coordinate) {
            continue;
        }
        let ga = coordinate.ga();
        match groups.iter_mut().find(|(key, _)| *key == ga) {
            Some((_, entries)) => entries.push(coordinate),
            None => groups.push((ga, vec![coordinate])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ModelError};
    use crate::test_fixtures::{plugin_version, versioned};

    #[test]
    fn test_different_majors_rejected() {
        let err = validate_compatibility(&[versioned("a", "1.0.0"), versioned("a", "2.0.0")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, ModelError::IncompatiblePluginVersions { .. }));
        let message = err.to_string();
        assert!(message.contains("org.test:a"));
        assert!(message.contains("1.0.0, 2.0.0"));
    }

    #[test]
    fn test_same_major_accepted() {
        assert!(validate_compatibility(&[versioned("a", "1.0.0"), versioned("a", "1.5.0")]).is_ok());
    }

    #[test]
    fn test_duplicates_and_distinct_plugins_accepted() {
        assert!(
            validate_compatibility(&[
                plugin_version("a", "1.0.0"),
                plugin_version("a", "1.0.0"),
                plugin_version("b", "3.0.0"),
            ])
            .is_ok()
        );
        assert!(validate_compatibility::<Coordinate>(&[]).is_ok());
    }
}
