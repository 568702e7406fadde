//! Packaging kinds and their project rules
//!
//! Applications, domains, domain bundles and policies share one resolution
//! engine but disagree on which domain references and shared libraries are
//! legal. [`validate_packaging`] dispatches to the rule set of each kind.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::common::string_utils::{is_blank, join_display};
use crate::domain::{Artifact, Coordinate, Scope};
use crate::error::{ModelError, Result, argument, validation};

/// Kind of deployable being packaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackagingKind {
    #[default]
    Application,
    Domain,
    DomainBundle,
    Policy,
}

impl PackagingKind {
    /// Packaging type name used in build descriptors
    pub fn packaging_type(self) -> &'static str {
        match self {
            PackagingKind::Application => "mule-application",
            PackagingKind::Domain => "mule-domain",
            PackagingKind::DomainBundle => "mule-domain-bundle",
            PackagingKind::Policy => "mule-policy",
        }
    }
}

impl fmt::Display for PackagingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.packaging_type())
    }
}

impl FromStr for PackagingKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().trim_start_matches("mule-") {
            "application" => Ok(PackagingKind::Application),
            "domain" => Ok(PackagingKind::Domain),
            "domain-bundle" => Ok(PackagingKind::DomainBundle),
            "policy" => Ok(PackagingKind::Policy),
            other => Err(argument::invalid(format!("Unknown packaging '{other}'"))),
        }
    }
}

/// Project being packaged
#[derive(Debug, Clone)]
pub struct ProjectInformation {
    pub coordinates: Coordinate,
    pub packaging: PackagingKind,
    pub build_directory: PathBuf,
}

impl ProjectInformation {
    /// Validate the project description once
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if the build directory is empty.
    pub fn new(
        coordinates: Coordinate,
        packaging: PackagingKind,
        build_directory: impl Into<PathBuf>,
    ) -> Result<Self> {
        let build_directory = build_directory.into();
        if is_blank(&build_directory.to_string_lossy()) {
            return Err(argument::blank_field("buildDirectory"));
        }
        Ok(Self {
            coordinates,
            packaging,
            build_directory,
        })
    }
}

/// A dependency promoted to be visible to the whole deployable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLibrary {
    pub group_id: String,
    pub artifact_id: String,
}

impl SharedLibrary {
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.group_id == coordinate.group_id() && self.artifact_id == coordinate.artifact_id()
    }
}

impl fmt::Display for SharedLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// What the packaging rules look at
#[derive(Debug, Clone, Copy)]
pub struct PackagingFacts<'a> {
    pub domains: &'a [Artifact],
    pub shared_libraries: &'a [SharedLibrary],
    /// Dependencies the project declares itself; shared libraries must be among them
    pub direct_dependencies: &'a [Artifact],
}

/// Check the rules of `kind` against the resolved project
///
/// # Errors
///
/// Returns a validation error for domain cardinality or scope violations
/// and for shared libraries with no matching dependency.
pub fn validate_packaging(kind: PackagingKind, facts: &PackagingFacts<'_>) -> Result<()> {
    match kind {
        PackagingKind::Application => {
            validate_application_domain(facts.domains)?;
            validate_shared_libraries(facts)
        }
        PackagingKind::Domain => {
            if !facts.domains.is_empty() {
                return Err(validation::domain(format!(
                    "A domain cannot reference another domain, found: {}",
                    domain_names(facts.domains)
                )));
            }
            validate_shared_libraries(facts)
        }
        PackagingKind::DomainBundle => {
            if facts.domains.len() != 1 {
                return Err(validation::domain(format!(
                    "A domain bundle must reference exactly one domain, found {}",
                    facts.domains.len()
                )));
            }
            Ok(())
        }
        PackagingKind::Policy => {
            if !facts.domains.is_empty() {
                return Err(validation::domain(format!(
                    "A policy cannot reference a domain, found: {}",
                    domain_names(facts.domains)
                )));
            }
            if !facts.shared_libraries.is_empty() {
                return Err(validation::failed(format!(
                    "Policies cannot declare shared libraries: {}",
                    join_display(facts.shared_libraries)
                )));
            }
            Ok(())
        }
    }
}

fn domain_names(domains: &[Artifact]) -> String {
    join_display(domains.iter().map(Artifact::coordinates))
}

fn validate_application_domain(domains: &[Artifact]) -> Result<()> {
    match domains {
        [] => Ok(()),
        [domain] => {
            let coordinates = domain.coordinates();
            if coordinates.scope() == Some(Scope::Provided) {
                Ok(())
            } else {
                Err(validation::domain(format!(
                    "Domain {coordinates} must be declared with provided scope"
                )))
            }
        }
        _ => Err(validation::domain(format!(
            "An application can reference at most one domain, found: {}",
            domain_names(domains)
        ))),
    }
}

fn validate_shared_libraries(facts: &PackagingFacts<'_>) -> Result<()> {
    for library in facts.shared_libraries {
        let present = facts
            .direct_dependencies
            .iter()
            .any(|dependency| library.matches(dependency.coordinates()));
        if !present {
            return Err(validation::shared_library_not_found(library.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn domain(artifact_id: &str, scope: Scope) -> Artifact {
        Artifact::new(
            Coordinate::new("org.test", artifact_id, "1.0.0")
                .unwrap()
                .with_classifier("mule-domain")
                .with_scope(scope),
            "/repo/domain.jar",
        )
    }

    fn dependency(artifact_id: &str) -> Artifact {
        Artifact::new(
            Coordinate::new("org.test", artifact_id, "1.0.0").unwrap(),
            "/repo/lib.jar",
        )
    }

    fn library(artifact_id: &str) -> SharedLibrary {
        SharedLibrary {
            group_id: "org.test".to_string(),
            artifact_id: artifact_id.to_string(),
        }
    }

    fn facts<'a>(
        domains: &'a [Artifact],
        shared_libraries: &'a [SharedLibrary],
        dependencies: &'a [Artifact],
    ) -> PackagingFacts<'a> {
        PackagingFacts {
            domains,
            shared_libraries,
            direct_dependencies: dependencies,
        }
    }

    #[test]
    fn test_application_single_provided_domain() {
        let domains = [domain("domain", Scope::Provided)];
        let result = validate_packaging(PackagingKind::Application, &facts(&domains, &[], &[]));
        assert!(result.is_ok());
    }

    #[test]
    fn test_application_domain_must_be_provided() {
        let domains = [domain("domain", Scope::Compile)];
        let err =
            validate_packaging(PackagingKind::Application, &facts(&domains, &[], &[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("provided scope"));
    }

    #[test]
    fn test_application_rejects_two_domains() {
        let domains = [
            domain("one", Scope::Provided),
            domain("two", Scope::Provided),
        ];
        let err =
            validate_packaging(PackagingKind::Application, &facts(&domains, &[], &[])).unwrap_err();
        assert!(err.to_string().contains("at most one domain"));
    }

    #[test]
    fn test_missing_shared_library() {
        let libraries = [library("driver")];
        let dependencies = [dependency("other")];
        let err = validate_packaging(
            PackagingKind::Application,
            &facts(&[], &libraries, &dependencies),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::SharedLibraryNotFound { .. }));
        assert!(err.to_string().contains("org.test:driver"));
    }

    #[test]
    fn test_present_shared_library() {
        let libraries = [library("driver")];
        let dependencies = [dependency("driver")];
        assert!(
            validate_packaging(
                PackagingKind::Application,
                &facts(&[], &libraries, &dependencies)
            )
            .is_ok()
        );
    }

    #[test]
    fn test_domain_cannot_reference_domain() {
        let domains = [domain("other", Scope::Provided)];
        assert!(validate_packaging(PackagingKind::Domain, &facts(&domains, &[], &[])).is_err());
        assert!(validate_packaging(PackagingKind::Domain, &facts(&[], &[], &[])).is_ok());
    }

    #[test]
    fn test_domain_bundle_needs_exactly_one_domain() {
        let domains = [domain("domain", Scope::Provided)];
        assert!(
            validate_packaging(PackagingKind::DomainBundle, &facts(&domains, &[], &[])).is_ok()
        );
        let err =
            validate_packaging(PackagingKind::DomainBundle, &facts(&[], &[], &[])).unwrap_err();
        assert!(err.to_string().contains("exactly one domain"));
    }

    #[test]
    fn test_policy_rules() {
        let libraries = [library("driver")];
        let dependencies = [dependency("driver")];
        assert!(
            validate_packaging(
                PackagingKind::Policy,
                &facts(&[], &libraries, &dependencies)
            )
            .is_err()
        );
        assert!(validate_packaging(PackagingKind::Policy, &facts(&[], &[], &dependencies)).is_ok());
    }

    #[test]
    fn test_packaging_kind_from_str() {
        assert_eq!(
            "mule-domain-bundle".parse::<PackagingKind>().unwrap(),
            PackagingKind::DomainBundle
        );
        assert_eq!(
            "application".parse::<PackagingKind>().unwrap(),
            PackagingKind::Application
        );
        assert!("war".parse::<PackagingKind>().is_err());
    }

    #[test]
    fn test_project_information_requires_build_directory() {
        let coordinates = Coordinate::new("org.test", "app", "1.0.0").unwrap();
        assert!(ProjectInformation::new(coordinates.clone(), PackagingKind::Application, "").is_err());
        assert!(
            ProjectInformation::new(coordinates, PackagingKind::Application, "target").is_ok()
        );
    }
}
