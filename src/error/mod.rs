//! Error types and handling for classloader model resolution
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`argument`]: Malformed identity fields and missing parameters
//! - [`plugin`]: Plugins referenced but not resolved or not yet modeled
//! - [`validation`]: Plugin set, domain and shared library rule violations
//! - [`resolution`]: Dependency provider lookups
//! - [`config`]: Build descriptor and settings errors
//! - [`fs`]: File system errors

pub mod argument;
pub mod config;
pub mod fs;
pub mod plugin;
pub mod resolution;
pub mod validation;

use miette::Diagnostic;
use thiserror::Error;

/// Broad classification of a [`ModelError`]
///
/// The first three kinds are raised by the resolution engine itself, the
/// remaining ones by the surrounding file and configuration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or blank identity fields, missing parameters or config values
    InvalidArgument,
    /// A plugin was referenced before it was resolved or modeled
    IllegalState,
    /// The resolved artifact set breaks a packaging rule
    Validation,
    /// The dependency provider could not supply an artifact
    Resolution,
    /// Build descriptor or settings could not be loaded
    Config,
    /// Reading or writing files failed
    Io,
}

/// Main error type for classloader model operations
#[derive(Error, Diagnostic, Debug)]
pub enum ModelError {
    // Argument errors
    #[error("{field} cannot be null or blank")]
    #[diagnostic(code(classloader_model::argument::blank_field))]
    BlankField { field: String },

    #[error("Expecting child element with not null value {field}")]
    #[diagnostic(
        code(classloader_model::argument::missing_config_value),
        help("Every plugin and dependency entry needs a groupId and an artifactId")
    )]
    MissingConfigValue { field: String },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(classloader_model::argument::invalid))]
    InvalidArgument { message: String },

    // Plugin state errors
    #[error(
        "Declared additional dependencies for a plugin not present: {plugin}"
    )]
    #[diagnostic(
        code(classloader_model::plugin::not_present),
        help("Add the plugin as a dependency of the project or remove its additionalPluginDependencies entry")
    )]
    PluginNotPresent { plugin: String },

    #[error("Could not find ClassLoaderModel resolved for plugin: {plugin}")]
    #[diagnostic(code(classloader_model::plugin::model_missing))]
    ClassLoaderModelMissing { plugin: String },

    // Validation errors
    #[error("Incompatible versions of plugin {plugin} found: {versions}")]
    #[diagnostic(
        code(classloader_model::validation::incompatible_plugins),
        help("Align every dependency on this plugin to a single major version")
    )]
    IncompatiblePluginVersions { plugin: String, versions: String },

    #[error(
        "Found transitive mule plugins that are not declared as direct dependencies: {plugins}"
    )]
    #[diagnostic(
        code(classloader_model::validation::transitive_plugins),
        help("Declare these plugins as direct dependencies of the project")
    )]
    TransitivePlugins { plugins: String },

    #[error("Shared library {library} is missing required shared library dependency")]
    #[diagnostic(
        code(classloader_model::validation::shared_library),
        help("Every shared library must also be declared as a project dependency")
    )]
    SharedLibraryNotFound { library: String },

    #[error("Domain validation failed: {message}")]
    #[diagnostic(code(classloader_model::validation::domain))]
    DomainValidationFailed { message: String },

    #[error("Validation failed: {message}")]
    #[diagnostic(code(classloader_model::validation::failed))]
    ValidationFailed { message: String },

    // Resolution errors
    #[error("Artifact not found: {coordinate}")]
    #[diagnostic(
        code(classloader_model::resolution::not_found),
        help("Check that the dependency graph contains this artifact")
    )]
    ArtifactNotFound { coordinate: String },

    #[error("Could not resolve location of {coordinate}")]
    #[diagnostic(code(classloader_model::resolution::location))]
    LocationNotFound { coordinate: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(classloader_model::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(classloader_model::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(classloader_model::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(classloader_model::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(classloader_model::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(classloader_model::fs::io_error))]
    IoError { message: String },
}

impl ModelError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BlankField { .. }
            | Self::MissingConfigValue { .. }
            | Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::PluginNotPresent { .. }
            | Self::ClassLoaderModelMissing { .. } => ErrorKind::IllegalState,
            Self::IncompatiblePluginVersions { .. }
            | Self::TransitivePlugins { .. }
            | Self::SharedLibraryNotFound { .. }
            | Self::DomainValidationFailed { .. }
            | Self::ValidationFailed { .. } => ErrorKind::Validation,
            Self::ArtifactNotFound { .. } | Self::LocationNotFound { .. } => {
                ErrorKind::Resolution
            }
            Self::ConfigNotFound { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigInvalid { .. } => ErrorKind::Config,
            Self::FileReadFailed { .. } | Self::FileWriteFailed { .. } | Self::IoError { .. } => {
                ErrorKind::Io
            }
        }
    }
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ModelError {
    fn from(err: serde_yaml::Error) -> Self {
        ModelError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    macro_rules! test_error_kind {
        ($test_name:ident, $err:expr, $kind:expr) => {
            #[test]
            fn $test_name() {
                assert_eq!($err.kind(), $kind);
            }
        };
    }

    #[test]
    fn test_error_display() {
        let err = ModelError::BlankField {
            field: "groupId".to_string(),
        };
        assert_eq!(err.to_string(), "groupId cannot be null or blank");
    }

    #[test]
    fn test_error_code() {
        let err = ModelError::PluginNotPresent {
            plugin: "org.mule:plugin".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("classloader_model::plugin::not_present".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ModelError = io_err.into();
        assert!(matches!(err, ModelError::IoError { .. }));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: ModelError = parse_result.unwrap_err().into();
        assert!(matches!(err, ModelError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid json content");
        let err: ModelError = parse_result.unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    test_error_contains!(
        test_missing_config_value_message,
        argument::missing_config_value("artifactId"),
        "Expecting child element with not null value artifactId"
    );

    test_error_contains!(
        test_plugin_not_present_message,
        plugin::not_present("org.mule.connectors:mule-db-connector"),
        "plugin not present",
        "mule-db-connector"
    );

    test_error_contains!(
        test_model_missing_message,
        plugin::model_missing("org.mule.connectors:mule-db-connector"),
        "ClassLoaderModel"
    );

    test_error_contains!(
        test_transitive_plugins_message,
        validation::transitive_plugins(&["g:a:1.0.0:jar:mule-plugin".to_string()]),
        "transitive mule plugins",
        "g:a:1.0.0"
    );

    test_error_contains!(
        test_incompatible_versions_message,
        validation::incompatible_plugins("g:a", &["1.0.0".to_string(), "2.0.0".to_string()]),
        "g:a",
        "1.0.0, 2.0.0"
    );

    test_error_kind!(
        test_blank_field_kind,
        argument::blank_field("version"),
        ErrorKind::InvalidArgument
    );

    test_error_kind!(
        test_missing_parameter_kind,
        argument::missing_parameter("definitive"),
        ErrorKind::InvalidArgument
    );

    test_error_kind!(
        test_plugin_not_present_kind,
        plugin::not_present("g:a"),
        ErrorKind::IllegalState
    );

    test_error_kind!(
        test_transitive_plugins_kind,
        validation::transitive_plugins(&[]),
        ErrorKind::Validation
    );

    test_error_kind!(
        test_shared_library_kind,
        validation::shared_library_not_found("org.foo:bar"),
        ErrorKind::Validation
    );

    test_error_kind!(
        test_artifact_not_found_kind,
        resolution::artifact_not_found("g:a:1.0.0:jar"),
        ErrorKind::Resolution
    );

    test_error_kind!(
        test_config_invalid_kind,
        config::invalid("bad"),
        ErrorKind::Config
    );

    test_error_kind!(
        test_write_failed_kind,
        fs::write_failed("/tmp/x", "disk full"),
        ErrorKind::Io
    );
}
