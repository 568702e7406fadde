//! Validation errors

use super::ModelError;

/// Creates an error listing the conflicting versions of one plugin identity
pub fn incompatible_plugins(plugin: impl Into<String>, versions: &[String]) -> ModelError {
    ModelError::IncompatiblePluginVersions {
        plugin: plugin.into(),
        versions: versions.join(", "),
    }
}

/// Creates an error naming plugins reachable only through another plugin
pub fn transitive_plugins(plugins: &[String]) -> ModelError {
    ModelError::TransitivePlugins {
        plugins: plugins.join(", "),
    }
}

/// Creates an error for a shared library with no matching dependency
pub fn shared_library_not_found(library: impl Into<String>) -> ModelError {
    ModelError::SharedLibraryNotFound {
        library: library.into(),
    }
}

/// Creates a domain cardinality or scope error
pub fn domain(message: impl Into<String>) -> ModelError {
    ModelError::DomainValidationFailed {
        message: message.into(),
    }
}

/// Creates a generic validation error
pub fn failed(message: impl Into<String>) -> ModelError {
    ModelError::ValidationFailed {
        message: message.into(),
    }
}
