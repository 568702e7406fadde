//! Plugin state errors

use super::ModelError;

/// Creates an error for additional dependencies declared on an unresolved plugin
pub fn not_present(plugin: impl Into<String>) -> ModelError {
    ModelError::PluginNotPresent {
        plugin: plugin.into(),
    }
}

/// Creates an error for a plugin whose classloader model was not computed yet
pub fn model_missing(plugin: impl Into<String>) -> ModelError {
    ModelError::ClassLoaderModelMissing {
        plugin: plugin.into(),
    }
}

