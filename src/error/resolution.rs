//! Dependency provider errors

use super::ModelError;

/// Creates an artifact not found error
pub fn artifact_not_found(coordinate: impl Into<String>) -> ModelError {
    ModelError::ArtifactNotFound {
        coordinate: coordinate.into(),
    }
}

/// Creates an error for an artifact whose location could not be resolved
pub fn location_not_found(coordinate: impl Into<String>) -> ModelError {
    ModelError::LocationNotFound {
        coordinate: coordinate.into(),
    }
}
