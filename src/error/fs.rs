//! File system errors

use super::ModelError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> ModelError {
    ModelError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> ModelError {
    ModelError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
