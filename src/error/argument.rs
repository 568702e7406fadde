//! Argument errors

use super::ModelError;

/// Creates an error for a required identity field that is blank
pub fn blank_field(field: impl Into<String>) -> ModelError {
    ModelError::BlankField {
        field: field.into(),
    }
}

/// Creates an error for a configuration element missing a required value
pub fn missing_config_value(field: impl Into<String>) -> ModelError {
    ModelError::MissingConfigValue {
        field: field.into(),
    }
}

/// Creates an error for a required parameter that was not supplied
pub fn missing_parameter(name: &str) -> ModelError {
    ModelError::InvalidArgument {
        message: format!("{name} cannot be null"),
    }
}

/// Creates a generic invalid argument error
pub fn invalid(message: impl Into<String>) -> ModelError {
    ModelError::InvalidArgument {
        message: message.into(),
    }
}
