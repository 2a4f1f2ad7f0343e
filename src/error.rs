//! Error types for the SIGMA modifier pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModifierError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModifierError {
    /// The value variant is not accepted by the modifier's declared input shape.
    #[error("Modifier '{modifier}' incompatible to value type of '{value}'")]
    TypeMismatch { modifier: String, value: String },

    /// The value has the right type but its content cannot be processed.
    #[error("Modifier '{modifier}' rejected value: {reason}")]
    ValueConstraint { modifier: String, reason: String },

    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },

    #[error("Unknown modifier: {0}")]
    UnknownModifier(String),

    #[error("Too many values: {actual} exceeds limit of {limit}")]
    TooManyValues { limit: usize, actual: usize },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ModifierError {
    pub(crate) fn type_mismatch(modifier: &str, value: impl ToString) -> Self {
        ModifierError::TypeMismatch {
            modifier: modifier.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn value_constraint(modifier: &str, reason: impl Into<String>) -> Self {
        ModifierError::ValueConstraint {
            modifier: modifier.to_string(),
            reason: reason.into(),
        }
    }

    /// Identifier of the modifier that raised the error, if any.
    pub fn modifier(&self) -> Option<&str> {
        match self {
            ModifierError::TypeMismatch { modifier, .. }
            | ModifierError::ValueConstraint { modifier, .. } => Some(modifier),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for ModifierError {
    fn from(err: serde_yaml::Error) -> Self {
        ModifierError::Config(err.to_string())
    }
}

impl From<std::io::Error> for ModifierError {
    fn from(err: std::io::Error) -> Self {
        ModifierError::Config(err.to_string())
    }
}
