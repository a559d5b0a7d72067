//! Definition-time errors
//!
//! Raised while a field is being declared, never while a value is being
//! validated. Validation failures are data (`RuleOutcome`, `FieldOutcome`),
//! not errors.

use thiserror::Error;

/// Result type for field definition
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Errors raised when a rule or field is declared with bad parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("Unknown placeholder '{{{placeholder}}}' in message template '{template}'")]
    UnknownPlaceholder { placeholder: String, template: String },

    #[error("Placeholder '{{{placeholder}}}' in message template '{template}' has no value")]
    UnboundPlaceholder { placeholder: String, template: String },

    #[error("Default for a {kind} field must be a {kind}, got {found}")]
    DefaultTypeMismatch { kind: &'static str, found: &'static str },

    #[error("Invalid {bound}: {reason}")]
    InvalidBound { bound: &'static str, reason: String },

    #[error("{min_name} ({min}) is greater than {max_name} ({max})")]
    InvertedBounds {
        min_name: &'static str,
        min: String,
        max_name: &'static str,
        max: String,
    },
}
