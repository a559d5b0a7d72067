//! Model-level error types
//!
//! Error codes:
//! - FG_MODEL_VALIDATION_FAILED: one or more fields failed; carries every failure
//! - FG_MODEL_DUPLICATE_FIELD: a schema declares the same field twice
//! - FG_MODEL_UNKNOWN_FIELD: assignment to a field the schema does not declare
//! - FG_MODEL_NOT_VALIDATED: `build()` called before a successful `validate()`

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Structural model errors (schema declaration, assignment, state)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("FG_MODEL_DUPLICATE_FIELD: field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("FG_MODEL_UNKNOWN_FIELD: field '{0}' is not declared by schema '{1}'")]
    UnknownField(String, String),

    #[error(
        "FG_MODEL_NOT_VALIDATED: instance of '{0}' must pass validation before it can be built"
    )]
    NotValidated(String),
}

impl ModelError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::DuplicateField(_) => "FG_MODEL_DUPLICATE_FIELD",
            ModelError::UnknownField(..) => "FG_MODEL_UNKNOWN_FIELD",
            ModelError::NotValidated(_) => "FG_MODEL_NOT_VALIDATED",
        }
    }
}

/// Per-field failure messages, in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the messages of one failing field. Fields are recorded once;
    /// a second insert for the same field replaces the first.
    pub fn insert(&mut self, field: impl Into<String>, messages: Vec<String>) {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = messages,
            None => self.entries.push((field, messages)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, messages) in &self.entries {
            map.serialize_entry(name, messages)?;
        }
        map.end()
    }
}

/// Whole-instance validation failure.
///
/// Raised once, after every field has been checked. Carries the messages
/// of every failing field, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelValidationError {
    schema: String,
    errors: FieldErrors,
}

impl ModelValidationError {
    pub const CODE: &'static str = "FG_MODEL_VALIDATION_FAILED";

    pub fn new(schema: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            schema: schema.into(),
            errors,
        }
    }

    pub fn code(&self) -> &'static str {
        Self::CODE
    }

    /// Name of the schema the instance was validated against
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn into_field_errors(self) -> FieldErrors {
        self.errors
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ModelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} field(s) of '{}' failed validation",
            Self::CODE,
            self.errors.len(),
            self.schema
        )?;
        for (field, messages) in self.errors.iter() {
            write!(f, "; {}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ModelValidationError {}
