//! Schema document error types
//!
//! Error codes:
//! - FG_SCHEMA_MALFORMED (FATAL): schema file unreadable or not valid JSON
//! - FG_SCHEMA_DEFINITION (REJECT): a field declaration is invalid
//! - FG_SCHEMA_DUPLICATE (REJECT): a schema name is registered twice
//! - FG_SCHEMA_UNKNOWN (REJECT): no schema with the requested name
//! - FG_INSTANCE_MALFORMED (REJECT): instance JSON cannot be converted

use std::fmt;

use crate::model::ModelError;
use crate::rule::DefinitionError;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, process continues
    Reject,
    /// Startup cannot continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema file unreadable or not valid JSON
    FgSchemaMalformed,
    /// Field declaration rejected by a kind factory
    FgSchemaDefinition,
    /// Schema name already registered
    FgSchemaDuplicate,
    /// Schema name not found
    FgSchemaUnknown,
    /// Instance document cannot be converted to values
    FgInstanceMalformed,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::FgSchemaMalformed => "FG_SCHEMA_MALFORMED",
            SchemaErrorCode::FgSchemaDefinition => "FG_SCHEMA_DEFINITION",
            SchemaErrorCode::FgSchemaDuplicate => "FG_SCHEMA_DUPLICATE",
            SchemaErrorCode::FgSchemaUnknown => "FG_SCHEMA_UNKNOWN",
            SchemaErrorCode::FgInstanceMalformed => "FG_INSTANCE_MALFORMED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::FgSchemaMalformed => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    schema: Option<String>,
    field: Option<String>,
}

impl SchemaError {
    /// Schema file could not be read or parsed
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::FgSchemaMalformed,
            message: format!("Malformed schema file '{}': {}", path.into(), reason.into()),
            schema: None,
            field: None,
        }
    }

    /// A field declaration was rejected
    pub fn definition(
        schema: impl Into<String>,
        field: impl Into<String>,
        err: DefinitionError,
    ) -> Self {
        let schema = schema.into();
        let field = field.into();
        Self {
            code: SchemaErrorCode::FgSchemaDefinition,
            message: format!("Field '{}' of schema '{}': {}", field, schema, err),
            schema: Some(schema),
            field: Some(field),
        }
    }

    /// The schema itself was rejected by the model layer
    pub fn model(schema: impl Into<String>, err: ModelError) -> Self {
        let schema = schema.into();
        let field = match &err {
            ModelError::DuplicateField(name) | ModelError::UnknownField(name, _) => {
                Some(name.clone())
            }
            ModelError::NotValidated(_) => None,
        };
        Self {
            code: SchemaErrorCode::FgSchemaDefinition,
            message: format!("Schema '{}': {}", schema, err),
            schema: Some(schema),
            field,
        }
    }

    /// A schema with this name is already registered
    pub fn duplicate(schema: impl Into<String>) -> Self {
        let schema = schema.into();
        Self {
            code: SchemaErrorCode::FgSchemaDuplicate,
            message: format!("Schema '{}' is already registered", schema),
            schema: Some(schema),
            field: None,
        }
    }

    /// No schema with this name
    pub fn unknown(schema: impl Into<String>) -> Self {
        let schema = schema.into();
        Self {
            code: SchemaErrorCode::FgSchemaUnknown,
            message: format!("Schema '{}' not found", schema),
            schema: Some(schema),
            field: None,
        }
    }

    /// Instance document could not be converted
    pub fn instance_malformed(
        schema: impl Into<String>,
        field: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        let schema = schema.into();
        let message = match &field {
            Some(field) => format!(
                "Instance of '{}', field '{}': {}",
                schema,
                field,
                reason.into()
            ),
            None => format!("Instance of '{}': {}", schema, reason.into()),
        };
        Self {
            code: SchemaErrorCode::FgInstanceMalformed,
            message,
            schema: Some(schema),
            field,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the schema name if applicable
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Returns the field name if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::FgSchemaMalformed.code(), "FG_SCHEMA_MALFORMED");
        assert_eq!(SchemaErrorCode::FgSchemaDefinition.code(), "FG_SCHEMA_DEFINITION");
        assert_eq!(SchemaErrorCode::FgSchemaDuplicate.code(), "FG_SCHEMA_DUPLICATE");
        assert_eq!(SchemaErrorCode::FgSchemaUnknown.code(), "FG_SCHEMA_UNKNOWN");
        assert_eq!(SchemaErrorCode::FgInstanceMalformed.code(), "FG_INSTANCE_MALFORMED");
    }

    #[test]
    fn test_severity_levels() {
        assert!(SchemaError::malformed("a.json", "bad").is_fatal());
        assert!(!SchemaError::unknown("users").is_fatal());
    }

    #[test]
    fn test_definition_error_carries_field() {
        let err = SchemaError::definition(
            "users",
            "age",
            DefinitionError::DefaultTypeMismatch {
                kind: "number",
                found: "string",
            },
        );
        assert_eq!(err.field(), Some("age"));
        assert_eq!(err.schema(), Some("users"));
        let display = err.to_string();
        assert!(display.starts_with("[REJECT] FG_SCHEMA_DEFINITION"));
        assert!(display.contains("Default for a number field must be a number"));
    }
}
