//! Observable events
//!
//! Events are explicit and typed. The validation core never logs; these
//! are emitted by the command layer around it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Schema documents loaded
    SchemasLoaded,
    /// Schema load failed (FATAL)
    SchemaLoadFailed,
    /// An instance is about to be validated
    ValidationBegin,
    /// Instance passed validation
    ValidationPassed,
    /// Instance failed validation
    ValidationFailed,
    /// One field failed (trace detail of `ValidationFailed`)
    FieldRejected,
    /// Input line could not be turned into an instance
    InputRejected,
    /// Record materialized from a valid instance
    RecordBuilt,
    /// Command finished
    CommandComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::SchemaLoadFailed => "SCHEMA_LOAD_FAILED",
            Event::ValidationBegin => "VALIDATION_BEGIN",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::FieldRejected => "FIELD_REJECTED",
            Event::InputRejected => "INPUT_REJECTED",
            Event::RecordBuilt => "RECORD_BUILT",
            Event::CommandComplete => "COMMAND_COMPLETE",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::SchemaLoadFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
