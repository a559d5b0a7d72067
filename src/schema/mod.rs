//! Declarative schema documents
//!
//! Schemas can be declared in code (`model::Schema::builder`) or as JSON
//! documents loaded from a directory. Documents are converted through the
//! same kind factories, so both routes produce identical validators.

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use loader::{LoadedSchema, SchemaLoader};
pub use types::{FieldDocument, FieldSpec, SchemaDocument};
