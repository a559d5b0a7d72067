//! Model aggregation: schemas, instances and whole-object validation
//!
//! Validation is a full scan. Every declared field is evaluated, failures
//! are collected per field, and a single `ModelValidationError` carrying
//! all of them is returned at the end. Nothing fails fast.

mod errors;
mod instance;
mod record;
mod schema;

pub use errors::{FieldErrors, ModelError, ModelResult, ModelValidationError};
pub use instance::{Instance, InstanceState};
pub use record::Record;
pub use schema::{Schema, SchemaBuilder, ValidationOutcome};
