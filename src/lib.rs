//! fieldguard - declarative, deterministic field validation
//!
//! A schema is an ordered set of named fields, each guarded by a
//! [`FieldValidator`] built from composable rules. Instances of a schema
//! are validated as a whole: every field is checked and every failure is
//! reported together.
//!
//! ```
//! use std::sync::Arc;
//! use fieldguard::field::{self, NumberOptions, StringOptions};
//! use fieldguard::model::{Instance, Schema};
//! use fieldguard::value::Value;
//!
//! let name = field::string(StringOptions {
//!     max_length: Some(5),
//!     ..Default::default()
//! })
//! .unwrap();
//! let gpa = field::number(NumberOptions {
//!     max_value: Some(4.0),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let schema = Schema::builder("student")
//!     .field("name", name)
//!     .field("gpa", gpa)
//!     .build()
//!     .unwrap();
//!
//! let values = vec![("name", Value::from("Smith")), ("gpa", Value::from(3.2))];
//! let mut student = Instance::new(Arc::new(schema), values);
//! assert!(student.validate().is_ok());
//! ```

pub mod cli;
pub mod field;
pub mod model;
pub mod observability;
pub mod rule;
pub mod schema;
pub mod value;

pub use field::{FieldOutcome, FieldValidator};
pub use model::{Instance, ModelValidationError, Record, Schema};
pub use rule::{DefinitionError, Kind, Rule, RuleOutcome};
pub use value::{Callable, Value};
