//! Instances: raw values supplied for one object of a schema
//!
//! # State machine
//!
//! ```text
//! Constructed --validate()--> Valid | Invalid
//! Valid/Invalid --set()--> Constructed
//! ```
//!
//! `build()` is only allowed in `Valid`. It emits the values resolved by
//! the last successful validation (defaults included), never the raw input.

use std::collections::HashMap;
use std::sync::Arc;

use super::errors::{ModelError, ModelResult, ModelValidationError};
use super::record::Record;
use super::schema::{Schema, ValidationOutcome};
use crate::value::Value;

/// Validation state of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    /// Not validated since construction or the last assignment
    Constructed,
    /// Last validation passed
    Valid,
    /// Last validation failed
    Invalid,
}

/// Raw values for one object, bound to a shared schema.
#[derive(Debug, Clone)]
pub struct Instance {
    schema: Arc<Schema>,
    values: HashMap<String, Value>,
    resolved: Vec<(String, Value)>,
    state: InstanceState,
}

impl Instance {
    /// Creates an instance from initial values.
    ///
    /// Keys the schema does not declare are ignored.
    pub fn new<I, K, V>(schema: Arc<Schema>, initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let values = initial
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| schema.contains(k))
            .collect();

        Self {
            schema,
            values,
            resolved: Vec::new(),
            state: InstanceState::Constructed,
        }
    }

    /// Creates an instance with no values.
    pub fn empty(schema: Arc<Schema>) -> Self {
        Self::new(schema, std::iter::empty::<(String, Value)>())
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    /// Raw value stored for `field`, if any
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Assigns a raw value to a declared field.
    ///
    /// Resets the instance to `Constructed`.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> ModelResult<()> {
        if !self.schema.contains(field) {
            return Err(ModelError::UnknownField(
                field.to_string(),
                self.schema.name().to_string(),
            ));
        }
        self.values.insert(field.to_string(), value.into());
        self.resolved.clear();
        self.state = InstanceState::Constructed;
        Ok(())
    }

    /// Scans every field without failing.
    pub fn evaluate(&self) -> ValidationOutcome {
        self.schema.evaluate(self)
    }

    /// Validates every field, then fails once with all field errors.
    ///
    /// Returns `self` on success so calls can be chained into `build()`.
    pub fn validate(&mut self) -> Result<&Self, ModelValidationError> {
        let outcome = self.evaluate();
        if outcome.passed() {
            self.resolved = outcome.resolved_values;
            self.state = InstanceState::Valid;
            Ok(&*self)
        } else {
            self.resolved.clear();
            self.state = InstanceState::Invalid;
            Err(ModelValidationError::new(
                self.schema.name(),
                outcome.field_errors,
            ))
        }
    }

    /// Materializes the resolved values into a plain record.
    ///
    /// Requires a successful `validate()` since the last assignment.
    /// Callable values are left out of the record.
    pub fn build(&self) -> ModelResult<Record> {
        if self.state != InstanceState::Valid {
            return Err(ModelError::NotValidated(self.schema.name().to_string()));
        }
        let entries = self
            .resolved
            .iter()
            .filter(|(_, value)| !value.is_callable())
            .cloned()
            .collect();
        Ok(Record::from_entries(entries))
    }
}
