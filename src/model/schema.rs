//! Schemas: ordered field name → validator mappings
//!
//! A schema is built once per model shape and shared, read-only, by every
//! instance of that shape. Field validators are held behind `Arc` so the
//! same validator can back several schemas without copying.

use std::collections::HashSet;
use std::sync::Arc;

use super::errors::{FieldErrors, ModelError, ModelResult};
use super::instance::Instance;
use crate::field::FieldValidator;
use crate::value::Value;

/// Result of a full, non-failing scan of an instance
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Messages of every failing field, in schema order
    pub field_errors: FieldErrors,
    /// Resolved values of every passing field, in schema order
    pub resolved_values: Vec<(String, Value)>,
}

impl ValidationOutcome {
    /// True iff no field failed
    pub fn passed(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn resolved(&self, field: &str) -> Option<&Value> {
        self.resolved_values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }
}

/// Ordered, immutable set of named field validators.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<(String, Arc<FieldValidator>)>,
}

impl Schema {
    /// Starts declaring a schema named `name`.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field validator for `field`
    pub fn field(&self, field: &str) -> Option<&Arc<FieldValidator>> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, validator)| validator)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.field(field).is_some()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValidator)> {
        self.fields
            .iter()
            .map(|(name, validator)| (name.as_str(), validator.as_ref()))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Runs every field validator against `instance`.
    ///
    /// Never stops at the first failure. Missing values are evaluated as
    /// `Null`.
    pub fn evaluate(&self, instance: &Instance) -> ValidationOutcome {
        self.evaluate_with(|field| instance.get(field))
    }

    /// Same scan as [`Schema::evaluate`], reading values through `lookup`.
    pub fn evaluate_with<'v, F>(&self, lookup: F) -> ValidationOutcome
    where
        F: Fn(&str) -> Option<&'v Value>,
    {
        let mut field_errors = FieldErrors::new();
        let mut resolved_values = Vec::with_capacity(self.fields.len());
        let absent = Value::Null;

        for (name, validator) in &self.fields {
            let value = lookup(name).unwrap_or(&absent);
            let outcome = validator.evaluate(value);
            match outcome.resolved {
                Some(resolved) if outcome.passed => resolved_values.push((name.clone(), resolved)),
                _ => field_errors.insert(name.clone(), outcome.messages.into_iter().collect()),
            }
        }

        ValidationOutcome {
            field_errors,
            resolved_values,
        }
    }
}

/// Declares a schema field by field.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<(String, Arc<FieldValidator>)>,
}

impl SchemaBuilder {
    /// Adds a field. Order of calls is schema order.
    pub fn field(mut self, name: impl Into<String>, validator: FieldValidator) -> Self {
        self.fields.push((name.into(), Arc::new(validator)));
        self
    }

    /// Adds a field backed by an already shared validator.
    pub fn shared_field(mut self, name: impl Into<String>, validator: Arc<FieldValidator>) -> Self {
        self.fields.push((name.into(), validator));
        self
    }

    /// Finishes the schema. Field names must be unique.
    pub fn build(self) -> ModelResult<Schema> {
        let mut seen = HashSet::new();
        for (name, _) in &self.fields {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::DuplicateField(name.clone()));
            }
        }
        Ok(Schema {
            name: self.name,
            fields: self.fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{self, NumberOptions, StringOptions};
    use std::collections::HashMap;

    fn schema() -> Schema {
        Schema::builder("person")
            .field("name", field::string(StringOptions::default()).unwrap())
            .field(
                "age",
                field::number(NumberOptions {
                    min_value: Some(0.0),
                    ..Default::default()
                })
                .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let s = schema();
        let names: Vec<_> = s.field_names().collect();
        assert_eq!(names, vec!["name", "age"]);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Schema::builder("dup")
            .field("a", FieldValidator::new())
            .field("a", FieldValidator::new())
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateField("a".into()));
    }

    #[test]
    fn test_evaluate_with_reports_all_failures() {
        let values: HashMap<String, Value> =
            [("age".to_string(), Value::Int(-3))].into_iter().collect();
        let outcome = schema().evaluate_with(|f| values.get(f));
        assert!(!outcome.passed());
        assert_eq!(outcome.field_errors.len(), 2);
        assert!(outcome.field_errors.contains("name"));
        assert!(outcome.field_errors.contains("age"));
        assert!(outcome.resolved_values.is_empty());
    }

    #[test]
    fn test_evaluate_with_resolves_values() {
        let values: HashMap<String, Value> = [
            ("name".to_string(), Value::from("Ada")),
            ("age".to_string(), Value::Int(36)),
        ]
        .into_iter()
        .collect();
        let outcome = schema().evaluate_with(|f| values.get(f));
        assert!(outcome.passed());
        assert_eq!(outcome.resolved("age"), Some(&Value::Int(36)));
    }

    #[test]
    fn test_shared_validator_backs_two_schemas() {
        let shared = Arc::new(field::string(StringOptions::default()).unwrap());
        let a = Schema::builder("a").shared_field("x", shared.clone()).build().unwrap();
        let b = Schema::builder("b").shared_field("y", shared.clone()).build().unwrap();
        assert!(Arc::ptr_eq(a.field("x").unwrap(), b.field("y").unwrap()));
        assert_eq!(Arc::strong_count(&shared), 3);
    }
}
