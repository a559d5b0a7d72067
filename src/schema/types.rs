//! Schema documents
//!
//! A schema can be declared in JSON instead of code:
//!
//! ```json
//! {
//!   "name": "student",
//!   "fields": [
//!     { "name": "name", "kind": "string", "max_length": 5 },
//!     { "name": "gpa", "kind": "number", "min_value": 0, "max_value": 4 },
//!     { "name": "enrolled", "kind": "date", "min_date": "2000-01-01" }
//!   ]
//! }
//! ```
//!
//! Each field document maps onto the matching kind factory. Dates in
//! documents are ISO-8601 strings.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::errors::{SchemaError, SchemaResult};
use crate::field::{
    self, BooleanOptions, DateOptions, FieldValidator, NumberOptions, StringOptions,
};
use crate::model::Schema;
use crate::rule::{DefinitionError, Kind};
use crate::value::Value;

/// Kind-specific parameters of a field document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldSpec {
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<JsonValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
        #[serde(default)]
        allow_empty: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        choices: Option<Vec<JsonValue>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        choices_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty_message: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<JsonValue>,
        #[serde(default)]
        allow_empty: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        choices: Option<Vec<JsonValue>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_value_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_value_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        choices_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty_message: Option<String>,
    },
    Boolean {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<JsonValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty_message: Option<String>,
    },
    Date {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
        #[serde(default)]
        allow_empty: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_date_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_date_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty_message: Option<String>,
    },
}

impl FieldSpec {
    pub fn kind(&self) -> Kind {
        match self {
            FieldSpec::String { .. } => Kind::String,
            FieldSpec::Number { .. } => Kind::Number,
            FieldSpec::Boolean { .. } => Kind::Boolean,
            FieldSpec::Date { .. } => Kind::Date,
        }
    }
}

/// One named field of a schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDocument {
    pub name: String,
    #[serde(flatten)]
    pub spec: FieldSpec,
}

impl FieldDocument {
    /// Builds the field validator through the matching kind factory.
    pub fn to_validator(&self) -> Result<FieldValidator, DefinitionError> {
        match self.spec.clone() {
            FieldSpec::String {
                message,
                default,
                min_length,
                max_length,
                allow_empty,
                choices,
                min_length_message,
                max_length_message,
                choices_message,
                empty_message,
            } => field::string(StringOptions {
                message,
                default: json_opt("default", default)?,
                min_length,
                max_length,
                allow_empty,
                choices: json_list(choices)?,
                min_length_message,
                max_length_message,
                choices_message,
                empty_message,
            }),
            FieldSpec::Number {
                message,
                default,
                allow_empty,
                min_value,
                max_value,
                choices,
                min_value_message,
                max_value_message,
                choices_message,
                empty_message,
            } => field::number(NumberOptions {
                message,
                default: json_opt("default", default)?,
                allow_empty,
                min_value,
                max_value,
                choices: json_list(choices)?,
                min_value_message,
                max_value_message,
                choices_message,
                empty_message,
            }),
            FieldSpec::Boolean {
                message,
                default,
                empty_message,
            } => field::boolean(BooleanOptions {
                message,
                default: json_opt("default", default)?,
                empty_message,
            }),
            FieldSpec::Date {
                message,
                default,
                allow_empty,
                min_date,
                max_date,
                min_date_message,
                max_date_message,
                empty_message,
            } => field::date(DateOptions {
                message,
                default: temporal_opt("default", default)?,
                allow_empty,
                min_date: temporal_opt("min_date", min_date)?,
                max_date: temporal_opt("max_date", max_date)?,
                min_date_message,
                max_date_message,
                empty_message,
            }),
        }
    }
}

/// A complete schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Unique schema name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in declaration order
    pub fields: Vec<FieldDocument>,
}

impl SchemaDocument {
    /// Kind of the named field
    pub fn kind_of(&self, field: &str) -> Option<Kind> {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.spec.kind())
    }

    /// Builds the schema. Date fields without a default freeze the current
    /// time now.
    pub fn to_schema(&self) -> SchemaResult<Schema> {
        let mut builder = Schema::builder(&self.name);
        for field in &self.fields {
            let validator = field
                .to_validator()
                .map_err(|e| SchemaError::definition(&self.name, &field.name, e))?;
            builder = builder.field(&field.name, validator);
        }
        builder.build().map_err(|e| SchemaError::model(&self.name, e))
    }
}

fn json_opt(
    bound: &'static str,
    json: Option<JsonValue>,
) -> Result<Option<Value>, DefinitionError> {
    json.map(|j| {
        Value::try_from(&j).map_err(|e| DefinitionError::InvalidBound {
            bound,
            reason: e.to_string(),
        })
    })
    .transpose()
}

fn json_list(json: Option<Vec<JsonValue>>) -> Result<Option<Vec<Value>>, DefinitionError> {
    json.map(|items| {
        items
            .iter()
            .map(|j| {
                Value::try_from(j).map_err(|e| DefinitionError::InvalidBound {
                    bound: "choices",
                    reason: e.to_string(),
                })
            })
            .collect()
    })
    .transpose()
}

fn temporal_opt(
    bound: &'static str,
    text: Option<String>,
) -> Result<Option<Value>, DefinitionError> {
    text.map(|s| {
        Value::parse_temporal(&s).map_err(|e| DefinitionError::InvalidBound {
            bound,
            reason: e.to_string(),
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student_doc() -> SchemaDocument {
        serde_json::from_value(json!({
            "name": "student",
            "fields": [
                { "name": "name", "kind": "string", "max_length": 5 },
                { "name": "is_admin", "kind": "boolean" },
                {
                    "name": "gpa", "kind": "number", "min_value": 0, "max_value": 4,
                    "default": 4.5, "allow_empty": true
                },
                { "name": "enrolled", "kind": "date", "default": "2020-09-01" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_document_parses_kinds() {
        let doc = student_doc();
        assert_eq!(doc.fields.len(), 4);
        assert_eq!(doc.kind_of("name"), Some(Kind::String));
        assert_eq!(doc.kind_of("is_admin"), Some(Kind::Boolean));
        assert_eq!(doc.kind_of("gpa"), Some(Kind::Number));
        assert_eq!(doc.kind_of("enrolled"), Some(Kind::Date));
        assert_eq!(doc.kind_of("missing"), None);
    }

    #[test]
    fn test_document_builds_schema_in_order() {
        let schema = student_doc().to_schema().unwrap();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["name", "is_admin", "gpa", "enrolled"]);
    }

    #[test]
    fn test_bad_default_reports_field() {
        let doc: SchemaDocument = serde_json::from_value(json!({
            "name": "bad",
            "fields": [{ "name": "age", "kind": "number", "default": "ten" }]
        }))
        .unwrap();
        let err = doc.to_schema().unwrap_err();
        assert_eq!(err.code().code(), "FG_SCHEMA_DEFINITION");
        assert_eq!(err.field(), Some("age"));
    }

    #[test]
    fn test_bad_date_bound_rejected() {
        let doc: SchemaDocument = serde_json::from_value(json!({
            "name": "bad",
            "fields": [{ "name": "at", "kind": "date", "min_date": "yesterday" }]
        }))
        .unwrap();
        assert!(doc.to_schema().is_err());
    }

    #[test]
    fn test_duplicate_field_in_document() {
        let doc: SchemaDocument = serde_json::from_value(json!({
            "name": "dup",
            "fields": [
                { "name": "a", "kind": "string" },
                { "name": "a", "kind": "number" }
            ]
        }))
        .unwrap();
        let err = doc.to_schema().unwrap_err();
        assert_eq!(err.field(), Some("a"));
    }

    #[test]
    fn test_unknown_kind_fails_to_parse() {
        let result: Result<SchemaDocument, _> = serde_json::from_value(json!({
            "name": "bad",
            "fields": [{ "name": "a", "kind": "uuid" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let doc = student_doc();
        let text = serde_json::to_string(&doc).unwrap();
        let back: SchemaDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
    }
}
