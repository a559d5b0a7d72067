//! Conversion between `serde_json::Value` and `Value`

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::Value;

/// Result type for value conversions
pub type ValueResult<T> = Result<T, ValueError>;

/// Value conversion errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("Unsupported JSON value: {0}")]
    UnsupportedJson(&'static str),

    #[error("Invalid date: '{0}'")]
    InvalidDate(String),
}

impl TryFrom<&JsonValue> for Value {
    type Error = ValueError;

    fn try_from(json: &JsonValue) -> ValueResult<Self> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .ok_or(ValueError::UnsupportedJson("number")),
            },
            JsonValue::String(s) => Ok(Value::Str(s.clone())),
            JsonValue::Array(_) => Err(ValueError::UnsupportedJson("array")),
            JsonValue::Object(_) => Err(ValueError::UnsupportedJson("object")),
        }
    }
}

impl Value {
    /// Converts to JSON. Dates render as ISO-8601 strings; callables and
    /// non-finite floats render as `null`.
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }

    /// Parses an ISO-8601 date (`2024-01-31`), date-time
    /// (`2024-01-31T10:00:00`) or RFC 3339 timestamp (normalized to UTC).
    pub fn parse_temporal(s: &str) -> ValueResult<Self> {
        let s = s.trim();
        if let Ok(d) = s.parse::<NaiveDate>() {
            return Ok(Value::Date(d));
        }
        if let Ok(dt) = s.parse::<NaiveDateTime>() {
            return Ok(Value::DateTime(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
            return Ok(Value::DateTime(dt));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Value::DateTime(dt.naive_utc()))
            .map_err(|_| ValueError::InvalidDate(s.to_string()))
    }
}
