//! Field-kind factories
//!
//! Each factory builds a fresh `FieldValidator` holding exactly the rules the
//! supplied options imply:
//!
//! - presence rule (always)
//! - kind rule (always)
//! - bound rules, only for bounds that were supplied
//! - choices rule, only for a non-empty choices list
//!
//! Parameters are checked here, at definition time: a default of the wrong
//! type, an inverted bound pair or a message template naming an unknown
//! placeholder is a `DefinitionError`, not a validation failure.

use chrono::{NaiveDateTime, Utc};

use super::messages;
use super::FieldValidator;
use crate::rule::template::{self, Bindings};
use crate::rule::{DefinitionError, DefinitionResult, Kind, Rule};
use crate::value::Value;

/// Options for [`string`]
#[derive(Debug, Clone, Default)]
pub struct StringOptions {
    /// Type-mismatch message
    pub message: Option<String>,
    pub default: Option<Value>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub allow_empty: bool,
    pub choices: Option<Vec<Value>>,
    pub min_length_message: Option<String>,
    pub max_length_message: Option<String>,
    pub choices_message: Option<String>,
    pub empty_message: Option<String>,
}

/// Options for [`number`]
#[derive(Debug, Clone, Default)]
pub struct NumberOptions {
    /// Type-mismatch message
    pub message: Option<String>,
    pub default: Option<Value>,
    pub allow_empty: bool,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub choices: Option<Vec<Value>>,
    pub min_value_message: Option<String>,
    pub max_value_message: Option<String>,
    pub choices_message: Option<String>,
    pub empty_message: Option<String>,
}

/// Options for [`boolean`]
#[derive(Debug, Clone, Default)]
pub struct BooleanOptions {
    /// Type-mismatch message
    pub message: Option<String>,
    pub default: Option<Value>,
    pub empty_message: Option<String>,
}

/// Options for [`date`]
#[derive(Debug, Clone, Default)]
pub struct DateOptions {
    /// Type-mismatch message
    pub message: Option<String>,
    /// When `None`, the factory freezes the current time as the default.
    pub default: Option<Value>,
    pub allow_empty: bool,
    pub min_date: Option<Value>,
    pub max_date: Option<Value>,
    pub min_date_message: Option<String>,
    pub max_date_message: Option<String>,
    pub empty_message: Option<String>,
}

/// Builds a string field.
pub fn string(opts: StringOptions) -> DefinitionResult<FieldValidator> {
    let default = check_default(Kind::String, opts.default)?;
    let choices = check_choices(Kind::String, opts.choices)?;
    if let (Some(min), Some(max)) = (opts.min_length, opts.max_length) {
        if min > max {
            return Err(inverted("min_length", min, "max_length", max));
        }
    }

    let mut bindings = Bindings::new();
    if let Some(min) = opts.min_length {
        bindings.bind("min_length", min);
    }
    if let Some(max) = opts.max_length {
        bindings.bind("max_length", max);
    }

    let mut field = FieldValidator::new();
    field.push_rule(Rule::Presence {
        allow_empty: opts.allow_empty,
        default,
        message: render(opts.empty_message, messages::EMPTY, &bindings)?,
    });
    field.push_rule(Rule::Kind {
        kind: Kind::String,
        message: render(opts.message, messages::STRING, &bindings)?,
    });
    if let Some(min) = opts.min_length {
        field.push_rule(Rule::MinLength {
            min,
            message: render(opts.min_length_message, messages::MIN_LENGTH, &bindings)?,
        });
    }
    if let Some(max) = opts.max_length {
        field.push_rule(Rule::MaxLength {
            max,
            message: render(opts.max_length_message, messages::MAX_LENGTH, &bindings)?,
        });
    }
    if !choices.is_empty() {
        field.push_rule(Rule::Choices {
            choices,
            message: render(opts.choices_message, messages::CHOICES, &bindings)?,
        });
    }
    Ok(field)
}

/// Builds a number field. Integers and floats are numbers; booleans are not.
pub fn number(opts: NumberOptions) -> DefinitionResult<FieldValidator> {
    let default = check_default(Kind::Number, opts.default)?;
    let choices = check_choices(Kind::Number, opts.choices)?;
    for (name, bound) in [("min_value", opts.min_value), ("max_value", opts.max_value)] {
        if bound.is_some_and(f64::is_nan) {
            return Err(DefinitionError::InvalidBound {
                bound: name,
                reason: "NaN is not comparable".into(),
            });
        }
    }
    if let (Some(min), Some(max)) = (opts.min_value, opts.max_value) {
        if min > max {
            return Err(inverted("min_value", min, "max_value", max));
        }
    }

    let mut bindings = Bindings::new();
    if let Some(min) = opts.min_value {
        bindings.bind("min_value", min);
    }
    if let Some(max) = opts.max_value {
        bindings.bind("max_value", max);
    }

    let mut field = FieldValidator::new();
    field.push_rule(Rule::Presence {
        allow_empty: opts.allow_empty,
        default,
        message: render(opts.empty_message, messages::EMPTY, &bindings)?,
    });
    field.push_rule(Rule::Kind {
        kind: Kind::Number,
        message: render(opts.message, messages::NUMBER, &bindings)?,
    });
    if let Some(min) = opts.min_value {
        field.push_rule(Rule::MinValue {
            min,
            message: render(opts.min_value_message, messages::MIN_VALUE, &bindings)?,
        });
    }
    if let Some(max) = opts.max_value {
        field.push_rule(Rule::MaxValue {
            max,
            message: render(opts.max_value_message, messages::MAX_VALUE, &bindings)?,
        });
    }
    if !choices.is_empty() {
        field.push_rule(Rule::Choices {
            choices,
            message: render(opts.choices_message, messages::CHOICES, &bindings)?,
        });
    }
    Ok(field)
}

/// Builds a boolean field. An explicit value always wins over the default.
pub fn boolean(opts: BooleanOptions) -> DefinitionResult<FieldValidator> {
    let default = check_default(Kind::Boolean, opts.default)?;
    let bindings = Bindings::new();

    Ok(FieldValidator::new()
        .with_rule(Rule::Presence {
            allow_empty: false,
            default,
            message: render(opts.empty_message, messages::EMPTY, &bindings)?,
        })
        .with_rule(Rule::Kind {
            kind: Kind::Boolean,
            message: render(opts.message, messages::BOOLEAN, &bindings)?,
        }))
}

/// Builds a date field, freezing `Utc::now()` as the default when none is
/// given.
///
/// The timestamp is captured here, once. Every instance validated against
/// the returned validator sees the same default.
pub fn date(opts: DateOptions) -> DefinitionResult<FieldValidator> {
    date_with_clock(opts, || Utc::now().naive_utc())
}

/// Builds a date field, taking the frozen default from `clock` when none
/// is given. `clock` is called at most once.
pub fn date_with_clock<F>(opts: DateOptions, clock: F) -> DefinitionResult<FieldValidator>
where
    F: FnOnce() -> NaiveDateTime,
{
    let default = match check_default(Kind::Date, opts.default)? {
        Some(value) => value,
        None => Value::DateTime(clock()),
    };
    let min = date_bound("min_date", opts.min_date)?;
    let max = date_bound("max_date", opts.max_date)?;
    if let (Some((min_at, min_value)), Some((max_at, max_value))) = (&min, &max) {
        if min_at > max_at {
            return Err(inverted("min_date", min_value, "max_date", max_value));
        }
    }

    let mut bindings = Bindings::new();
    if let Some((_, value)) = &min {
        bindings.bind("min_date", value);
    }
    if let Some((_, value)) = &max {
        bindings.bind("max_date", value);
    }

    let mut field = FieldValidator::new();
    field.push_rule(Rule::Presence {
        allow_empty: opts.allow_empty,
        default: Some(default),
        message: render(opts.empty_message, messages::EMPTY, &bindings)?,
    });
    field.push_rule(Rule::Kind {
        kind: Kind::Date,
        message: render(opts.message, messages::DATE, &bindings)?,
    });
    if let Some((min, _)) = min {
        field.push_rule(Rule::MinDate {
            min,
            message: render(opts.min_date_message, messages::MIN_DATE, &bindings)?,
        });
    }
    if let Some((max, _)) = max {
        field.push_rule(Rule::MaxDate {
            max,
            message: render(opts.max_date_message, messages::MAX_DATE, &bindings)?,
        });
    }
    Ok(field)
}

fn render(custom: Option<String>, fallback: &str, bindings: &Bindings) -> DefinitionResult<String> {
    template::render(custom.as_deref().unwrap_or(fallback), bindings)
}

/// A `Null` default is the same as no default.
fn check_default(kind: Kind, default: Option<Value>) -> DefinitionResult<Option<Value>> {
    match default {
        None | Some(Value::Null) => Ok(None),
        Some(value) if kind.matches(&value) => Ok(Some(value)),
        Some(value) => Err(DefinitionError::DefaultTypeMismatch {
            kind: kind.name(),
            found: value.type_name(),
        }),
    }
}

fn check_choices(kind: Kind, choices: Option<Vec<Value>>) -> DefinitionResult<Vec<Value>> {
    let choices = choices.unwrap_or_default();
    if let Some(bad) = choices.iter().find(|c| !kind.matches(c)) {
        return Err(DefinitionError::InvalidBound {
            bound: "choices",
            reason: format!("'{}' ({}) is not a {}", bad, bad.type_name(), kind),
        });
    }
    Ok(choices)
}

fn date_bound(
    name: &'static str,
    bound: Option<Value>,
) -> DefinitionResult<Option<(NaiveDateTime, Value)>> {
    match bound {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match value.as_datetime() {
            Some(at) => Ok(Some((at, value))),
            None => Err(DefinitionError::InvalidBound {
                bound: name,
                reason: format!("expected a date, got {}", value.type_name()),
            }),
        },
    }
}

fn inverted(
    min_name: &'static str,
    min: impl ToString,
    max_name: &'static str,
    max: impl ToString,
) -> DefinitionError {
    DefinitionError::InvertedBounds {
        min_name,
        min: min.to_string(),
        max_name,
        max: max.to_string(),
    }
}
