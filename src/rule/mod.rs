//! Rules: single, immutable checks bound to static parameters
//!
//! A rule never fails by returning an error. Evaluation always yields a
//! `RuleOutcome` carrying `ok`, the resolved value on success and the
//! rule's message on failure.
//!
//! Rule families:
//! - `Presence`: emptiness policy and default substitution
//! - `Kind`: type check (string / number / boolean / date)
//! - `MinLength` / `MaxLength`: inclusive string length bounds
//! - `MinValue` / `MaxValue`: inclusive numeric bounds
//! - `MinDate` / `MaxDate`: inclusive temporal bounds
//! - `Choices`: membership in an allowed set (empty set allows anything)
//! - `Custom`: caller-supplied predicate

mod errors;
pub mod template;

pub use errors::{DefinitionError, DefinitionResult};

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::value::Value;

/// Field kinds with a built-in type check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Date,
}

impl Kind {
    /// Returns the kind name for messages and schema documents
    pub fn name(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Date => "date",
        }
    }

    /// Type check. Booleans are not numbers.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Kind::String => matches!(value, Value::Str(_)),
            Kind::Number => value.is_number(),
            Kind::Boolean => matches!(value, Value::Bool(_)),
            Kind::Date => value.is_date_like(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Caller-supplied predicate for `Rule::Custom`
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Predicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate(..)")
    }
}

/// Result of evaluating one rule against one value
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub ok: bool,
    /// Value to carry forward when `ok`; `None` on failure
    pub resolved: Option<Value>,
    /// The rule's message when not `ok`
    pub message: Option<String>,
}

impl RuleOutcome {
    pub fn pass(resolved: Value) -> Self {
        Self {
            ok: true,
            resolved: Some(resolved),
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            resolved: None,
            message: Some(message.into()),
        }
    }
}

/// A single check with its parameters and rendered message.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Emptiness policy. Only consulted for absent (`Null`) values.
    Presence {
        allow_empty: bool,
        default: Option<Value>,
        message: String,
    },
    Kind {
        kind: Kind,
        message: String,
    },
    MinLength {
        min: usize,
        message: String,
    },
    MaxLength {
        max: usize,
        message: String,
    },
    MinValue {
        min: f64,
        message: String,
    },
    MaxValue {
        max: f64,
        message: String,
    },
    MinDate {
        min: NaiveDateTime,
        message: String,
    },
    MaxDate {
        max: NaiveDateTime,
        message: String,
    },
    Choices {
        choices: Vec<Value>,
        message: String,
    },
    Custom {
        name: String,
        check: Predicate,
        message: String,
    },
}

impl Rule {
    /// Builds a custom rule from a predicate.
    pub fn custom<F>(name: impl Into<String>, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Rule::Custom {
            name: name.into(),
            check: Predicate::new(check),
            message: message.into(),
        }
    }

    /// Short name of the rule family
    pub fn name(&self) -> &str {
        match self {
            Rule::Presence { .. } => "presence",
            Rule::Kind { .. } => "kind",
            Rule::MinLength { .. } => "min_length",
            Rule::MaxLength { .. } => "max_length",
            Rule::MinValue { .. } => "min_value",
            Rule::MaxValue { .. } => "max_value",
            Rule::MinDate { .. } => "min_date",
            Rule::MaxDate { .. } => "max_date",
            Rule::Choices { .. } => "choices",
            Rule::Custom { name, .. } => name.as_str(),
        }
    }

    /// The message reported when this rule fails
    pub fn message(&self) -> &str {
        match self {
            Rule::Presence { message, .. }
            | Rule::Kind { message, .. }
            | Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::MinValue { message, .. }
            | Rule::MaxValue { message, .. }
            | Rule::MinDate { message, .. }
            | Rule::MaxDate { message, .. }
            | Rule::Choices { message, .. }
            | Rule::Custom { message, .. } => message,
        }
    }

    pub fn is_presence(&self) -> bool {
        matches!(self, Rule::Presence { .. })
    }

    pub fn is_kind(&self) -> bool {
        matches!(self, Rule::Kind { .. })
    }

    /// Bound and choices rules only run once the kind check has passed.
    pub fn requires_kind(&self) -> bool {
        !matches!(
            self,
            Rule::Presence { .. } | Rule::Kind { .. } | Rule::Custom { .. }
        )
    }

    /// Evaluates the rule against `value`.
    ///
    /// Bound rules pass values they cannot measure (a bound on string length
    /// passes a number); reporting the wrong type is the kind rule's job.
    pub fn evaluate(&self, value: &Value) -> RuleOutcome {
        let ok = match self {
            Rule::Presence {
                allow_empty,
                default,
                message,
            } => {
                if !value.is_null() {
                    true
                } else if *allow_empty {
                    return RuleOutcome::pass(default.clone().unwrap_or(Value::Null));
                } else if let Some(default) = default {
                    return RuleOutcome::pass(default.clone());
                } else {
                    return RuleOutcome::fail(message.as_str());
                }
            }
            Rule::Kind { kind, .. } => kind.matches(value),
            Rule::MinLength { min, .. } => value.str_len().map_or(true, |len| len >= *min),
            Rule::MaxLength { max, .. } => value.str_len().map_or(true, |len| len <= *max),
            Rule::MinValue { min, .. } => within_bound(value, *min, Ordering::Less),
            Rule::MaxValue { max, .. } => within_bound(value, *max, Ordering::Greater),
            Rule::MinDate { min, .. } => value.as_datetime().map_or(true, |dt| dt >= *min),
            Rule::MaxDate { max, .. } => value.as_datetime().map_or(true, |dt| dt <= *max),
            Rule::Choices { choices, .. } => {
                choices.is_empty() || choices.iter().any(|c| c.loose_eq(value))
            }
            Rule::Custom { check, .. } => check.test(value),
        };

        if ok {
            RuleOutcome::pass(value.clone())
        } else {
            RuleOutcome::fail(self.message())
        }
    }
}

/// Non-numbers pass; a number on the `outside` side of `bound` fails, and
/// NaN never satisfies a bound.
fn within_bound(value: &Value, bound: f64, outside: Ordering) -> bool {
    if !value.is_number() {
        return true;
    }
    value.cmp_number(bound).is_some_and(|ord| ord != outside)
}
