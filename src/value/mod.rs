//! Candidate values for field validation
//!
//! A `Value` is what an instance stores per field and what rules inspect.
//! `Null` doubles as the absent marker: a field missing from an instance
//! reads as `Null`.
//!
//! Booleans are never numbers. `Int` and `Float` are the only numeric
//! variants, so a boolean can never slip through a numeric type check.

mod callable;
mod json;

pub use callable::Callable;
pub use json::{ValueError, ValueResult};

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

/// A dynamically typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / missing value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// UTF-8 string
    Str(String),
    /// Calendar date without time
    Date(NaiveDate),
    /// Date with time of day
    DateTime(NaiveDateTime),
    /// Function reference stored in place of a value
    Callable(Callable),
    /// Input no field kind accepts, such as a JSON array or object.
    /// Holds the input's type name.
    Unsupported(&'static str),
}

impl Value {
    /// Returns the type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Callable(_) => "callable",
            Value::Unsupported(name) => *name,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for `Int` and `Float` only. `Bool` is not a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// True for `Date` and `DateTime`.
    pub fn is_date_like(&self) -> bool {
        matches!(self, Value::Date(_) | Value::DateTime(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Callable(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value. `None` for everything but `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Orders a number against `bound` without rounding integers through
    /// `f64`. `None` for non-numbers and NaN on either side.
    pub fn cmp_number(&self, bound: f64) -> Option<Ordering> {
        match self {
            Value::Int(i) => cmp_int_float(*i, bound),
            Value::Float(x) => x.partial_cmp(&bound),
            _ => None,
        }
    }

    /// Temporal view of the value. A plain date is taken at midnight so that
    /// dates and date-times order against each other.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Length of a string in Unicode scalar values.
    pub fn str_len(&self) -> Option<usize> {
        self.as_str().map(|s| s.chars().count())
    }

    /// Equality used for choices membership.
    ///
    /// Numbers compare by numeric value across `Int` and `Float`, dates compare
    /// across `Date` and `DateTime`. Everything else uses strict equality.
    pub fn loose_eq(&self, other: &Value) -> bool {
        let numeric = match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a == b),
            (Value::Int(_), Value::Float(x)) => Some(self.cmp_number(*x) == Some(Ordering::Equal)),
            (Value::Float(x), Value::Int(_)) => Some(other.cmp_number(*x) == Some(Ordering::Equal)),
            _ => None,
        };
        if let Some(equal) = numeric {
            return equal;
        }
        if let (Some(a), Some(b)) = (self.as_datetime(), other.as_datetime()) {
            return a == b;
        }
        self == other
    }
}

/// Exact ordering of an `i64` against an `f64`.
fn cmp_int_float(i: i64, x: f64) -> Option<Ordering> {
    // 2^63, exactly representable
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if x.is_nan() {
        return None;
    }
    if x >= LIMIT {
        return Some(Ordering::Less);
    }
    if x < -LIMIT {
        return Some(Ordering::Greater);
    }
    let whole = x.floor();
    // integral and within i64 range, so the cast is exact
    match i.cmp(&(whole as i64)) {
        Ordering::Equal if x > whole => Some(Ordering::Less),
        ord => Some(ord),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::Callable(c) => write!(f, "<callable {}>", c.name()),
            Value::Unsupported(name) => write!(f, "<{}>", name),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::Callable(_) | Value::Unsupported(_) => {
                serializer.serialize_unit()
            }
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) if x.is_finite() => serializer.serialize_f64(*x),
            Value::Float(_) => serializer.serialize_unit(),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Date(_) | Value::DateTime(_) => serializer.collect_str(self),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
