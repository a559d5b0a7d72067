//! Validation Property Tests
//!
//! Whole-instance validation guarantees:
//! - Validation is deterministic
//! - Every invalid field is reported, never just the first
//! - A field with no rules accepts anything
//! - Booleans are not numbers
//! - An absent value short-circuits to the default
//! - Bounds are inclusive
//! - An empty choices list restricts nothing
//! - A shared schema validates distinct instances concurrently

use std::sync::Arc;
use std::thread;

use chrono::{NaiveDate, NaiveDateTime};
use fieldguard::field::{
    self, messages, BooleanOptions, DateOptions, FieldValidator, NumberOptions, StringOptions,
};
use fieldguard::model::{Instance, InstanceState, ModelError, Schema};
use fieldguard::value::{Callable, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn student_schema() -> Arc<Schema> {
    let schema = Schema::builder("student")
        .field(
            "name",
            field::string(StringOptions {
                min_length: Some(2),
                max_length: Some(5),
                ..Default::default()
            })
            .unwrap(),
        )
        .field(
            "is_admin",
            field::boolean(BooleanOptions {
                default: Some(Value::Bool(false)),
                ..Default::default()
            })
            .unwrap(),
        )
        .field(
            "gpa",
            field::number(NumberOptions {
                min_value: Some(0.0),
                max_value: Some(4.0),
                ..Default::default()
            })
            .unwrap(),
        )
        .build()
        .unwrap();
    Arc::new(schema)
}

fn student(values: Vec<(&str, Value)>) -> Instance {
    Instance::new(student_schema(), values)
}

// =============================================================================
// Determinism
// =============================================================================

/// Validating the same instance repeatedly gives the same outcome.
#[test]
fn test_validation_is_deterministic() {
    let mut instance = student(vec![
        ("name", Value::from("Smiths")),
        ("is_admin", Value::from("yes")),
        ("gpa", Value::from(7)),
    ]);

    let first = instance.validate().unwrap_err();
    for _ in 0..100 {
        let again = instance.validate().unwrap_err();
        assert_eq!(again.field_errors(), first.field_errors());
        assert_eq!(again.to_string(), first.to_string());
    }
}

/// A valid instance builds the same record every time.
#[test]
fn test_valid_instance_builds_identically() {
    let mut instance = student(vec![("name", Value::from("Ada")), ("gpa", Value::from(3.9))]);
    let first = instance.validate().unwrap().build().unwrap();
    for _ in 0..10 {
        let again = instance.validate().unwrap().build().unwrap();
        assert_eq!(again, first);
    }
}

// =============================================================================
// Completeness Of Error Reporting
// =============================================================================

/// k invalid fields produce exactly k entries.
#[test]
fn test_every_invalid_field_is_reported() {
    let cases: Vec<(Vec<(&str, Value)>, Vec<&str>)> = vec![
        (vec![("name", Value::from("A")), ("gpa", Value::from(1))], vec!["name"]),
        (
            vec![("name", Value::from("Ada")), ("is_admin", Value::from(1))],
            vec!["is_admin", "gpa"],
        ),
        (
            vec![
                ("name", Value::from(12)),
                ("is_admin", Value::from("no")),
                ("gpa", Value::from(-1)),
            ],
            vec!["name", "is_admin", "gpa"],
        ),
    ];

    for (values, expected) in cases {
        let mut instance = student(values);
        let err = instance.validate().unwrap_err();
        assert_eq!(err.len(), expected.len());
        for field in expected {
            assert!(err.field_errors().contains(field), "missing {}", field);
        }
        assert_eq!(instance.state(), InstanceState::Invalid);
    }
}

/// Wrong-type is_admin and out-of-range gpa: exactly two keys.
#[test]
fn test_two_invalid_fields_two_keys() {
    let mut instance = student(vec![
        ("name", Value::from("Smith")),
        ("is_admin", Value::from("true")),
        ("gpa", Value::from(4.5)),
    ]);

    let err = instance.validate().unwrap_err();
    let fields: Vec<&str> = err.field_errors().fields().collect();
    assert_eq!(fields, vec!["is_admin", "gpa"]);
    assert_eq!(
        err.field_errors().get("is_admin").unwrap(),
        &[messages::BOOLEAN.to_string()]
    );
    assert_eq!(
        err.field_errors().get("gpa").unwrap(),
        &["Must be at most 4".to_string()]
    );
}

/// Errors follow declaration order whatever order values were supplied in.
#[test]
fn test_error_order_follows_declaration() {
    let mut instance = student(vec![
        ("gpa", Value::from(10)),
        ("is_admin", Value::from("x")),
        ("name", Value::from("")),
    ]);
    let err = instance.validate().unwrap_err();
    let fields: Vec<&str> = err.field_errors().fields().collect();
    assert_eq!(fields, vec!["name", "is_admin", "gpa"]);
}

// =============================================================================
// Vacuous Pass And Type Exclusivity
// =============================================================================

/// No rules means every value passes.
#[test]
fn test_empty_validator_passes_everything() {
    let validator = FieldValidator::new();
    for value in [
        Value::Null,
        Value::from(true),
        Value::from(-3),
        Value::from(f64::NAN),
        Value::from(""),
        Value::Date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
    ] {
        let outcome = validator.evaluate(&value);
        assert!(outcome.passed, "{:?}", value);
        assert!(outcome.messages.is_empty());
    }
}

/// Booleans fail the number type rule.
#[test]
fn test_boolean_is_not_a_number() {
    let number = field::number(NumberOptions::default()).unwrap();
    for value in [Value::from(true), Value::from(false)] {
        let outcome = number.evaluate(&value);
        assert!(!outcome.passed);
        assert_eq!(outcome.message_list(), vec![messages::NUMBER.to_string()]);
    }
    assert!(number.evaluate(&Value::from(0)).passed);
}

/// A type failure hides the bound checks that cannot apply.
#[test]
fn test_type_failure_reports_only_type_message() {
    let name = field::string(StringOptions {
        min_length: Some(3),
        choices: Some(vec![Value::from("abc")]),
        ..Default::default()
    })
    .unwrap();
    let outcome = name.evaluate(&Value::from(42));
    assert_eq!(outcome.message_list(), vec![messages::STRING.to_string()]);
}

// =============================================================================
// Emptiness Short-Circuit
// =============================================================================

/// Absent value resolves to the default even when the default breaks a bound.
#[test]
fn test_absent_value_resolves_to_default_without_bounds() {
    let score = field::number(NumberOptions {
        allow_empty: true,
        default: Some(Value::from(99)),
        max_value: Some(10.0),
        choices: Some(vec![Value::from(1), Value::from(2)]),
        ..Default::default()
    })
    .unwrap();

    let outcome = score.evaluate(&Value::Null);
    assert!(outcome.passed);
    assert_eq!(outcome.resolved, Some(Value::from(99)));

    // a supplied value still meets the bounds
    assert!(!score.evaluate(&Value::from(99)).passed);
}

/// Absent and required: only the empty message.
#[test]
fn test_absent_required_value_reports_empty_message_only() {
    let mut instance = student(vec![("name", Value::from("Ada"))]);
    let err = instance.validate().unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(
        err.field_errors().get("gpa").unwrap(),
        &[messages::EMPTY.to_string()]
    );
}

/// Allowed-empty without a default resolves to null.
#[test]
fn test_allow_empty_without_default_resolves_null() {
    let nickname = field::string(StringOptions {
        allow_empty: true,
        min_length: Some(3),
        ..Default::default()
    })
    .unwrap();
    let outcome = nickname.evaluate(&Value::Null);
    assert!(outcome.passed);
    assert_eq!(outcome.resolved, Some(Value::Null));
}

// =============================================================================
// Inclusive Bounds
// =============================================================================

#[test]
fn test_length_bounds_are_inclusive() {
    let name = field::string(StringOptions {
        min_length: Some(2),
        max_length: Some(4),
        ..Default::default()
    })
    .unwrap();
    assert!(name.evaluate(&Value::from("ab")).passed);
    assert!(name.evaluate(&Value::from("abcd")).passed);
    assert!(!name.evaluate(&Value::from("a")).passed);
    assert!(!name.evaluate(&Value::from("abcde")).passed);
}

#[test]
fn test_value_bounds_are_inclusive() {
    let gpa = field::number(NumberOptions {
        min_value: Some(0.0),
        max_value: Some(4.0),
        ..Default::default()
    })
    .unwrap();
    assert!(gpa.evaluate(&Value::from(0)).passed);
    assert!(gpa.evaluate(&Value::from(4.0)).passed);
    assert!(!gpa.evaluate(&Value::from(-0.01)).passed);
    assert!(!gpa.evaluate(&Value::from(4.01)).passed);
}

/// Integers past 2^53 are compared exactly, not rounded to the bound.
#[test]
fn test_large_integer_bounds_are_exact() {
    let schema = Schema::builder("counter")
        .field(
            "n",
            field::number(NumberOptions {
                max_value: Some(9_007_199_254_740_992.0),
                ..Default::default()
            })
            .unwrap(),
        )
        .build()
        .unwrap();
    let schema = Arc::new(schema);

    let at_bound_value = vec![("n", Value::Int(9_007_199_254_740_992))];
    let mut at_bound = Instance::new(schema.clone(), at_bound_value);
    assert!(at_bound.validate().is_ok());

    let mut above = Instance::new(schema, vec![("n", Value::Int(9_007_199_254_740_993))]);
    let err = above.validate().unwrap_err();
    assert_eq!(
        err.field_errors().get("n").unwrap(),
        &["Must be at most 9007199254740992".to_string()]
    );
}

#[test]
fn test_date_bounds_are_inclusive() {
    let start = at(2024, 1, 1, 0);
    let end = at(2024, 12, 31, 0);
    let window = field::date(DateOptions {
        min_date: Some(Value::DateTime(start)),
        max_date: Some(Value::DateTime(end)),
        ..Default::default()
    })
    .unwrap();

    assert!(window.evaluate(&Value::DateTime(start)).passed);
    assert!(window.evaluate(&Value::DateTime(end)).passed);
    assert!(window
        .evaluate(&Value::Date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()))
        .passed);

    let late = window.evaluate(&Value::DateTime(at(2025, 1, 1, 0)));
    assert_eq!(
        late.message_list(),
        vec!["Must be on or before 2024-12-31T00:00:00".to_string()]
    );
}

// =============================================================================
// Choices Vacuity
// =============================================================================

#[test]
fn test_empty_choices_restrict_nothing() {
    for choices in [None, Some(Vec::new())] {
        let color = field::string(StringOptions {
            choices,
            ..Default::default()
        })
        .unwrap();
        assert!(color.evaluate(&Value::from("anything")).passed);
        assert!(!color.rules().iter().any(|r| r.name() == "choices"));
    }
}

#[test]
fn test_choices_reject_unlisted_values() {
    let level = field::number(NumberOptions {
        choices: Some(vec![Value::from(1), Value::from(2)]),
        ..Default::default()
    })
    .unwrap();
    assert!(level.evaluate(&Value::from(2.0)).passed);
    assert_eq!(
        level.evaluate(&Value::from(3)).message_list(),
        vec![messages::CHOICES.to_string()]
    );
}

// =============================================================================
// Scenarios
// =============================================================================

/// "Smith" fits max_length 5, "Smiths" does not.
#[test]
fn test_max_length_scenario() {
    let name = field::string(StringOptions {
        max_length: Some(5),
        ..Default::default()
    })
    .unwrap();
    assert!(name.evaluate(&Value::from("Smith")).passed);

    let outcome = name.evaluate(&Value::from("Smiths"));
    assert!(!outcome.passed);
    assert_eq!(
        outcome.message_list(),
        vec!["Must be at most 5 characters long".to_string()]
    );
}

/// Omitted number resolves to its default.
#[test]
fn test_number_default_scenario() {
    let schema = Schema::builder("grades")
        .field(
            "gpa",
            field::number(NumberOptions {
                default: Some(Value::from(4.5)),
                ..Default::default()
            })
            .unwrap(),
        )
        .build()
        .unwrap();

    let mut instance = Instance::empty(Arc::new(schema));
    let record = instance.validate().unwrap().build().unwrap();
    assert_eq!(record.get("gpa"), Some(&Value::from(4.5)));
}

/// An explicit false overrides a true default.
#[test]
fn test_boolean_override_scenario() {
    let active = field::boolean(BooleanOptions {
        default: Some(Value::from(true)),
        ..Default::default()
    })
    .unwrap();
    let outcome = active.evaluate(&Value::from(false));
    assert!(outcome.passed);
    assert_eq!(outcome.resolved, Some(Value::from(false)));
}

/// Each date schema keeps the "now" frozen when it was built.
#[test]
fn test_date_default_frozen_per_schema() {
    let built_monday = at(2024, 3, 4, 9);
    let built_friday = at(2024, 3, 8, 17);

    let schema_for = |name: &str, frozen: NaiveDateTime| {
        let created = field::date_with_clock(DateOptions::default(), move || frozen).unwrap();
        Arc::new(Schema::builder(name).field("created", created).build().unwrap())
    };
    let monday = schema_for("monday", built_monday);
    let friday = schema_for("friday", built_friday);

    for _ in 0..3 {
        let mut a = Instance::empty(monday.clone());
        let mut b = Instance::empty(friday.clone());
        let ra = a.validate().unwrap().build().unwrap();
        let rb = b.validate().unwrap().build().unwrap();
        assert_eq!(ra.get("created"), Some(&Value::DateTime(built_monday)));
        assert_eq!(rb.get("created"), Some(&Value::DateTime(built_friday)));
    }
}

/// The wall-clock factory freezes once too.
#[test]
fn test_date_factory_captures_time_once() {
    let created = field::date(DateOptions::default()).unwrap();
    let first = created.evaluate(&Value::Null).resolved;
    thread::sleep(std::time::Duration::from_millis(5));
    let second = created.evaluate(&Value::Null).resolved;
    assert!(matches!(first, Some(Value::DateTime(_))));
    assert_eq!(first, second);
}

/// A stored callable is left out of the built record.
#[test]
fn test_callable_excluded_from_record() {
    let schema = Schema::builder("job")
        .field(
            "title",
            field::string(StringOptions::default()).unwrap(),
        )
        .field("handler", FieldValidator::new())
        .build()
        .unwrap();

    let handler = Callable::new("handler", |_| Value::Null);
    let mut job = Instance::new(
        Arc::new(schema),
        vec![("title", Value::from("nightly")), ("handler", Value::from(handler))],
    );

    let record = job.validate().unwrap().build().unwrap();
    assert_eq!(record.len(), 1);
    assert_eq!(record.get("title"), Some(&Value::from("nightly")));
    assert!(!record.contains("handler"));
}

// =============================================================================
// Instance Lifecycle
// =============================================================================

/// build() needs a successful validate() since the last assignment.
#[test]
fn test_build_requires_valid_state() {
    let mut instance = student(vec![("name", Value::from("Ada")), ("gpa", Value::from(2))]);
    assert!(matches!(instance.build(), Err(ModelError::NotValidated(_))));

    instance.validate().unwrap();
    assert!(instance.build().is_ok());

    instance.set("gpa", 3).unwrap();
    assert_eq!(instance.state(), InstanceState::Constructed);
    assert!(matches!(instance.build(), Err(ModelError::NotValidated(_))));

    let record = instance.validate().unwrap().build().unwrap();
    assert_eq!(record.get("gpa"), Some(&Value::from(3)));
}

/// Correcting fields and validating again succeeds.
#[test]
fn test_revalidate_after_correction() {
    let mut instance = student(vec![("name", Value::from("A")), ("gpa", Value::from(9))]);
    assert_eq!(instance.validate().unwrap_err().len(), 2);

    instance.set("name", "Alan").unwrap();
    instance.set("gpa", 3.1).unwrap();
    assert!(instance.validate().is_ok());
    assert_eq!(instance.state(), InstanceState::Valid);
}

#[test]
fn test_set_unknown_field_rejected() {
    let mut instance = student(Vec::new());
    let err = instance.set("email", "a@b.c").unwrap_err();
    assert!(matches!(err, ModelError::UnknownField(ref f, _) if f == "email"));
}

// =============================================================================
// Concurrency
// =============================================================================

/// Distinct instances validate in parallel against one shared schema.
#[test]
fn test_shared_schema_concurrent_validation() {
    let schema = student_schema();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let gpa = if i % 2 == 0 { 3 } else { 9 };
                let mut instance = Instance::new(
                    schema,
                    vec![("name", Value::from("Ada")), ("gpa", Value::from(gpa))],
                );
                for _ in 0..100 {
                    let passed = instance.validate().is_ok();
                    assert_eq!(passed, i % 2 == 0);
                }
                i
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
