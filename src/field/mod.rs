//! Field validators: ordered rule chains attached to one field
//!
//! # Evaluation
//!
//! 1. An absent (`Null`) value is handed to the field's presence rule, if it
//!    has one, and that rule's outcome is final. No other rule runs.
//! 2. Otherwise every rule runs in declaration order. Bound and choices
//!    rules are skipped once a kind rule has failed.
//! 3. Failure messages are collected into a set; duplicates collapse.
//! 4. The field passes iff no message was collected. Only passing fields
//!    expose a resolved value.
//!
//! A validator with no rules passes everything, `Null` included.

mod kinds;
pub mod messages;

pub use kinds::{
    boolean, date, date_with_clock, number, string, BooleanOptions, DateOptions, NumberOptions,
    StringOptions,
};

use std::collections::BTreeSet;

use crate::rule::Rule;
use crate::value::Value;

/// Outcome of evaluating one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOutcome {
    pub passed: bool,
    /// Raw value or substituted default when passed; `None` when failed
    pub resolved: Option<Value>,
    pub messages: BTreeSet<String>,
}

impl FieldOutcome {
    /// Messages as an ordered list
    pub fn message_list(&self) -> Vec<String> {
        self.messages.iter().cloned().collect()
    }
}

/// Ordered sequence of rules for one field.
///
/// Immutable once shared; evaluation only reads it.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    rules: Vec<Rule>,
}

impl FieldValidator {
    /// Creates a validator with no rules. It passes every value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule, builder style.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends a rule.
    pub fn push_rule(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates `value` against every rule.
    pub fn evaluate(&self, value: &Value) -> FieldOutcome {
        if value.is_null() {
            if let Some(presence) = self.rules.iter().find(|r| r.is_presence()) {
                let outcome = presence.evaluate(value);
                return FieldOutcome {
                    passed: outcome.ok,
                    resolved: outcome.resolved,
                    messages: outcome.message.into_iter().collect(),
                };
            }
        }

        let mut messages = BTreeSet::new();
        let mut kind_failed = false;

        for rule in &self.rules {
            if rule.is_presence() || (kind_failed && rule.requires_kind()) {
                continue;
            }
            let outcome = rule.evaluate(value);
            if !outcome.ok {
                kind_failed |= rule.is_kind();
                if let Some(message) = outcome.message {
                    messages.insert(message);
                }
            }
        }

        let passed = messages.is_empty();
        FieldOutcome {
            passed,
            resolved: passed.then(|| value.clone()),
            messages,
        }
    }
}
