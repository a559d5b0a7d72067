//! Validation counters
//!
//! - Counters only, monotonic
//! - Thread-safe via relaxed atomics; a snapshot is not a consistent cut

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for one process (or one command run)
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Instances that passed validation
    validations_passed: AtomicU64,
    /// Instances that failed validation
    validations_failed: AtomicU64,
    /// Individual failing fields across all failed instances
    field_failures: AtomicU64,
    /// Input lines that could not be turned into instances
    inputs_rejected: AtomicU64,
    /// Records materialized
    records_built: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_validations_passed(&self) {
        self.validations_passed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one failed validation with `fields` failing fields
    pub fn record_validation_failure(&self, fields: usize) {
        self.validations_failed.fetch_add(1, Ordering::Relaxed);
        self.field_failures.fetch_add(fields as u64, Ordering::Relaxed);
    }

    pub fn increment_inputs_rejected(&self) {
        self.inputs_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_records_built(&self) {
        self.records_built.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            validations_passed: self.validations_passed.load(Ordering::Relaxed),
            validations_failed: self.validations_failed.load(Ordering::Relaxed),
            field_failures: self.field_failures.load(Ordering::Relaxed),
            inputs_rejected: self.inputs_rejected.load(Ordering::Relaxed),
            records_built: self.records_built.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub validations_passed: u64,
    pub validations_failed: u64,
    pub field_failures: u64,
    pub inputs_rejected: u64,
    pub records_built: u64,
}
