//! Observability for the command layer
//!
//! - Structured JSON log lines on stderr
//! - Typed events
//! - Atomic counters
//!
//! The validation core (`rule`, `field`, `model`) is pure and never logs.
//!
//! ```ignore
//! use fieldguard::observability::{Event, Logger};
//!
//! Logger::info(Event::SchemasLoaded, &[("count", "3")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log an event at INFO, or FATAL for fatal events
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event, fields);
}
