//! Observability for filekeep
//!
//! - Structured logging (one JSON object per line, on stderr)
//! - Typed lifecycle events
//! - Begin/complete scopes for tree walks
//!
//! Logging is a side channel: it never changes the result of an
//! operation, and a failed log write is ignored.

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

/// Log an event at INFO, or ERROR for failure events
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
