//! ObservationScope for begin/complete logging around longer operations
//!
//! - Logs `{EVENT}_BEGIN` at TRACE on creation
//! - Logs `{EVENT}_COMPLETE` at INFO with `elapsed_ms` on completion
//! - Logs `{EVENT}_INCOMPLETE` at WARN if dropped without completion

use std::time::Instant;

use super::events::Event;
use super::logger::Logger;

/// A scope that logs the start and end of an operation
///
/// ```ignore
/// let scope = ObservationScope::with_fields(Event::TreeSearch, &[("root", ".")]);
/// // ... walk ...
/// scope.complete_with_fields(&[("found", "true")]);
/// ```
pub struct ObservationScope {
    event: Event,
    fields: Vec<(&'static str, String)>,
    started: Instant,
    completed: bool,
}

impl ObservationScope {
    /// Open a scope with no extra fields
    pub fn new(event: Event) -> Self {
        Self::with_fields(event, &[])
    }

    /// Open a scope; `fields` are repeated on every line it logs
    pub fn with_fields(event: Event, fields: &[(&'static str, &str)]) -> Self {
        Logger::trace(&format!("{}_BEGIN", event.as_str()), fields);

        Self {
            event,
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            started: Instant::now(),
            completed: false,
        }
    }

    /// Milliseconds since the scope was opened
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Mark the scope as completed, adding `extra_fields` to the line
    pub fn complete_with_fields(mut self, extra_fields: &[(&str, &str)]) {
        self.completed = true;
        let elapsed = self.elapsed_ms().to_string();

        let mut all_fields: Vec<(&str, &str)> =
            self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("elapsed_ms", elapsed.as_str()));

        Logger::info(&format!("{}_COMPLETE", self.event.as_str()), &all_fields);
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.completed {
            let mut fields: Vec<(&str, &str)> =
                self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
            fields.push(("reason", "scope dropped without completion"));
            Logger::warn(&format!("{}_INCOMPLETE", self.event.as_str()), &fields);
        }
    }
}
