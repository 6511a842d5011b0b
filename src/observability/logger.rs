//! Structured JSON logger
//!
//! - One log line = one event
//! - Deterministic key ordering (event, severity, then fields sorted by key)
//! - Synchronous, no buffering
//! - Written to stderr; stdout belongs to CLI responses
//! - Lines below the process-wide minimum severity are dropped

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Warn as u8);

/// A structured logger that outputs JSON lines to stderr
pub struct Logger;

impl Logger {
    /// Set the minimum severity that gets written
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Current minimum severity
    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Whether a line at `severity` would be written
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        let line = Self::render(severity, event, fields);

        // Write atomically (one syscall); logging never fails an operation
        let mut stderr = io::stderr();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }

    /// Render one JSON log line, newline-terminated
    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(128);

        output.push_str("{\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push_str("\",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push_str("}\n");
        output
    }

    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }

    /// Log at TRACE level
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }
}

/// Render a log line without writing it, for tests
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    Logger::render(severity, event, fields)
}
