//! Structured JSON logger
//!
//! One log line = one event, written synchronously with no buffering.
//! Key ordering is deterministic: serde_json object keys are sorted.

use std::fmt;
use std::io::{self, Write};

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace,
    /// Normal operations
    Info,
    /// Recoverable issues
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous structured logger
///
/// Field keys must not collide with the reserved `event` and `severity` keys.
pub struct Logger;

impl Logger {
    /// Logs an event to stdout
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let _ = Self::write_event(&mut io::stdout(), severity, event, fields);
    }

    /// Logs an event to stderr
    pub fn log_stderr(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let _ = Self::write_event(&mut io::stderr(), severity, event, fields);
    }

    fn write_event<W: Write>(
        writer: &mut W,
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
    ) -> io::Result<()> {
        let mut record = Map::new();
        record.insert("event".to_string(), Value::String(event.to_string()));
        record.insert(
            "severity".to_string(),
            Value::String(severity.as_str().to_string()),
        );
        for (key, value) in fields {
            record.insert((*key).to_string(), Value::String((*value).to_string()));
        }

        writeln!(writer, "{}", Value::Object(record))?;
        writer.flush()
    }
}
