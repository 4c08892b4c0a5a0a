//! Structured log records as produced by the logging framework.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Lowercase name of the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured log entry handed to the sink.
///
/// `message` is a template; each `{}` placeholder is substituted with the
/// corresponding entry of `args` when the record is rendered.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub level: Level,
    /// Dot-separated logger category, e.g. `"app.auth"`.
    pub category: String,
    pub message: String,
    /// Values interpolated into the message template.
    pub args: Vec<Value>,
}

impl LogRecord {
    /// Creates a record stamped with the current wall-clock time.
    #[must_use]
    pub fn new(level: Level, category: impl Into<String>, message: impl Into<String>) -> Self {
        LogRecord {
            timestamp: now_millis(),
            level,
            category: category.into(),
            message: message.into(),
            args: Vec::new(),
        }
    }

    /// Attaches interpolation arguments to the record.
    #[must_use]
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
