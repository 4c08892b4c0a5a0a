//! Rendering of structured records into wire text.
//!
//! The sink is agnostic to the rendered shape; it only ships whatever text a
//! [`Formatter`] produces. Two implementations are provided: plain
//! interpolated text ([`TextFormatter`], the default) and one JSON object
//! per record ([`JsonFormatter`]).

use serde_json::Value;

use crate::error::FormatError;
use crate::record::LogRecord;

/// Renders a structured record into the text shipped to the remote API.
pub trait Formatter: Send + Sync {
    fn render(&self, record: &LogRecord) -> Result<String, FormatError>;
}

/// Plain interpolated text.
///
/// Each `{}` placeholder in the message template is substituted in order
/// with one of the record's arguments. String arguments are inserted
/// verbatim, other values as compact JSON. Surplus arguments are appended
/// space-separated; surplus placeholders are left as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn render(&self, record: &LogRecord) -> Result<String, FormatError> {
        Ok(interpolate(&record.message, &record.args))
    }
}

/// One JSON object per record: timestamp, uppercased level, dotted category
/// string and the interpolated message.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn render(&self, record: &LogRecord) -> Result<String, FormatError> {
        let object = serde_json::json!({
            "timestamp": record.timestamp,
            "level": record.level.as_str().to_ascii_uppercase(),
            "category": record.category,
            "message": interpolate(&record.message, &record.args),
        });
        Ok(serde_json::to_string(&object)?)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn interpolate(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(idx) = rest.find("{}") {
        match args.next() {
            Some(value) => {
                out.push_str(&rest[..idx]);
                out.push_str(&render_value(value));
            }
            None => out.push_str(&rest[..idx + 2]),
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);

    for value in args {
        out.push(' ');
        out.push_str(&render_value(value));
    }
    out
}
