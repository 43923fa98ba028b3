//! Line formats for debug entries
//!
//! - Text: `2025-01-08T10:30:45.123Z app:dev message` (the debug default when
//!   output is not a color terminal)
//! - Json: one object per line
//! - Logfmt: `key=value` pairs

use super::entry::DebugEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Logfmt,
}

impl OutputFormat {
    /// Format `entry`; `None` for the timestamp omits the date entirely
    pub fn format(&self, entry: &DebugEntry, timestamp: Option<&TimestampFormat>) -> String {
        match self {
            OutputFormat::Text => self.format_text(entry, timestamp),
            OutputFormat::Json => self.format_json(entry, timestamp),
            OutputFormat::Logfmt => self.format_logfmt(entry, timestamp),
        }
    }

    fn format_text(&self, entry: &DebugEntry, timestamp: Option<&TimestampFormat>) -> String {
        match timestamp {
            Some(format) => format!(
                "{} {} {}",
                format.format(&entry.timestamp),
                entry.namespace,
                entry.message
            ),
            None => format!("{} {}", entry.namespace, entry.message),
        }
    }

    fn format_json(&self, entry: &DebugEntry, timestamp: Option<&TimestampFormat>) -> String {
        let mut json_obj = serde_json::Map::new();

        if let Some(format) = timestamp {
            let value = if format.is_numeric() {
                serde_json::Value::Number(entry.timestamp.timestamp_millis().into())
            } else {
                serde_json::Value::String(format.format(&entry.timestamp))
            };
            json_obj.insert("timestamp".to_string(), value);
        }

        json_obj.insert(
            "namespace".to_string(),
            serde_json::Value::String(entry.namespace.clone()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(entry.message.clone()),
        );
        json_obj.insert(
            "diff_ms".to_string(),
            serde_json::Value::Number(entry.diff_ms.into()),
        );
        json_obj.insert(
            "thread_id".to_string(),
            serde_json::Value::String(entry.thread_id.clone()),
        );
        if let Some(ref name) = entry.thread_name {
            json_obj.insert(
                "thread_name".to_string(),
                serde_json::Value::String(name.clone()),
            );
        }

        serde_json::Value::Object(json_obj).to_string()
    }

    fn format_logfmt(&self, entry: &DebugEntry, timestamp: Option<&TimestampFormat>) -> String {
        let mut parts = Vec::new();

        if let Some(format) = timestamp {
            parts.push(format!(
                "timestamp={}",
                self.escape_logfmt_value(&format.format(&entry.timestamp))
            ));
        }
        parts.push(format!(
            "namespace={}",
            self.escape_logfmt_value(&entry.namespace)
        ));
        parts.push(format!("message={}", self.quote_logfmt_value(&entry.message)));
        parts.push(format!("diff_ms={}", entry.diff_ms));
        parts.push(format!(
            "thread_id={}",
            self.escape_logfmt_value(&entry.thread_id)
        ));

        parts.join(" ")
    }

    /// Quote a logfmt value if it contains spaces, quotes or `=`
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.contains(' ') || value.contains('"') || value.contains('=') {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_logfmt_value(&self, value: &str) -> String {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
