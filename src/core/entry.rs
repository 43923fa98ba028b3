//! One emitted debug line

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

thread_local! {
    static THREAD_LABEL: RefCell<Option<(String, Option<String>)>> = const { RefCell::new(None) };
}

/// Thread id and name, computed once per thread
fn thread_label() -> (String, Option<String>) {
    THREAD_LABEL.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(|| {
                let current = std::thread::current();
                (
                    format!("{:?}", current.id()),
                    current.name().map(String::from),
                )
            })
            .clone()
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugEntry {
    pub namespace: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Milliseconds since the previous entry of the same handle
    pub diff_ms: i64,
    /// ANSI color code assigned to the namespace
    pub color: u8,
    /// Whether the emitting handle asked for colored console output
    #[serde(skip)]
    pub colored: bool,
    pub thread_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
}

impl DebugEntry {
    /// Escape line breaks and tabs so one entry is always one output line
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(namespace: impl Into<String>, message: impl AsRef<str>) -> Self {
        let (thread_id, thread_name) = thread_label();
        Self {
            namespace: namespace.into(),
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Utc::now(),
            diff_ms: 0,
            color: 0,
            colored: false,
            thread_id,
            thread_name,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_diff(mut self, diff_ms: i64) -> Self {
        self.diff_ms = diff_ms;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: u8) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// `+12ms`, `+3s`, `+2m`, `+1h`, `+4d`
    pub fn humanized_diff(&self) -> String {
        const SECOND: i64 = 1000;
        const MINUTE: i64 = SECOND * 60;
        const HOUR: i64 = MINUTE * 60;
        const DAY: i64 = HOUR * 24;

        let ms = self.diff_ms;
        let abs = ms.abs();
        let rounded = |unit: i64| (ms as f64 / unit as f64).round() as i64;

        let human = if abs >= DAY {
            format!("{}d", rounded(DAY))
        } else if abs >= HOUR {
            format!("{}h", rounded(HOUR))
        } else if abs >= MINUTE {
            format!("{}m", rounded(MINUTE))
        } else if abs >= SECOND {
            format!("{}s", rounded(SECOND))
        } else {
            format!("{}ms", ms)
        };

        format!("+{}", human)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_sanitized() {
        let entry = DebugEntry::new("app:dev", "line one\nline two\tend\r");
        assert_eq!(entry.message, "line one\\nline two\\tend\\r");
    }

    #[test]
    fn test_humanized_diff() {
        let entry = DebugEntry::new("app:dev", "x");
        assert_eq!(entry.clone().with_diff(0).humanized_diff(), "+0ms");
        assert_eq!(entry.clone().with_diff(999).humanized_diff(), "+999ms");
        assert_eq!(entry.clone().with_diff(1500).humanized_diff(), "+2s");
        assert_eq!(entry.clone().with_diff(90_000).humanized_diff(), "+2m");
        assert_eq!(entry.clone().with_diff(3_600_000).humanized_diff(), "+1h");
        assert_eq!(entry.with_diff(2 * 86_400_000).humanized_diff(), "+2d");
    }

    #[test]
    fn test_thread_label_cached() {
        let a = DebugEntry::new("a", "x");
        let b = DebugEntry::new("b", "y");
        assert_eq!(a.thread_id, b.thread_id);
    }
}
