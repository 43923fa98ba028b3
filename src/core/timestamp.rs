//! Timestamp rendering for non-colored output
//!
//! Colored terminal output shows a relative `+Nms` diff instead of a date;
//! every other output path prefixes lines with one of these formats.

use super::error::{DebugError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const ISO8601_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 with offset: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Any strftime-compatible format string
    Custom(String),
}

impl TimestampFormat {
    /// Validated [`TimestampFormat::Custom`]
    ///
    /// ```
    /// use hello_debug::TimestampFormat;
    ///
    /// assert!(TimestampFormat::custom("%H:%M:%S").is_ok());
    /// assert!(TimestampFormat::custom("%Q").is_err());
    /// ```
    pub fn custom(format: impl Into<String>) -> Result<Self> {
        let format = Self::Custom(format.into());
        format.validate()?;
        Ok(format)
    }

    /// Reject custom strings chrono cannot render
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(format_str) = self {
            if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
                return Err(DebugError::InvalidTimestampFormat(format_str.clone()));
            }
        }
        Ok(())
    }

    /// Render `datetime` in this format.
    ///
    /// An invalid custom string renders as ISO 8601 instead.
    ///
    /// ```
    /// use hello_debug::TimestampFormat;
    /// use chrono::Utc;
    ///
    /// assert!(TimestampFormat::Iso8601.format(&Utc::now()).ends_with('Z'));
    /// ```
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format(ISO8601_MILLIS).to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => datetime.format(ISO8601_MILLIS).to_string(),
                }
            }
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::UnixMillis)
    }
}
