//! Configuration of the default debug provider
//!
//! Read once, when the provider is built. The filter patterns themselves are
//! not part of the config: they are read from `env_var` on every `enabled`
//! check.

use crate::core::{OutputFormat, TimestampFormat};
use std::io::IsTerminal;

/// Variable holding the filter patterns unless configured otherwise
pub const DEFAULT_ENV_VAR: &str = "DEBUG";

/// Forces colored output on or off
pub const COLORS_ENV_VAR: &str = "DEBUG_COLORS";

/// Drops the date prefix from non-colored output
pub const HIDE_DATE_ENV_VAR: &str = "DEBUG_HIDE_DATE";

/// Parse a boolean-ish environment value.
///
/// `yes|on|true|enabled` and `no|off|false|disabled` (any case), plus a
/// numeric fallback where zero is false. Anything else is `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "yes" | "on" | "true" | "enabled" => Some(true),
        "no" | "off" | "false" | "disabled" => Some(false),
        other => other.parse::<f64>().ok().map(|n| n != 0.0),
    }
}

/// Settings for [`DebugProvider`](super::DebugProvider)
///
/// # Examples
///
/// ```
/// use hello_debug::{DebugConfig, OutputFormat};
///
/// let config = DebugConfig::new()
///     .with_env_var("APP_DEBUG")
///     .with_colors(false)
///     .with_output_format(OutputFormat::Logfmt);
///
/// assert_eq!(config.env_var, "APP_DEBUG");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DebugConfig {
    /// Environment variable read for filter patterns
    pub env_var: String,
    /// Colored `ns message +Nms` output on the console
    pub use_colors: bool,
    /// Omit the date prefix from non-colored output
    pub hide_date: bool,
    pub timestamp_format: TimestampFormat,
    pub output_format: OutputFormat,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_ENV_VAR.to_string(),
            use_colors: std::io::stderr().is_terminal(),
            hide_date: false,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }
}

impl DebugConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `DEBUG_COLORS` and `DEBUG_HIDE_DATE`
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(colors) = std::env::var(COLORS_ENV_VAR)
            .ok()
            .and_then(|v| parse_env_flag(&v))
        {
            config.use_colors = colors;
        }
        if let Some(hide) = std::env::var(HIDE_DATE_ENV_VAR)
            .ok()
            .and_then(|v| parse_env_flag(&v))
        {
            config.hide_date = hide;
        }

        config
    }

    #[must_use]
    pub fn with_env_var(mut self, env_var: impl Into<String>) -> Self {
        self.env_var = env_var.into();
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_hide_date(mut self, hide_date: bool) -> Self {
        self.hide_date = hide_date;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_flag() {
        assert_eq!(parse_env_flag("yes"), Some(true));
        assert_eq!(parse_env_flag("ON"), Some(true));
        assert_eq!(parse_env_flag(" Enabled "), Some(true));
        assert_eq!(parse_env_flag("off"), Some(false));
        assert_eq!(parse_env_flag("Disabled"), Some(false));
        assert_eq!(parse_env_flag("0"), Some(false));
        assert_eq!(parse_env_flag("1"), Some(true));
        assert_eq!(parse_env_flag("null"), None);
        assert_eq!(parse_env_flag("maybe"), None);
    }

    #[test]
    fn test_builder_methods() {
        let config = DebugConfig::new()
            .with_env_var("MY_DEBUG")
            .with_colors(true)
            .with_hide_date(true)
            .with_timestamp_format(TimestampFormat::UnixMillis)
            .with_output_format(OutputFormat::Json);

        assert_eq!(config.env_var, "MY_DEBUG");
        assert!(config.use_colors);
        assert!(config.hide_date);
        assert_eq!(config.timestamp_format, TimestampFormat::UnixMillis);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_default_env_var() {
        assert_eq!(DebugConfig::default().env_var, DEFAULT_ENV_VAR);
    }
}
