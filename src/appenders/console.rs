//! Console (stderr) appender

use crate::core::{Appender, DebugEntry, OutputFormat, Result, TimestampFormat};
use crate::debugger::color::ansi_color;
use crate::debugger::DebugConfig;
use colored::Colorize;
use std::io::Write;

/// Writes entries to stderr.
///
/// Entries from handles with colors on render as `  ns message +Nms` with the
/// namespace in its color; everything else goes through [`OutputFormat`].
pub struct ConsoleAppender {
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
    hide_date: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
            hide_date: false,
        }
    }

    pub fn from_config(config: &DebugConfig) -> Self {
        Self {
            timestamp_format: config.timestamp_format.clone(),
            output_format: config.output_format.clone(),
            hide_date: config.hide_date,
        }
    }

    /// Set the output format for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use hello_debug::appenders::ConsoleAppender;
    /// use hello_debug::OutputFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_hide_date(mut self, hide_date: bool) -> Self {
        self.hide_date = hide_date;
        self
    }

    /// The line that `append` would write, without the trailing newline
    pub fn render(&self, entry: &DebugEntry) -> String {
        if entry.colored && self.output_format == OutputFormat::Text {
            return self.format_colored(entry);
        }

        let timestamp = (!self.hide_date).then_some(&self.timestamp_format);
        self.output_format.format(entry, timestamp)
    }

    fn format_colored(&self, entry: &DebugEntry) -> String {
        let color = ansi_color(entry.color);
        format!(
            "  {} {} {}",
            entry.namespace.color(color).bold(),
            entry.message,
            entry.humanized_diff().color(color)
        )
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &DebugEntry) -> Result<()> {
        let line = self.render(entry);
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
