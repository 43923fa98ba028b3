//! File appender implementation

use crate::core::{Appender, DebugEntry, OutputFormat, Result, TimestampFormat};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends one plain-text line per entry: `<timestamp> <namespace> <message> +Nms`
pub struct FileAppender {
    writer: BufWriter<File>,
    timestamp_format: TimestampFormat,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hello_debug::appenders::FileAppender;
    /// use hello_debug::TimestampFormat;
    ///
    /// let appender = FileAppender::new("/var/log/app-debug.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &DebugEntry) -> Result<()> {
        let line = OutputFormat::Text.format(entry, Some(&self.timestamp_format));
        writeln!(self.writer, "{} {}", line, entry.humanized_diff())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
