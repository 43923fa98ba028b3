//! Synchronous fan-out of debug entries to appenders

use super::{
    appender::Appender,
    entry::DebugEntry,
    error::{DebugError, Result},
    metrics::SinkMetrics,
};
use parking_lot::RwLock;
use std::any::Any;

/// Shared output of every [`Debugger`](crate::Debugger) created by one
/// provider.
///
/// Writes are synchronous. Each appender is isolated from the others: an
/// appender that errors or panics does not stop the remaining appenders from
/// receiving the entry, but the first failure is still returned to the
/// caller that emitted the line.
pub struct Sink {
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    metrics: SinkMetrics,
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Sink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            appenders: RwLock::new(Vec::new()),
            metrics: SinkMetrics::new(),
        }
    }

    /// Add an appender (builder form)
    #[must_use = "builder methods return a new value"]
    pub fn with_appender<A: Appender + 'static>(self, appender: A) -> Self {
        self.add_appender(Box::new(appender));
        self
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    pub fn appender_names(&self) -> Vec<String> {
        self.appenders
            .read()
            .iter()
            .map(|appender| appender.name().to_string())
            .collect()
    }

    /// Write `entry` to every appender
    pub fn write(&self, entry: &DebugEntry) -> Result<()> {
        let mut appenders = self.appenders.write();
        let mut first_error = None;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            let failure = match append_result {
                Ok(Ok(())) => None,
                Ok(Err(e)) => {
                    eprintln!(
                        "[DEBUG ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    Some(e)
                }
                Err(panic_info) => {
                    let message = panic_message(&*panic_info);
                    eprintln!(
                        "[DEBUG CRITICAL] Appender #{} ({}) panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        appender.name(),
                        message
                    );
                    Some(DebugError::AppenderPanicked {
                        appender: appender.name().to_string(),
                        message,
                    })
                }
            };

            if let Some(e) = failure {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            None => {
                self.metrics.record_written();
                Ok(())
            }
            Some(e) => {
                self.metrics.record_failed();
                Err(e)
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[DEBUG ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}
