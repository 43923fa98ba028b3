//! Output destinations for debug entries

use super::{entry::DebugEntry, error::Result};

/// Where a [`Sink`](super::Sink) writes entries.
///
/// `append` is only called for entries whose handle was enabled at the time
/// of the call; appenders do no filtering of their own.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &DebugEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
