//! Handle collections, forwarding proxies and the output sink

pub mod appender;
pub mod cache;
pub mod entry;
pub mod error;
pub mod handle;
pub mod hello;
pub mod key;
pub mod metrics;
pub mod output_format;
pub mod provider;
pub mod proxy;
pub mod sink;
pub mod timestamp;

pub use appender::Appender;
pub use cache::HandleCache;
pub use entry::DebugEntry;
pub use error::{DebugError, Result};
pub use handle::{Handle, PropertyValue, RESERVED_PROBE_PROPERTY};
pub use hello::{create_debug_patterns, Environments, Hello, HelloBuilder};
pub use key::{HandleKey, KEY_DELIMITER};
pub use metrics::{CacheMetrics, SinkMetrics};
pub use output_format::OutputFormat;
pub use provider::{HandleProvider, SharedProvider};
pub use proxy::ProxyHandle;
pub use sink::Sink;
pub use timestamp::TimestampFormat;
