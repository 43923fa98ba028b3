//! # hello_debug
//!
//! Namespace x environment collections of lazily-created debug loggers.
//!
//! ```
//! use hello_debug::prelude::*;
//! use hello_debug::debug;
//!
//! let logger = Hello::new(["app", "api", "db"], ["dev", "prod", "test"]);
//!
//! // Nothing has been created yet; `DEBUG=app:dev` (read at call time)
//! // decides what prints.
//! debug!(logger["app"]["dev"], "Starting application in development mode")?;
//!
//! // Force one pair on regardless of `DEBUG`.
//! logger["app"]["test"].set_enabled(true)?;
//! debug!(logger["app"]["test"], "Running tests...")?;
//! # Ok::<(), DebugError>(())
//! ```
//!
//! ## Features
//!
//! - **Lazy**: building a collection calls no provider; each real handle is
//!   created on first use and reused afterwards
//! - **Transparent**: proxies forward calls and property reads/writes, so
//!   `enabled` follows `DEBUG` changes made after construction
//! - **Injectable**: any [`HandleProvider`] can replace the default
//!   [`DebugProvider`]
//! - **Thread Safe**: concurrent first accesses still create one handle

pub mod appenders;
pub mod core;
pub mod debugger;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, JsonAppender};
    pub use crate::core::{
        create_debug_patterns, Appender, CacheMetrics, DebugEntry, DebugError, Environments,
        Handle, HandleKey, HandleProvider, Hello, HelloBuilder, OutputFormat, PropertyValue,
        ProxyHandle, Result, SharedProvider, Sink, SinkMetrics, TimestampFormat,
        RESERVED_PROBE_PROPERTY,
    };
    pub use crate::debugger::{DebugConfig, DebugFilter, DebugProvider, Debugger};
}

pub use appenders::{ConsoleAppender, FileAppender, JsonAppender};
pub use core::{
    create_debug_patterns, Appender, CacheMetrics, DebugEntry, DebugError, Environments, Handle,
    HandleCache, HandleKey, HandleProvider, Hello, HelloBuilder, OutputFormat, PropertyValue,
    ProxyHandle, Result, SharedProvider, Sink, SinkMetrics, TimestampFormat, KEY_DELIMITER,
    RESERVED_PROBE_PROPERTY,
};
pub use debugger::{DebugConfig, DebugFilter, DebugProvider, Debugger};
