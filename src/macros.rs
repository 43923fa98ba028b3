//! Formatting macro for emitting through any handle.
//!
//! Works on a [`ProxyHandle`](crate::ProxyHandle), a
//! [`Debugger`](crate::Debugger) or any other [`Handle`](crate::Handle), and
//! evaluates to the handle's `Result<()>`.
//!
//! # Examples
//!
//! ```
//! use hello_debug::prelude::*;
//! use hello_debug::debug;
//!
//! let hello = Hello::new(["app"], ["dev"]);
//!
//! debug!(hello["app"]["dev"], "Server started")?;
//!
//! let port = 8080;
//! debug!(hello["app"]["dev"], "Server listening on port {}", port)?;
//! # Ok::<(), DebugError>(())
//! ```

/// Emit one formatted line through a handle.
///
/// ```
/// # use hello_debug::prelude::*;
/// use hello_debug::debug;
///
/// let provider = DebugProvider::new(DebugConfig::new().with_env_var("MACRO_DOC_DEBUG"));
/// let db = provider.create("db:dev");
/// debug!(db, "connected to {} in {}ms", "primary", 12)?;
/// # Ok::<(), DebugError>(())
/// ```
#[macro_export]
macro_rules! debug {
    ($handle:expr, $($arg:tt)+) => {
        $handle.log(format_args!($($arg)+))
    };
}
