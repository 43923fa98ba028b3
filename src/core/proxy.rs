//! Lazily-resolving forwarding handle

use super::{
    cache::HandleCache,
    error::Result,
    handle::{Handle, PropertyValue, RESERVED_PROBE_PROPERTY},
    key::HandleKey,
};
use std::fmt;
use std::sync::Arc;

/// Stand-in for the real handle of one (namespace, environment) pair.
///
/// Holds only its key and the collection's cache. The first forwarded access
/// (a call, a property read or a property write) asks the provider for the
/// real handle; every access after that reuses the cached one. Values are
/// always read from the real handle at access time, never snapshotted.
///
/// ```
/// use hello_debug::prelude::*;
/// use hello_debug::debug;
///
/// let hello = Hello::new(["app"], ["dev"]);
/// let dev = &hello["app"]["dev"];
///
/// assert!(!dev.is_resolved());
/// dev.set_enabled(true)?;
/// assert!(dev.is_resolved());
/// assert_eq!(dev.namespace()?, "app:dev");
///
/// debug!(dev, "listening on {}", 8080)?;
/// # Ok::<(), DebugError>(())
/// ```
#[derive(Clone)]
pub struct ProxyHandle {
    key: HandleKey,
    cache: Arc<HandleCache>,
}

impl ProxyHandle {
    pub(crate) fn new(key: HandleKey, cache: Arc<HandleCache>) -> Self {
        Self { key, cache }
    }

    /// The pair this proxy stands for; never resolves
    #[inline]
    pub fn key(&self) -> &HandleKey {
        &self.key
    }

    /// Whether the real handle has been created yet; never resolves
    pub fn is_resolved(&self) -> bool {
        self.cache.contains(&self.key)
    }

    /// The real handle, created on first use
    pub fn resolve(&self) -> Result<Arc<dyn Handle>> {
        self.cache.resolve(&self.key)
    }

    /// Forward a call to the real handle
    pub fn log(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.resolve()?.log(args)
    }

    pub fn enabled(&self) -> Result<bool> {
        Ok(self.resolve()?.enabled())
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.resolve()?.set_enabled(enabled);
        Ok(())
    }

    pub fn namespace(&self) -> Result<String> {
        Ok(self.resolve()?.namespace().to_string())
    }

    /// Read any named property of the real handle.
    ///
    /// [`RESERVED_PROBE_PROPERTY`] always reads as absent and does not
    /// resolve the handle.
    pub fn property(&self, name: &str) -> Result<Option<PropertyValue>> {
        if name == RESERVED_PROBE_PROPERTY {
            return Ok(None);
        }
        Ok(self.resolve()?.property(name))
    }

    /// Write any named property through to the real handle
    pub fn set_property(&self, name: &str, value: impl Into<PropertyValue>) -> Result<()> {
        self.resolve()?.set_property(name, value.into())
    }

    /// Whether two proxies share the same cache and key
    pub fn same_handle(&self, other: &ProxyHandle) -> bool {
        self.key == other.key && Arc::ptr_eq(&self.cache, &other.cache)
    }
}

impl fmt::Debug for ProxyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyHandle")
            .field("key", &self.key.as_str())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
