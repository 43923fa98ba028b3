//! Handle provider capability

use super::error::Result;
use super::handle::Handle;
use std::sync::Arc;

/// Creates the real handle for a composite `namespace:environment` key.
///
/// Implemented for plain closures so tests can inject a counting or failing
/// provider without touching process-wide configuration:
///
/// ```
/// use hello_debug::prelude::*;
/// use std::sync::Arc;
///
/// let provider: SharedProvider = Arc::new(|key: &str| -> Result<Arc<dyn Handle>> {
///     Err(DebugError::provider(key, "no backend in this test"))
/// });
/// assert!(provider.provide("app:dev").is_err());
/// ```
pub trait HandleProvider: Send + Sync {
    fn provide(&self, key: &str) -> Result<Arc<dyn Handle>>;
}

impl<F> HandleProvider for F
where
    F: Fn(&str) -> Result<Arc<dyn Handle>> + Send + Sync,
{
    fn provide(&self, key: &str) -> Result<Arc<dyn Handle>> {
        self(key)
    }
}

/// Provider shared between a collection and its cache
pub type SharedProvider = Arc<dyn HandleProvider>;
