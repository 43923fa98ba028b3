//! Lazily populated key -> handle cache

use super::{
    error::Result, handle::Handle, key::HandleKey, metrics::CacheMetrics,
    provider::SharedProvider,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// One key's handle plus the gate serializing its creation
#[derive(Default)]
struct Slot {
    handle: OnceLock<Arc<dyn Handle>>,
    init: Mutex<()>,
}

/// Cache of real handles owned by one collection.
///
/// Entries are inserted on first resolution and never removed. Creation for
/// a key runs under that key's own gate, so concurrent first accesses to a
/// key still call the provider once while other keys resolve in parallel.
/// The provider must not re-enter the cache for the key it is creating.
pub struct HandleCache {
    slots: Mutex<HashMap<HandleKey, Arc<Slot>>>,
    provider: SharedProvider,
    metrics: CacheMetrics,
}

impl HandleCache {
    pub fn new(provider: SharedProvider) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            provider,
            metrics: CacheMetrics::new(),
        }
    }

    fn slot(&self, key: &HandleKey) -> Arc<Slot> {
        let mut slots = self.slots.lock();
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Return the cached handle for `key`, creating it on first use.
    ///
    /// A provider error is returned as-is and nothing is cached, so the next
    /// call asks the provider again.
    pub fn resolve(&self, key: &HandleKey) -> Result<Arc<dyn Handle>> {
        let slot = self.slot(key);
        if let Some(handle) = slot.handle.get() {
            self.metrics.record_hit();
            return Ok(Arc::clone(handle));
        }

        let _gate = slot.init.lock();
        if let Some(handle) = slot.handle.get() {
            self.metrics.record_hit();
            return Ok(Arc::clone(handle));
        }

        let handle = match self.provider.provide(key.as_str()) {
            Ok(handle) => handle,
            Err(e) => {
                self.metrics.record_provider_failure();
                return Err(e);
            }
        };

        self.metrics.record_resolved();
        let _ = slot.handle.set(Arc::clone(&handle));
        Ok(handle)
    }

    /// Cached handle for `key`, without ever invoking the provider
    pub fn peek(&self, key: &HandleKey) -> Option<Arc<dyn Handle>> {
        self.slots
            .lock()
            .get(key)
            .and_then(|slot| slot.handle.get().cloned())
    }

    pub fn contains(&self, key: &HandleKey) -> bool {
        self.peek(key).is_some()
    }

    /// Number of handles created so far
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.handle.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl fmt::Debug for HandleCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.lock();
        let mut keys: Vec<&str> = slots
            .iter()
            .filter(|(_, slot)| slot.handle.get().is_some())
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();

        f.debug_struct("HandleCache")
            .field("resolved", &keys)
            .field("metrics", &self.metrics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DebugError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct Stub {
        namespace: String,
        enabled: AtomicBool,
    }

    impl Handle for Stub {
        fn log(&self, _args: fmt::Arguments<'_>) -> Result<()> {
            Ok(())
        }

        fn enabled(&self) -> bool {
            self.enabled.load(Ordering::Relaxed)
        }

        fn set_enabled(&self, enabled: bool) {
            self.enabled.store(enabled, Ordering::Relaxed);
        }

        fn namespace(&self) -> &str {
            &self.namespace
        }
    }

    fn counting_provider(calls: Arc<AtomicUsize>) -> SharedProvider {
        Arc::new(move |key: &str| -> Result<Arc<dyn Handle>> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Stub {
                namespace: key.to_string(),
                enabled: AtomicBool::new(false),
            }))
        })
    }

    #[test]
    fn test_resolve_creates_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = HandleCache::new(counting_provider(Arc::clone(&calls)));
        let key = HandleKey::new("app", "dev");

        assert!(cache.is_empty());
        let first = cache.resolve(&key).unwrap();
        let second = cache.resolve(&key).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.namespace(), "app:dev");
        assert_eq!(cache.metrics().resolved(), 1);
        assert_eq!(cache.metrics().hits(), 1);
    }

    #[test]
    fn test_peek_does_not_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = HandleCache::new(counting_provider(Arc::clone(&calls)));
        let key = HandleKey::new("api", "prod");

        assert!(cache.peek(&key).is_none());
        assert!(!cache.contains(&key));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        cache.resolve(&key).unwrap();
        assert!(cache.peek(&key).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_resolution_is_not_cached() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = Arc::clone(&attempts);
        let cache = HandleCache::new(Arc::new(move |key: &str| -> Result<Arc<dyn Handle>> {
            attempts_clone.fetch_add(1, Ordering::SeqCst);
            Err(DebugError::provider(key, "unavailable"))
        }));
        let key = HandleKey::new("db", "test");

        assert!(cache.resolve(&key).is_err());
        assert!(cache.resolve(&key).is_err());

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(cache.metrics().provider_failures(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_pairs_sharing_a_key_share_a_handle() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = HandleCache::new(counting_provider(Arc::clone(&calls)));

        let first = cache.resolve(&HandleKey::new("a:b", "c")).unwrap();
        let second = cache.resolve(&HandleKey::new("a", "b:c")).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_slow_creation_does_not_block_other_keys() {
        use std::sync::mpsc;
        use std::thread;

        let (entered_tx, entered_rx) = mpsc::channel::<()>();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let entered_tx = Mutex::new(entered_tx);
        let release_rx = Mutex::new(release_rx);

        let cache = Arc::new(HandleCache::new(Arc::new(
            move |key: &str| -> Result<Arc<dyn Handle>> {
                if key == "db:slow" {
                    let _ = entered_tx.lock().send(());
                    let _ = release_rx.lock().recv();
                }
                Ok(Arc::new(Stub {
                    namespace: key.to_string(),
                    enabled: AtomicBool::new(false),
                }))
            },
        )));

        let slow = {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.resolve(&HandleKey::new("db", "slow")))
        };
        entered_rx.recv().expect("slow provider started");

        // Would deadlock if creation held a cache-wide lock
        let fast = cache.resolve(&HandleKey::new("app", "fast")).unwrap();
        assert_eq!(fast.namespace(), "app:fast");
        assert!(!cache.contains(&HandleKey::new("db", "slow")));

        release_tx.send(()).expect("slow provider waiting");
        let slow = slow.join().expect("thread panicked").unwrap();
        assert_eq!(slow.namespace(), "db:slow");
        assert_eq!(cache.len(), 2);
    }
}
