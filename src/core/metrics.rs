//! Counters for handle resolution and sink output
//!
//! Both structs are plain relaxed atomics; they are observability aids and
//! carry no synchronization meaning.

use std::sync::atomic::{AtomicU64, Ordering};

/// Resolution statistics for one handle collection
///
/// # Example
///
/// ```
/// use hello_debug::CacheMetrics;
///
/// let metrics = CacheMetrics::new();
/// metrics.record_resolved();
/// metrics.record_hit();
///
/// assert_eq!(metrics.resolved(), 1);
/// assert_eq!(metrics.hit_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct CacheMetrics {
    /// Provider invocations that produced a handle
    resolved: AtomicU64,

    /// Accesses served from an already cached handle
    hits: AtomicU64,

    /// Provider invocations that returned an error
    provider_failures: AtomicU64,
}

impl CacheMetrics {
    pub const fn new() -> Self {
        Self {
            resolved: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            provider_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn resolved(&self) -> u64 {
        self.resolved.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn provider_failures(&self) -> u64 {
        self.provider_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_resolved(&self) -> u64 {
        self.resolved.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_hit(&self) -> u64 {
        self.hits.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_provider_failure(&self) -> u64 {
        self.provider_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of accesses served from cache, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.resolved() as f64;
        if total == 0.0 {
            0.0
        } else {
            (hits / total) * 100.0
        }
    }
}

impl Default for CacheMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CacheMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            resolved: AtomicU64::new(self.resolved()),
            hits: AtomicU64::new(self.hits()),
            provider_failures: AtomicU64::new(self.provider_failures()),
        }
    }
}

/// Output statistics for a [`Sink`](super::Sink)
#[derive(Debug)]
pub struct SinkMetrics {
    /// Entries every appender accepted
    written: AtomicU64,

    /// Entries at least one appender rejected or panicked on
    failed: AtomicU64,
}

impl SinkMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}

impl Default for SinkMetrics {
    fn default() -> Self {
        Self::new()
    }
}
