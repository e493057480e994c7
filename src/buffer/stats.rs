//! Replacer statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what the replacer has done.
///
/// All fields are atomic and use `Ordering::Relaxed`: the counters are
/// independent of each other and never feed back into eviction decisions,
/// so only atomicity is needed.
///
/// Counters are bumped after the replacer latch is released. A snapshot taken
/// while other threads are mid-call may lag behind `size()` and
/// `tracked_count()`; the counters only settle once calls quiesce.
///
/// # Example
/// ```
/// use lruk_replacer::ReplacerStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = ReplacerStats::new();
/// stats.evictions.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.snapshot().evictions, 1);
/// ```
#[derive(Debug, Default)]
pub struct ReplacerStats {
    /// Number of recorded accesses.
    pub accesses: AtomicU64,

    /// Number of frames promoted from the history queue to the cache queue.
    pub promotions: AtomicU64,

    /// Number of victims handed out by `evict`.
    pub evictions: AtomicU64,

    /// Number of `evict` calls that found no evictable frame.
    pub failed_evictions: AtomicU64,

    /// Number of frames dropped through `remove`.
    pub removals: AtomicU64,
}

impl ReplacerStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a plain copy of the current counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            accesses: self.accesses.load(Ordering::Relaxed),
            promotions: self.promotions.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            failed_evictions: self.failed_evictions.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.accesses.store(0, Ordering::Relaxed);
        self.promotions.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.failed_evictions.store(0, Ordering::Relaxed);
        self.removals.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time copy of [`ReplacerStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub accesses: u64,
    pub promotions: u64,
    pub evictions: u64,
    pub failed_evictions: u64,
    pub removals: u64,
}

impl StatsSnapshot {
    /// Fraction of `evict` calls that produced a victim (0.0 to 1.0).
    pub fn eviction_success_rate(&self) -> f64 {
        let attempts = self.evictions + self.failed_evictions;
        if attempts == 0 {
            0.0
        } else {
            self.evictions as f64 / attempts as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ accesses: {}, promotions: {}, evictions: {}, failed: {}, removals: {}, success_rate: {:.2}% }}",
            self.accesses,
            self.promotions,
            self.evictions,
            self.failed_evictions,
            self.removals,
            self.eviction_success_rate() * 100.0
        )
    }
}
