//! Point-in-time cache statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically non-decreasing (except via the sweeper resetting nothing —
/// only `ResetStats`, which this crate does not expose, would zero these)
/// counters, guarded by their own atomics so read-heavy `Stats()` traffic
/// never contends with `Get`.
#[derive(Default)]
pub(crate) struct StatsInner {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl StatsInner {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_evictions(&self, count: u64) {
        self.evictions.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, current_size: usize) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total_requests = hits + misses;
        let hit_rate = if total_requests == 0 {
            0.0
        } else {
            (hits as f64 / total_requests as f64) * 100.0
        };

        CacheStats {
            hits,
            misses,
            evictions: self.evictions.load(Ordering::Relaxed),
            total_requests,
            current_size,
            hit_rate,
        }
    }
}

/// A point-in-time snapshot of cache hit/miss/eviction counters.
///
/// `total_requests = hits + misses` holds for the lifetime of the cache;
/// `Clear` preserves these counters (see §9 open question in the
/// specification this crate implements) — only dropping `current_size` to
/// zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_requests: u64,
    pub current_size: usize,
    /// `hits / total_requests * 100`, or `0` when `total_requests == 0`.
    pub hit_rate: f64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} evictions={} size={} hit_rate={:.1}%",
            self.hits, self.misses, self.evictions, self.current_size, self.hit_rate
        )
    }
}
