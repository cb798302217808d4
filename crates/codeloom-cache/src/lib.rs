//! A TTL result cache keyed by `(review_id, mode)`, fronting the LLM
//! analysis orchestrator.
//!
//! Unlike a generic Tower cache layer keyed by an arbitrary extracted key
//! and bounded by entry count, this cache has one concrete key shape and
//! one eviction rule: an entry is live until `expires_at` and is dropped
//! the moment it isn't, either lazily (discovered by `get`) or by the
//! background sweeper.
//!
//! # Examples
//!
//! ```
//! use codeloom_cache::{CacheConfig, ResultCache};
//! use codeloom_core::{AnalysisResult, ReviewMode};
//! use chrono::Utc;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let cache = ResultCache::new(CacheConfig::builder().name("review-cache").build());
//!
//! let result = AnalysisResult {
//!     review_id: 42,
//!     mode: ReviewMode::Skim,
//!     prompt: "...".into(),
//!     raw_output: "...".into(),
//!     summary: "looks fine".into(),
//!     metadata_json: "{}".into(),
//!     model_used: "qwen2.5-coder".into(),
//!     created_at: Utc::now(),
//! };
//!
//! cache.set(42, ReviewMode::Skim, result.clone(), Duration::from_secs(3600), None).await.unwrap();
//! assert_eq!(cache.get(42, ReviewMode::Skim, None).await.unwrap(), Some(result));
//! # }
//! ```

mod config;
mod events;
mod stats;
mod store;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use events::CacheEvent;
pub use stats::CacheStats;

use chrono::{Duration as ChronoDuration, Utc};
use codeloom_core::{AnalysisResult, Cancellation, CodeloomError, EventListeners, ReviewMode};
use stats::StatsInner;
use std::sync::Arc;
use std::time::{Duration, Instant};
use store::{CacheEntry, CacheKey, EntryMap};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// A TTL-bounded cache of [`AnalysisResult`]s keyed by `(review_id, mode)`.
///
/// The entry map and the stats counters are guarded by separate locks so
/// that reading `stats()` never blocks a `get`/`set` in flight, matching
/// the "stats have a separate mutex" design of the system this cache
/// belongs to.
pub struct ResultCache {
    entries: Arc<RwLock<EntryMap>>,
    stats: Arc<StatsInner>,
    event_listeners: Arc<EventListeners<CacheEvent>>,
    name: String,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl ResultCache {
    /// Creates a cache and starts its background sweeper.
    pub fn new(config: CacheConfig) -> Self {
        let entries: Arc<RwLock<EntryMap>> = Arc::new(RwLock::new(EntryMap::default()));
        let stats = Arc::new(StatsInner::default());
        let event_listeners = Arc::new(config.event_listeners);
        let name = config.name;

        let sweeper = spawn_sweeper(
            Arc::clone(&entries),
            Arc::clone(&stats),
            Arc::clone(&event_listeners),
            name.clone(),
            config.sweep_interval,
        );

        Self {
            entries,
            stats,
            event_listeners,
            name,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    /// Returns the stored result for `(review_id, mode)` if one exists and
    /// has not expired, recording a hit or miss either way.
    pub async fn get(
        &self,
        review_id: i64,
        mode: ReviewMode,
        cancel: Option<&Cancellation>,
    ) -> Result<Option<AnalysisResult>, CodeloomError> {
        if is_cancelled(cancel) {
            return Err(CodeloomError::Cancelled);
        }

        let now = Utc::now();
        let found = {
            let entries = self.entries.read().await;
            entries.get(&(review_id, mode.clone()), now).cloned()
        };
        let hit = found.is_some();

        let event = if hit {
            self.stats.record_hit();
            #[cfg(feature = "metrics")]
            metrics::counter!("codeloom_cache_hits_total", "cache" => self.name.clone()).increment(1);
            CacheEvent::Hit {
                pattern_name: self.name.clone(),
                timestamp: Instant::now(),
                review_id,
                mode,
            }
        } else {
            self.stats.record_miss();
            #[cfg(feature = "metrics")]
            metrics::counter!("codeloom_cache_misses_total", "cache" => self.name.clone()).increment(1);
            CacheEvent::Miss {
                pattern_name: self.name.clone(),
                timestamp: Instant::now(),
                review_id,
                mode,
            }
        };
        self.event_listeners.emit(&event);

        #[cfg(feature = "tracing")]
        tracing::trace!(cache = %self.name, review_id, hit, "cache lookup");

        Ok(found)
    }

    /// Stores `result` under `(review_id, mode)`, expiring after `ttl`.
    pub async fn set(
        &self,
        review_id: i64,
        mode: ReviewMode,
        result: AnalysisResult,
        ttl: Duration,
        cancel: Option<&Cancellation>,
    ) -> Result<(), CodeloomError> {
        if is_cancelled(cancel) {
            return Err(CodeloomError::Cancelled);
        }

        let expires_at = Utc::now()
            + ChronoDuration::from_std(ttl)
                .map_err(|e| CodeloomError::InvalidArgument(e.to_string()))?;

        let key: CacheKey = (review_id, mode);
        let entry = CacheEntry::new(result, expires_at);
        self.entries.write().await.insert(key, entry);
        Ok(())
    }

    /// Removes the entry for `(review_id, mode)` if present.
    pub async fn delete(&self, review_id: i64, mode: ReviewMode) {
        self.entries.write().await.remove(&(review_id, mode));
    }

    /// Drops every entry. Hit/miss/eviction counters are preserved.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Returns a point-in-time snapshot of hit/miss/eviction counters and
    /// current entry count.
    pub async fn stats(&self) -> CacheStats {
        let size = self.entries.read().await.len();
        self.stats.snapshot(size)
    }

    /// Stops the background sweeper. Idempotent: calling this more than
    /// once, or calling it before the cache has ever been read from, is a
    /// no-op. Once stopped, the sweeper will not touch the entry map again.
    pub async fn close(&self) {
        if let Some(handle) = self.sweeper.lock().await.take() {
            handle.abort();
        }
    }
}

fn is_cancelled(cancel: Option<&Cancellation>) -> bool {
    cancel.map(|c| c.is_cancelled()).unwrap_or(false)
}

fn spawn_sweeper(
    entries: Arc<RwLock<EntryMap>>,
    stats: Arc<StatsInner>,
    event_listeners: Arc<EventListeners<CacheEvent>>,
    name: String,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so a freshly created
        // cache doesn't sweep an empty map on tick zero.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let now = Utc::now();
            let swept = entries.write().await.sweep_expired(now);
            if swept > 0 {
                stats.record_evictions(swept as u64);
                event_listeners.emit(&CacheEvent::Eviction {
                    pattern_name: name.clone(),
                    timestamp: Instant::now(),
                    count: swept,
                });
                #[cfg(feature = "tracing")]
                tracing::debug!(cache = %name, count = swept, "swept expired cache entries");
            }
        }
    })
}
