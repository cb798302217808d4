//! Entry storage for the result cache.
//!
//! Unlike the teacher's `CacheStore`, there is no eviction policy to choose
//! between: the only way an entry leaves the map is expiry (found by `get`
//! or by the sweeper) or an explicit `delete`/`clear`. The map is a plain
//! `HashMap`, not an LRU/LFU/FIFO-backed structure, because the result
//! cache never bounds itself by entry count, only by TTL.

use chrono::{DateTime, Utc};
use codeloom_core::{AnalysisResult, ReviewMode};
use std::collections::HashMap;

pub(crate) type CacheKey = (i64, ReviewMode);

/// A stored result together with the instant it stops being servable.
#[derive(Clone, Debug)]
pub(crate) struct CacheEntry {
    pub(crate) value: AnalysisResult,
    pub(crate) expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub(crate) fn new(value: AnalysisResult, expires_at: DateTime<Utc>) -> Self {
        Self { value, expires_at }
    }

    pub(crate) fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// The entry map itself, kept as a thin wrapper so `lib.rs` only ever talks
/// in terms of `(review_id, mode)` and never reaches for `HashMap` directly.
#[derive(Default)]
pub(crate) struct EntryMap {
    entries: HashMap<CacheKey, CacheEntry>,
}

impl EntryMap {
    pub(crate) fn get(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<&AnalysisResult> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => Some(&entry.value),
            _ => None,
        }
    }

    pub(crate) fn insert(&mut self, key: CacheKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    pub(crate) fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes every entry expired as of `now`, returning how many were
    /// swept. Used by both the periodic sweeper and an on-demand `get` that
    /// stumbles on a stale entry.
    pub(crate) fn sweep_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }
}
