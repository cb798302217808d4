//! Events emitted by the result cache.

use codeloom_core::{ResilienceEvent, ReviewMode};
use std::time::Instant;

/// Observability events emitted by [`crate::ResultCache`].
#[derive(Debug, Clone)]
pub enum CacheEvent {
    /// A `get` found a live entry for the key.
    Hit {
        pattern_name: String,
        timestamp: Instant,
        review_id: i64,
        mode: ReviewMode,
    },
    /// A `get` found no live entry for the key (absent or expired).
    Miss {
        pattern_name: String,
        timestamp: Instant,
        review_id: i64,
        mode: ReviewMode,
    },
    /// The periodic sweeper removed one or more expired entries.
    Eviction {
        pattern_name: String,
        timestamp: Instant,
        count: usize,
    },
}

impl ResilienceEvent for CacheEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Hit { .. } => "hit",
            Self::Miss { .. } => "miss",
            Self::Eviction { .. } => "eviction",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            Self::Hit { timestamp, .. }
            | Self::Miss { timestamp, .. }
            | Self::Eviction { timestamp, .. } => *timestamp,
        }
    }

    fn pattern_name(&self) -> &str {
        match self {
            Self::Hit { pattern_name, .. }
            | Self::Miss { pattern_name, .. }
            | Self::Eviction { pattern_name, .. } => pattern_name,
        }
    }
}
