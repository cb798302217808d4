//! Configuration for the result cache.

use crate::events::CacheEvent;
use codeloom_core::{EventListeners, FnListener, ReviewMode};
use std::time::Duration;

/// Configuration for a [`crate::ResultCache`].
pub struct CacheConfig {
    pub(crate) sweep_interval: Duration,
    pub(crate) event_listeners: EventListeners<CacheEvent>,
    pub(crate) name: String,
}

impl CacheConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::new()
    }
}

/// Builder for [`CacheConfig`].
pub struct CacheConfigBuilder {
    sweep_interval: Duration,
    event_listeners: EventListeners<CacheEvent>,
    name: String,
}

impl CacheConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            sweep_interval: Duration::from_secs(60),
            event_listeners: EventListeners::new(),
            name: String::from("<unnamed>"),
        }
    }

    /// Sets how often the background sweeper scans for expired entries.
    ///
    /// Default: 60 seconds.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Gives this cache a human-readable name for observability.
    ///
    /// Default: `<unnamed>`
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback for cache hit events.
    pub fn on_hit<F>(mut self, f: F) -> Self
    where
        F: Fn(i64, ReviewMode) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event: &CacheEvent| {
            if let CacheEvent::Hit { review_id, mode, .. } = event {
                f(*review_id, mode.clone());
            }
        }));
        self
    }

    /// Registers a callback for cache miss events.
    pub fn on_miss<F>(mut self, f: F) -> Self
    where
        F: Fn(i64, ReviewMode) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event: &CacheEvent| {
            if let CacheEvent::Miss { review_id, mode, .. } = event {
                f(*review_id, mode.clone());
            }
        }));
        self
    }

    /// Registers a callback for sweeper eviction events.
    pub fn on_eviction<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event: &CacheEvent| {
            if let CacheEvent::Eviction { count, .. } = event {
                f(*count);
            }
        }));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> CacheConfig {
        CacheConfig {
            sweep_interval: self.sweep_interval,
            event_listeners: self.event_listeners,
            name: self.name,
        }
    }
}

impl Default for CacheConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = CacheConfig::builder().build();
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.name, "<unnamed>");
    }

    #[test]
    fn builder_custom_values() {
        let config = CacheConfig::builder()
            .sweep_interval(Duration::from_secs(5))
            .name("review-cache")
            .build();
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
        assert_eq!(config.name, "review-cache");
    }
}
