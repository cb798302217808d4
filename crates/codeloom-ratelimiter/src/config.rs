use crate::events::{IdentityClass, RateLimiterEvent};
use codeloom_core::EventListeners;
use std::time::Duration;

/// Configuration for a [`crate::RateLimiter`].
pub struct RateLimiterConfig {
    pub(crate) capacity: i64,
    pub(crate) window: Duration,
    pub(crate) event_listeners: EventListeners<RateLimiterEvent>,
    pub(crate) name: String,
}

impl RateLimiterConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RateLimiterConfigBuilder {
        RateLimiterConfigBuilder::new()
    }
}

/// Builder for [`RateLimiterConfig`].
pub struct RateLimiterConfigBuilder {
    capacity: i64,
    window: Duration,
    event_listeners: EventListeners<RateLimiterEvent>,
    name: String,
}

impl Default for RateLimiterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterConfigBuilder {
    /// Creates a new builder with defaults.
    ///
    /// Defaults:
    /// - capacity: 50 tokens
    /// - window: 1 second
    /// - name: `"<unnamed>"`
    pub fn new() -> Self {
        Self {
            capacity: 50,
            window: Duration::from_secs(1),
            event_listeners: EventListeners::new(),
            name: "<unnamed>".to_string(),
        }
    }

    /// Sets the bucket capacity, i.e. the number of requests allowed per
    /// `window` once fully refilled.
    ///
    /// Zero or negative values are accepted and make every check deny: a
    /// misconfigured limiter fails closed rather than dividing by zero.
    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the refill window: how long it takes an empty bucket to refill
    /// to capacity under continuous refill.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Sets the name for this rate limiter instance (used in events and
    /// metrics labels).
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback invoked when a permit is consumed.
    pub fn on_permit_acquired<F>(mut self, f: F) -> Self
    where
        F: Fn(IdentityClass, usize) + Send + Sync + 'static,
    {
        use codeloom_core::FnListener;
        self.event_listeners
            .add(FnListener::new(move |event: &RateLimiterEvent| {
                if let RateLimiterEvent::PermitAcquired {
                    identity_class,
                    remaining,
                    ..
                } = event
                {
                    f(*identity_class, *remaining);
                }
            }));
        self
    }

    /// Registers a callback invoked when a check is denied.
    pub fn on_permit_denied<F>(mut self, f: F) -> Self
    where
        F: Fn(IdentityClass) + Send + Sync + 'static,
    {
        use codeloom_core::FnListener;
        self.event_listeners
            .add(FnListener::new(move |event: &RateLimiterEvent| {
                if let RateLimiterEvent::PermitDenied { identity_class, .. } = event {
                    f(*identity_class);
                }
            }));
        self
    }

    /// Registers a callback invoked when a bucket is reset by an admin.
    pub fn on_quota_reset<F>(mut self, f: F) -> Self
    where
        F: Fn(IdentityClass) + Send + Sync + 'static,
    {
        use codeloom_core::FnListener;
        self.event_listeners
            .add(FnListener::new(move |event: &RateLimiterEvent| {
                if let RateLimiterEvent::QuotaReset { identity_class, .. } = event {
                    f(*identity_class);
                }
            }));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> RateLimiterConfig {
        RateLimiterConfig {
            capacity: self.capacity,
            window: self.window,
            event_listeners: self.event_listeners,
            name: self.name,
        }
    }
}
