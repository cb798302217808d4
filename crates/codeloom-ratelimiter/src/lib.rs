//! A continuous-refill token bucket rate limiter over two independent
//! keyspaces: authenticated user identity and client IP.
//!
//! Each identity gets its own bucket, created lazily on first use with
//! `tokens = capacity`. A top-level lock guards each keyspace's map; once a
//! bucket exists, its own lock lets distinct identities proceed fully in
//! parallel.
//!
//! Unlike the teacher's rate limiter, a check never waits: there is no
//! `timeout_duration`, no sleep, and no window-algorithm to pick between.
//! A denied check returns immediately with the number of seconds until a
//! token will next be available.
//!
//! # Examples
//!
//! ```
//! use codeloom_ratelimiter::{RateLimiter, RateLimiterConfig};
//!
//! let limiter = RateLimiter::new(RateLimiterConfig::builder().capacity(2).build());
//! assert!(limiter.check_limit("user-1").is_ok());
//! assert!(limiter.check_limit("user-1").is_ok());
//! assert!(limiter.check_limit("user-1").is_err());
//! ```
//!
//! ## Feature Flags
//! - `metrics`: `ratelimiter_allowed_total`/`ratelimiter_denied_total`
//!   counters, labeled by identity class
//! - `tracing`: structured logs on denial

mod bucket;
mod config;
mod events;

pub use config::{RateLimiterConfig, RateLimiterConfigBuilder};
pub use events::{IdentityClass, RateLimiterEvent};

use bucket::TokenBucket;
use codeloom_core::CodeloomError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

type BucketMap = Mutex<HashMap<String, Arc<Mutex<TokenBucket>>>>;

/// Rate limits calls by user identity and by client IP, independently.
pub struct RateLimiter {
    config: Arc<RateLimiterConfig>,
    user_buckets: BucketMap,
    ip_buckets: BucketMap,
}

impl RateLimiter {
    /// Creates a new rate limiter. Buckets are created lazily per identity.
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config: Arc::new(config),
            user_buckets: Mutex::new(HashMap::new()),
            ip_buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Atomically tests and consumes one permit for a user identity.
    pub fn check_limit(&self, id: &str) -> Result<(), CodeloomError> {
        self.check(&self.user_buckets, id, IdentityClass::User)
    }

    /// Atomically tests and consumes one permit for a client IP.
    pub fn check_ip_limit(&self, ip: &str) -> Result<(), CodeloomError> {
        self.check(&self.ip_buckets, ip, IdentityClass::Ip)
    }

    /// Returns the remaining whole tokens and the moment the bucket is next
    /// full, for a user identity.
    pub fn get_remaining_quota(&self, id: &str) -> Result<(usize, Instant), CodeloomError> {
        let bucket = self.bucket_for(&self.user_buckets, id)?;
        let mut bucket = bucket.lock().unwrap_or_else(|e| e.into_inner());
        Ok((bucket.remaining(), bucket.reset_at()))
    }

    /// Returns the seconds until a user identity's bucket next has a token
    /// (0 if it already does).
    pub fn get_retry_after_seconds(&self, id: &str) -> Result<u64, CodeloomError> {
        let bucket = self.bucket_for(&self.user_buckets, id)?;
        let mut bucket = bucket.lock().unwrap_or_else(|e| e.into_inner());
        Ok(bucket.retry_after_secs())
    }

    /// Refills a user identity's bucket to capacity immediately. An admin
    /// operation.
    pub fn reset_quota(&self, id: &str) -> Result<(), CodeloomError> {
        let bucket = self.bucket_for(&self.user_buckets, id)?;
        bucket.lock().unwrap_or_else(|e| e.into_inner()).reset();

        let event = RateLimiterEvent::QuotaReset {
            pattern_name: self.config.name.clone(),
            timestamp: Instant::now(),
            identity_class: IdentityClass::User,
        };
        self.config.event_listeners.emit(&event);
        Ok(())
    }

    fn check(&self, map: &BucketMap, key: &str, class: IdentityClass) -> Result<(), CodeloomError> {
        if key.is_empty() {
            return Err(CodeloomError::InvalidArgument(format!(
                "{class} identifier must not be empty"
            )));
        }

        let bucket = self.bucket_for(map, key)?;
        let (permitted, remaining) = {
            let mut bucket = bucket.lock().unwrap_or_else(|e| e.into_inner());
            let permitted = bucket.try_consume();
            (permitted, bucket.remaining())
        };

        if permitted {
            #[cfg(feature = "metrics")]
            metrics::counter!(
                "ratelimiter_allowed_total",
                "limiter" => self.config.name.clone(),
                "identity_class" => class.as_str()
            )
            .increment(1);

            let event = RateLimiterEvent::PermitAcquired {
                pattern_name: self.config.name.clone(),
                timestamp: Instant::now(),
                identity_class: class,
                remaining,
            };
            self.config.event_listeners.emit(&event);
            Ok(())
        } else {
            #[cfg(feature = "metrics")]
            metrics::counter!(
                "ratelimiter_denied_total",
                "limiter" => self.config.name.clone(),
                "identity_class" => class.as_str()
            )
            .increment(1);

            #[cfg(feature = "tracing")]
            tracing::debug!(limiter = %self.config.name, %class, "rate limit exceeded");

            let event = RateLimiterEvent::PermitDenied {
                pattern_name: self.config.name.clone(),
                timestamp: Instant::now(),
                identity_class: class,
            };
            self.config.event_listeners.emit(&event);

            let retry_after_secs = {
                let mut bucket = bucket.lock().unwrap_or_else(|e| e.into_inner());
                bucket.retry_after_secs()
            };
            Err(CodeloomError::RateLimited { retry_after_secs })
        }
    }

    fn bucket_for(&self, map: &BucketMap, key: &str) -> Result<Arc<Mutex<TokenBucket>>, CodeloomError> {
        if key.is_empty() {
            return Err(CodeloomError::InvalidArgument(
                "identifier must not be empty".to_string(),
            ));
        }
        let mut guard = map.lock().unwrap_or_else(|e| e.into_inner());
        let bucket = guard
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(TokenBucket::new(self.config.capacity, self.config.window))));
        Ok(Arc::clone(bucket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn allows_calls_within_capacity() {
        let limiter = RateLimiter::new(RateLimiterConfig::builder().capacity(3).build());
        assert!(limiter.check_limit("alice").is_ok());
        assert!(limiter.check_limit("alice").is_ok());
        assert!(limiter.check_limit("alice").is_ok());
    }

    #[test]
    fn denies_once_exhausted() {
        let limiter = RateLimiter::new(
            RateLimiterConfig::builder()
                .capacity(1)
                .window(Duration::from_secs(10))
                .build(),
        );
        assert!(limiter.check_limit("alice").is_ok());
        let result = limiter.check_limit("alice");
        assert!(matches!(result, Err(CodeloomError::RateLimited { .. })));
    }

    #[test]
    fn user_and_ip_keyspaces_are_independent() {
        let limiter = RateLimiter::new(RateLimiterConfig::builder().capacity(1).build());
        assert!(limiter.check_limit("alice").is_ok());
        assert!(limiter.check_limit("alice").is_err());
        assert!(limiter.check_ip_limit("alice").is_ok());
    }

    #[test]
    fn distinct_identities_have_independent_buckets() {
        let limiter = RateLimiter::new(RateLimiterConfig::builder().capacity(1).build());
        assert!(limiter.check_limit("alice").is_ok());
        assert!(limiter.check_limit("bob").is_ok());
    }

    #[test]
    fn empty_identifier_is_rejected() {
        let limiter = RateLimiter::new(RateLimiterConfig::builder().build());
        let result = limiter.check_limit("");
        assert!(matches!(result, Err(CodeloomError::InvalidArgument(_))));
    }

    #[test]
    fn zero_capacity_denies_without_panicking() {
        let limiter = RateLimiter::new(RateLimiterConfig::builder().capacity(0).build());
        assert!(limiter.check_limit("alice").is_err());
    }

    #[test]
    fn negative_capacity_denies_without_panicking() {
        let limiter = RateLimiter::new(RateLimiterConfig::builder().capacity(-10).build());
        assert!(limiter.check_limit("alice").is_err());
    }

    #[test]
    fn get_remaining_quota_reflects_consumption() {
        let limiter = RateLimiter::new(RateLimiterConfig::builder().capacity(5).build());
        limiter.check_limit("alice").unwrap();
        let (remaining, _reset_at) = limiter.get_remaining_quota("alice").unwrap();
        assert_eq!(remaining, 4);
    }

    #[test]
    fn reset_quota_restores_capacity() {
        let limiter = RateLimiter::new(
            RateLimiterConfig::builder()
                .capacity(1)
                .window(Duration::from_secs(10))
                .build(),
        );
        limiter.check_limit("alice").unwrap();
        assert!(limiter.check_limit("alice").is_err());

        limiter.reset_quota("alice").unwrap();
        assert!(limiter.check_limit("alice").is_ok());
    }

    #[test]
    fn retry_after_seconds_is_zero_with_headroom() {
        let limiter = RateLimiter::new(RateLimiterConfig::builder().capacity(5).build());
        assert_eq!(limiter.get_retry_after_seconds("alice").unwrap(), 0);
    }

    #[test]
    fn event_listeners_observe_acquire_and_deny() {
        let acquired = Arc::new(AtomicUsize::new(0));
        let denied = Arc::new(AtomicUsize::new(0));
        let a = Arc::clone(&acquired);
        let d = Arc::clone(&denied);

        let limiter = RateLimiter::new(
            RateLimiterConfig::builder()
                .capacity(1)
                .window(Duration::from_secs(10))
                .on_permit_acquired(move |_, _| {
                    a.fetch_add(1, Ordering::SeqCst);
                })
                .on_permit_denied(move |_| {
                    d.fetch_add(1, Ordering::SeqCst);
                })
                .build(),
        );

        let _ = limiter.check_limit("alice");
        let _ = limiter.check_limit("alice");

        assert_eq!(acquired.load(Ordering::SeqCst), 1);
        assert_eq!(denied.load(Ordering::SeqCst), 1);
    }
}
