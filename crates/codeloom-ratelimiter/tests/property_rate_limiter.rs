//! Property test for the token bucket's core invariant, matching the
//! teacher's `tests/property/rate_limiter.rs` idiom of driving a burst of
//! requests through a fresh limiter and asserting the accepted count never
//! exceeds its configured capacity.

use codeloom_ratelimiter::{RateLimiter, RateLimiterConfig};
use proptest::prelude::*;
use std::time::Duration;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A burst of back-to-back calls against one identity never admits more
    /// than `capacity` of them, regardless of how many are attempted: the
    /// window is long enough here that refill contributes nothing mid-burst.
    #[test]
    fn burst_never_exceeds_capacity(capacity in 1i64..=200, num_requests in 1usize..=500) {
        let limiter = RateLimiter::new(
            RateLimiterConfig::builder()
                .capacity(capacity)
                .window(Duration::from_secs(3600))
                .build(),
        );

        let mut accepted = 0usize;
        for _ in 0..num_requests {
            if limiter.check_limit("burst-user").is_ok() {
                accepted += 1;
            }
        }

        prop_assert!(
            accepted as i64 <= capacity,
            "accepted {accepted} requests but capacity was {capacity}"
        );
    }

    /// Distinct identities never borrow from each other's bucket: draining
    /// one identity's quota never denies a different identity.
    #[test]
    fn distinct_identities_stay_independent(capacity in 1i64..=10) {
        let limiter = RateLimiter::new(
            RateLimiterConfig::builder()
                .capacity(capacity)
                .window(Duration::from_secs(3600))
                .build(),
        );

        for _ in 0..capacity {
            prop_assert!(limiter.check_limit("alice").is_ok());
        }
        prop_assert!(limiter.check_limit("alice").is_err());
        prop_assert!(limiter.check_limit("bob").is_ok());
    }
}
