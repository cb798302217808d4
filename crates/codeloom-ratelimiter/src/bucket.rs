//! The continuous-refill token bucket.
//!
//! This drops the teacher's three-algorithm dispatch (fixed window, sliding
//! log, sliding counter) and its sleep-based waiting: a deny is synchronous,
//! there is no timeout to sleep through. A bucket refills lazily, on access,
//! rather than on a timer.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub(crate) struct TokenBucket {
    capacity: i64,
    window: Duration,
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    pub(crate) fn new(capacity: i64, window: Duration) -> Self {
        Self {
            capacity,
            window,
            tokens: capacity.max(0) as f64,
            last_refill: Instant::now(),
        }
    }

    fn refill(&mut self, now: Instant) {
        if self.capacity <= 0 {
            self.tokens = 0.0;
            self.last_refill = now;
            return;
        }

        let elapsed = now.saturating_duration_since(self.last_refill);
        if elapsed >= self.window {
            self.tokens = self.capacity as f64;
        } else if self.window > Duration::ZERO {
            let fraction = elapsed.as_secs_f64() / self.window.as_secs_f64();
            self.tokens = (self.tokens + self.capacity as f64 * fraction).min(self.capacity as f64);
        }
        self.last_refill = now;
    }

    /// Refills, then consumes one token if available. Returns whether the
    /// call is permitted.
    pub(crate) fn try_consume(&mut self) -> bool {
        self.refill(Instant::now());
        if self.tokens < 1.0 {
            return false;
        }
        self.tokens -= 1.0;
        true
    }

    /// The number of whole tokens currently available, after refilling.
    pub(crate) fn remaining(&mut self) -> usize {
        self.refill(Instant::now());
        self.tokens.floor().max(0.0) as usize
    }

    /// The moment the bucket will next be full.
    pub(crate) fn reset_at(&mut self) -> Instant {
        let now = Instant::now();
        self.refill(now);
        if self.capacity <= 0 || self.tokens >= self.capacity as f64 {
            return now;
        }
        let deficit = self.capacity as f64 - self.tokens;
        let secs = self.window.as_secs_f64() * deficit / self.capacity as f64;
        now + Duration::from_secs_f64(secs.max(0.0))
    }

    /// Seconds until at least one token is available (0 if one already is).
    pub(crate) fn retry_after_secs(&mut self) -> u64 {
        let now = Instant::now();
        self.refill(now);
        if self.capacity <= 0 {
            return self.window.as_secs().max(1);
        }
        if self.tokens >= 1.0 {
            return 0;
        }
        let deficit = 1.0 - self.tokens;
        let secs = self.window.as_secs_f64() * deficit / self.capacity as f64;
        secs.ceil().max(0.0) as u64
    }

    /// Refills to capacity immediately.
    pub(crate) fn reset(&mut self) {
        self.tokens = self.capacity.max(0) as f64;
        self.last_refill = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_full() {
        let mut bucket = TokenBucket::new(5, Duration::from_secs(1));
        assert_eq!(bucket.remaining(), 5);
    }

    #[test]
    fn consumes_one_token_per_call() {
        let mut bucket = TokenBucket::new(2, Duration::from_secs(10));
        assert!(bucket.try_consume());
        assert_eq!(bucket.remaining(), 1);
        assert!(bucket.try_consume());
        assert_eq!(bucket.remaining(), 0);
    }

    #[test]
    fn denies_once_exhausted() {
        let mut bucket = TokenBucket::new(1, Duration::from_secs(10));
        assert!(bucket.try_consume());
        assert!(!bucket.try_consume());
    }

    #[test]
    fn refills_continuously_over_the_window() {
        let mut bucket = TokenBucket::new(10, Duration::from_millis(100));
        for _ in 0..10 {
            assert!(bucket.try_consume());
        }
        assert!(!bucket.try_consume());

        std::thread::sleep(Duration::from_millis(60));
        let remaining = bucket.remaining();
        assert!(remaining >= 4 && remaining <= 8, "remaining was {remaining}");
    }

    #[test]
    fn refills_to_full_after_a_full_window() {
        let mut bucket = TokenBucket::new(3, Duration::from_millis(20));
        bucket.try_consume();
        bucket.try_consume();
        bucket.try_consume();
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(bucket.remaining(), 3);
    }

    #[test]
    fn zero_capacity_always_denies() {
        let mut bucket = TokenBucket::new(0, Duration::from_secs(1));
        assert!(!bucket.try_consume());
        assert_eq!(bucket.remaining(), 0);
    }

    #[test]
    fn negative_capacity_always_denies() {
        let mut bucket = TokenBucket::new(-5, Duration::from_secs(1));
        assert!(!bucket.try_consume());
        assert_eq!(bucket.remaining(), 0);
    }

    #[test]
    fn reset_restores_capacity() {
        let mut bucket = TokenBucket::new(2, Duration::from_secs(10));
        bucket.try_consume();
        bucket.try_consume();
        assert_eq!(bucket.remaining(), 0);
        bucket.reset();
        assert_eq!(bucket.remaining(), 2);
    }

    #[test]
    fn retry_after_is_zero_when_tokens_available() {
        let mut bucket = TokenBucket::new(5, Duration::from_secs(1));
        assert_eq!(bucket.retry_after_secs(), 0);
    }

    #[test]
    fn retry_after_is_positive_once_exhausted() {
        let mut bucket = TokenBucket::new(1, Duration::from_secs(10));
        bucket.try_consume();
        assert!(bucket.retry_after_secs() > 0);
    }
}
