//! Cooperative cancellation signal threaded through every blocking call.
//!
//! The core has no HTTP framework and no async runtime context object of its
//! own, so cancellation is modeled as the smallest primitive that satisfies
//! the "inspect at entry, return promptly without mutating state" contract:
//! a cheaply cloned flag, plus a [`tokio::sync::Notify`] so a suspended call
//! can race itself against cancellation with `tokio::select!` instead of
//! polling. Callers at the HTTP boundary (out of scope here) are expected to
//! flip it when the inbound request is aborted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// A cooperative cancellation flag, cheaply cloned and shared across the
/// components a single logical request passes through.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<Inner>);

impl Cancellation {
    /// Creates a fresh, not-yet-cancelled signal.
    pub fn new() -> Self {
        Self(Arc::new(Inner {
            cancelled: AtomicBool::new(false),
            notify: Notify::new(),
        }))
    }

    /// Marks the signal as cancelled. Idempotent.
    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    /// Returns `true` if [`Cancellation::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`Cancellation::cancel`] has been called; resolves
    /// immediately if it already was. Meant to be raced against the guarded
    /// call with `tokio::select!`, not polled.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.0.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
