//! A consecutive-failure circuit breaker guarding calls to a slow,
//! occasionally-unavailable backend.
//!
//! ## States
//! - **Closed**: normal operation, all calls pass through.
//! - **Open**: calls are rejected immediately without reaching the guarded
//!   call.
//! - **Half-Open**: a recovery probe is underway; calls are permitted so the
//!   breaker can observe whether the backend has recovered.
//!
//! This breaker drops the teacher's sliding-window failure-rate tracking in
//! favor of a plain consecutive-failure counter, and it has no generic
//! `Res`/`Err`: every guarded call already returns [`CodeloomError`], the
//! one error type shared across this workspace, so there is nothing left to
//! classify.
//!
//! State transitions are lazy: there is no background timer. `Open ->
//! HalfOpen` is discovered the next time a call is attempted, once
//! `config.timeout` has elapsed.
//!
//! # Examples
//!
//! ```
//! use codeloom_circuitbreaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
//! use codeloom_core::CodeloomError;
//!
//! # async fn example() -> Result<(), CodeloomError> {
//! let breaker = CircuitBreaker::new(
//!     CircuitBreakerConfig::builder()
//!         .name("ollama")
//!         .open_threshold(5)
//!         .build(),
//! );
//!
//! let response = breaker
//!     .execute(|| async { Ok::<_, CodeloomError>("response") })
//!     .await?;
//! assert_eq!(response, "response");
//! assert_eq!(breaker.state().await, CircuitState::Closed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//! - `metrics`: state gauges and call-outcome counters via the `metrics` crate
//! - `tracing`: structured logs of call permission and state transitions

mod circuit;
mod config;
mod events;

pub use circuit::{CircuitMetrics, CircuitState};
pub use config::{CircuitBreakerConfig, CircuitBreakerConfigBuilder};
pub use events::CircuitBreakerEvent;

use circuit::Circuit;
use codeloom_core::CodeloomError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Guards calls to a single backend. Cheap to clone; every clone shares the
/// same underlying state.
#[derive(Clone)]
pub struct CircuitBreaker {
    circuit: Arc<Mutex<Circuit>>,
    state_atomic: Arc<std::sync::atomic::AtomicU8>,
    config: Arc<CircuitBreakerConfig>,
}

impl CircuitBreaker {
    /// Creates a breaker in the `Closed` state.
    pub fn new(config: CircuitBreakerConfig) -> Self {
        let state_atomic = Arc::new(std::sync::atomic::AtomicU8::new(CircuitState::Closed as u8));
        Self {
            circuit: Arc::new(Mutex::new(Circuit::new_with_atomic(Arc::clone(&state_atomic)))),
            state_atomic,
            config: Arc::new(config),
        }
    }

    /// Runs `f` if the circuit permits it, recording the outcome.
    ///
    /// `f` itself runs outside any lock: only the state check before the
    /// call and the bookkeeping after it hold the breaker's mutex, so a slow
    /// guarded call never blocks other callers from checking the circuit's
    /// state.
    ///
    /// A `Cancelled` outcome is recorded as neither a success nor a failure;
    /// the caller gave up, the backend didn't fail.
    pub async fn execute<F, Fut, T>(&self, f: F) -> Result<T, CodeloomError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CodeloomError>>,
    {
        let permitted = {
            let mut circuit = self.circuit.lock().await;
            circuit.try_acquire(&self.config)
        };

        if !permitted {
            #[cfg(feature = "tracing")]
            tracing::debug!(breaker = %self.config.name, "circuit open, call rejected");
            return Err(CodeloomError::CircuitOpen {
                breaker: self.config.name.clone(),
            });
        }

        let result = f().await;

        let mut circuit = self.circuit.lock().await;
        match &result {
            Ok(_) => circuit.record_success(&self.config),
            Err(CodeloomError::Cancelled) => {}
            Err(_) => circuit.record_failure(&self.config),
        }

        result
    }

    /// Forces the circuit into the `Open` state.
    pub async fn force_open(&self) {
        self.circuit.lock().await.force_open(&self.config);
    }

    /// Forces the circuit into the `Closed` state.
    pub async fn force_closed(&self) {
        self.circuit.lock().await.force_closed(&self.config);
    }

    /// Resets the circuit to `Closed` and clears its counters.
    pub async fn reset(&self) {
        self.circuit.lock().await.reset(&self.config);
    }

    /// Returns the current state.
    pub async fn state(&self) -> CircuitState {
        self.circuit.lock().await.state()
    }

    /// Returns the current state without an async call, for sync contexts
    /// such as health checks.
    pub fn state_sync(&self) -> CircuitState {
        CircuitState::from_u8(self.state_atomic.load(std::sync::atomic::Ordering::Acquire))
    }

    /// Returns a snapshot of the breaker's counters.
    pub async fn metrics(&self) -> CircuitMetrics {
        self.circuit.lock().await.metrics()
    }
}
