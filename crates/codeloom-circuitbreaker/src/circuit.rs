//! The consecutive-failure-counting state machine.
//!
//! This drops the teacher's sliding window and slow-call tracking: there is
//! no `Res`/`Err` to classify generically, because every caller in this
//! workspace already speaks `CodeloomError`. A breaker simply counts how
//! many calls in a row have failed, and the state transitions are checked
//! lazily: nothing ticks on a background timer, so `Open -> HalfOpen` is
//! only discovered the next time `try_acquire` is called.

use crate::config::CircuitBreakerConfig;
use crate::events::CircuitBreakerEvent;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

/// The state of a [`crate::CircuitBreaker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CircuitState {
    /// Calls pass through; failures are being counted.
    Closed = 0,
    /// Calls are rejected without reaching the provider.
    Open = 1,
    /// A single probe call is being let through to test recovery.
    HalfOpen = 2,
}

impl CircuitState {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Closed,
            1 => Self::Open,
            2 => Self::HalfOpen,
            _ => Self::Closed,
        }
    }
}

/// Point-in-time counters, returned by [`crate::CircuitBreaker::metrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitMetrics {
    pub state: CircuitState,
    pub consecutive_failures: u32,
    pub half_open_successes: u32,
    pub time_since_state_change: std::time::Duration,
}

pub(crate) struct Circuit {
    state: CircuitState,
    state_atomic: std::sync::Arc<AtomicU8>,
    last_state_change: Instant,
    consecutive_failures: u32,
    half_open_successes: u32,
}

impl Circuit {
    pub(crate) fn new_with_atomic(state_atomic: std::sync::Arc<AtomicU8>) -> Self {
        Self {
            state: CircuitState::Closed,
            state_atomic,
            last_state_change: Instant::now(),
            consecutive_failures: 0,
            half_open_successes: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::new_with_atomic(std::sync::Arc::new(AtomicU8::new(CircuitState::Closed as u8)))
    }

    pub(crate) fn state(&self) -> CircuitState {
        self.state
    }

    pub(crate) fn metrics(&self) -> CircuitMetrics {
        CircuitMetrics {
            state: self.state,
            consecutive_failures: self.consecutive_failures,
            half_open_successes: self.half_open_successes,
            time_since_state_change: self.last_state_change.elapsed(),
        }
    }

    fn transition_to(&mut self, to: CircuitState, config: &CircuitBreakerConfig) -> CircuitBreakerEvent {
        let from = self.state;
        self.state = to;
        self.last_state_change = Instant::now();
        self.state_atomic.store(to as u8, Ordering::Release);

        if to == CircuitState::Closed {
            self.consecutive_failures = 0;
        }
        self.half_open_successes = 0;

        #[cfg(feature = "metrics")]
        {
            metrics::gauge!("circuitbreaker_state", "breaker" => config.name.clone())
                .set(to as u8 as f64);
            metrics::counter!(
                "circuitbreaker_transitions_total",
                "breaker" => config.name.clone(),
                "from" => format!("{from:?}"),
                "to" => format!("{to:?}")
            )
            .increment(1);
        }

        CircuitBreakerEvent::StateTransition {
            pattern_name: config.name.clone(),
            timestamp: Instant::now(),
            from_state: from,
            to_state: to,
        }
    }

    /// Checks whether a call should be permitted right now, lazily moving
    /// `Open -> HalfOpen` once `config.timeout` has elapsed since the circuit
    /// opened. Emits `CallPermitted`/`CallRejected` and any state transition.
    pub(crate) fn try_acquire(&mut self, config: &CircuitBreakerConfig) -> bool {
        if self.state == CircuitState::Open && self.last_state_change.elapsed() >= config.timeout {
            let event = self.transition_to(CircuitState::HalfOpen, config);
            config.event_listeners.emit(&event);
        }

        let permitted = self.state != CircuitState::Open;

        let event = if permitted {
            CircuitBreakerEvent::CallPermitted {
                pattern_name: config.name.clone(),
                timestamp: Instant::now(),
                state: self.state,
            }
        } else {
            #[cfg(feature = "metrics")]
            metrics::counter!("circuitbreaker_calls_total", "breaker" => config.name.clone(), "outcome" => "rejected")
                .increment(1);
            CircuitBreakerEvent::CallRejected {
                pattern_name: config.name.clone(),
                timestamp: Instant::now(),
            }
        };
        config.event_listeners.emit(&event);

        permitted
    }

    /// Records a success. In `HalfOpen`, enough consecutive successes close
    /// the circuit; in `Closed` it resets the failure streak.
    pub(crate) fn record_success(&mut self, config: &CircuitBreakerConfig) {
        #[cfg(feature = "metrics")]
        metrics::counter!("circuitbreaker_calls_total", "breaker" => config.name.clone(), "outcome" => "success")
            .increment(1);

        let mut transition_event = None;
        match self.state {
            CircuitState::Closed => {
                self.consecutive_failures = 0;
            }
            CircuitState::HalfOpen => {
                self.half_open_successes += 1;
                if self.half_open_successes >= config.half_open_threshold {
                    transition_event = Some(self.transition_to(CircuitState::Closed, config));
                }
            }
            CircuitState::Open => {}
        }

        let success_event = CircuitBreakerEvent::SuccessRecorded {
            pattern_name: config.name.clone(),
            timestamp: Instant::now(),
            state: self.state,
        };
        config.event_listeners.emit(&success_event);
        if let Some(event) = transition_event {
            config.event_listeners.emit(&event);
        }
    }

    /// Records a failure. In `Closed`, enough consecutive failures open the
    /// circuit; in `HalfOpen`, any failure reopens it immediately.
    pub(crate) fn record_failure(&mut self, config: &CircuitBreakerConfig) {
        #[cfg(feature = "metrics")]
        metrics::counter!("circuitbreaker_calls_total", "breaker" => config.name.clone(), "outcome" => "failure")
            .increment(1);

        let mut transition_event = None;
        match self.state {
            CircuitState::Closed => {
                self.consecutive_failures += 1;
                if self.consecutive_failures >= config.open_threshold {
                    transition_event = Some(self.transition_to(CircuitState::Open, config));
                }
            }
            CircuitState::HalfOpen => {
                transition_event = Some(self.transition_to(CircuitState::Open, config));
            }
            CircuitState::Open => {}
        }

        let failure_event = CircuitBreakerEvent::FailureRecorded {
            pattern_name: config.name.clone(),
            timestamp: Instant::now(),
            state: self.state,
        };
        config.event_listeners.emit(&failure_event);
        if let Some(event) = transition_event {
            config.event_listeners.emit(&event);
        }
    }

    pub(crate) fn force_open(&mut self, config: &CircuitBreakerConfig) {
        let event = self.transition_to(CircuitState::Open, config);
        config.event_listeners.emit(&event);
    }

    pub(crate) fn force_closed(&mut self, config: &CircuitBreakerConfig) {
        let event = self.transition_to(CircuitState::Closed, config);
        config.event_listeners.emit(&event);
    }

    pub(crate) fn reset(&mut self, config: &CircuitBreakerConfig) {
        self.consecutive_failures = 0;
        self.half_open_successes = 0;
        if self.state != CircuitState::Closed {
            let event = self.transition_to(CircuitState::Closed, config);
            config.event_listeners.emit(&event);
        }
    }
}
