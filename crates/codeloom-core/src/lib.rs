//! Shared infrastructure for the codeloom resilience core.
//!
//! This crate has no dependency on any other crate in the workspace; every
//! other crate (`codeloom-cache`, `codeloom-circuitbreaker`,
//! `codeloom-ratelimiter`, `codeloom-provider`, `codeloom-prompt`,
//! `codeloom-healthcheck`, `codeloom-orchestrator`) depends on it for:
//! - [`CodeloomError`], the single error taxonomy every component returns
//! - the data-model entities shared across component boundaries
//! - the event listener plumbing used for observability hooks

pub mod cancellation;
pub mod error;
pub mod events;
pub mod model;

pub use cancellation::Cancellation;
pub use error::{BoxError, CodeloomError};
pub use events::{EventListener, EventListeners, FnListener, ResilienceEvent};
pub use model::{AnalysisResult, FileInput, ModelInfo, ReviewMode};
