//! Thin contract over the LLM generate call, plus the one concrete
//! implementation the code review service ships with.
//!
//! The [`Provider`] trait is the narrow surface specified for the core:
//! `generate`, `health_check`, `model_info`. It is defined here rather than
//! in `codeloom-orchestrator` so that `codeloom-provider` (the crate that
//! implements it) never has to depend back on the orchestrator crate that
//! consumes it — see `DESIGN.md` for the full rationale.
//!
//! ## Feature Flags
//! - `tracing`: a `debug` log per `generate` call

mod client;
mod config;

pub use client::OllamaProvider;
pub use codeloom_core::ModelInfo;
pub use config::{ProviderConfig, ProviderConfigBuilder};

use async_trait::async_trait;
use codeloom_core::{Cancellation, CodeloomError};

/// The text and token accounting produced by one `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutput {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The only component that speaks the provider wire protocol.
///
/// Implementations must not retry internally (`§9` design note: retry
/// policy belongs to the caller, which already bounds failure amplification
/// via the circuit breaker) and must race the call against `cancel`,
/// returning [`CodeloomError::Cancelled`] the moment it fires rather than
/// waiting out the full request timeout.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Sends `prompt` to the model and returns its raw text plus token
    /// counts. Does not parse the text as JSON; that is the prompt
    /// builder's job. `cancel` is the caller's cancellation signal, not the
    /// provider's own request timeout — a timed-out request that was never
    /// cancelled by its caller must still return
    /// [`CodeloomError::ProviderUnavailable`], not `Cancelled`.
    async fn generate(
        &self,
        prompt: &str,
        cancel: &Cancellation,
    ) -> Result<GenerateOutput, CodeloomError>;

    /// A lightweight liveness probe, independent of `generate`.
    async fn health_check(&self) -> Result<(), CodeloomError>;

    /// Static identification of the configured provider/model. Never makes
    /// a network call.
    fn model_info(&self) -> ModelInfo;
}
