//! Narrow probe contracts the aggregator drives.
//!
//! These are deliberately not the same traits the orchestrator uses to talk
//! to the provider or a repository: a health probe is a cheap, read-only
//! question ("are you there", "what models do you have", "can I reach the
//! schema"), not a call that does work. Keeping them separate means
//! `codeloom-healthcheck` never needs to depend on `codeloom-orchestrator`,
//! preserving the leaf position the workspace layout gives it.

use async_trait::async_trait;
use codeloom_core::CodeloomError;

/// Connectivity and model-catalog probe over the LLM provider.
#[async_trait]
pub trait ProviderProbe: Send + Sync {
    /// Lightweight liveness probe (e.g. `GET /api/tags`'s status alone).
    async fn ping(&self) -> Result<(), CodeloomError>;

    /// Returns the provider's model catalog, as reported by the same
    /// endpoint `ping` checks the status of.
    async fn list_models(&self) -> Result<Vec<String>, CodeloomError>;
}

/// Connectivity and schema-presence probe over the repository's database.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// A bare connectivity check (e.g. `SELECT 1`).
    async fn ping(&self) -> Result<(), CodeloomError>;

    /// Whether the expected schema (tables/migrations) is present.
    async fn schema_exists(&self) -> Result<bool, CodeloomError>;
}
