//! Fast, non-invasive liveness/readiness probing over the LLM provider, its
//! model catalog, and the database, plus presence checks on the
//! orchestrator's own collaborators.
//!
//! Unlike a generic health-checked resource pool that continuously polls a
//! set of interchangeable resources and picks among the healthy ones, this
//! aggregator runs exactly three cheap probes on demand and folds them into
//! one [`HealthReport`] with a worst-wins aggregation rule. No generation
//! call against the provider is ever made here.
//!
//! # Examples
//!
//! ```
//! use codeloom_healthcheck::{HealthAggregator, HealthAggregatorConfig};
//! use codeloom_healthcheck::probes::{DatabaseProbe, ProviderProbe};
//! use codeloom_core::CodeloomError;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct AlwaysUp;
//!
//! #[async_trait]
//! impl ProviderProbe for AlwaysUp {
//!     async fn ping(&self) -> Result<(), CodeloomError> { Ok(()) }
//!     async fn list_models(&self) -> Result<Vec<String>, CodeloomError> {
//!         Ok(vec!["qwen2.5-coder".to_string()])
//!     }
//! }
//!
//! #[async_trait]
//! impl DatabaseProbe for AlwaysUp {
//!     async fn ping(&self) -> Result<(), CodeloomError> { Ok(()) }
//!     async fn schema_exists(&self) -> Result<bool, CodeloomError> { Ok(true) }
//! }
//!
//! # async fn example() {
//! let aggregator = HealthAggregator::new(
//!     Arc::new(AlwaysUp),
//!     Arc::new(AlwaysUp),
//!     HealthAggregatorConfig::builder().required_model("qwen2.5-coder").build(),
//! );
//! let report = aggregator.check(&[]).await;
//! assert!(report.overall.is_healthy());
//! # }
//! ```
//!
//! ## Feature Flags
//! - `serde`: `serde::Serialize` on [`HealthReport`]/[`ComponentHealth`] for
//!   the (out of scope) HTTP layer to encode directly
//! - `tracing`: a `debug` log per completed probe
//! - `metrics`: a `codeloom_health_component_status` gauge per component

mod aggregator;
mod config;
pub mod probes;
mod report;
mod status;

pub use aggregator::{HealthAggregator, SubServiceCheck};
pub use config::{HealthAggregatorConfig, HealthAggregatorConfigBuilder};
pub use report::{ComponentHealth, HealthReport};
pub use status::HealthStatus;

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Healthy | Self::Degraded)
    }
}
