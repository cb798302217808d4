//! Wires the cache, circuit breaker, rate limiter, provider adapter, and
//! prompt builder into the one operation the rest of the system calls:
//! `Analyze(ctx, req) -> AnalysisResponse`.
//!
//! Grounded on `jlon-stellar`'s `LLMServiceImpl::analyze`: cache check,
//! guarded provider call, tolerant parse, best-effort persist, cache
//! insert, return. The `Provider`, `AnalysisRepository`, and
//! `SessionRepository` traits are consumed here but owned by
//! `codeloom-provider` and this crate respectively (see `DESIGN.md` for why
//! `Provider` lives upstream instead of here, as a literal reading of this
//! component's external-interfaces section would otherwise suggest).
//!
//! ## Feature Flags
//! - `tracing`: a span per `Analyze` call plus debug logs per phase
//! - `metrics`: forwarded to every collaborator crate
//! - `serde`: (de)serialization on [`AnalysisResponse`], [`Tab`], and
//!   [`StoredMultiFileAnalysis`]

mod builder;
mod orchestrator;
mod repository;
mod request;

pub use builder::OrchestratorBuilder;
pub use orchestrator::Orchestrator;
pub use repository::{AnalysisRepository, SessionRepository, StoredMultiFileAnalysis, Tab};
pub use request::{AnalysisRequest, AnalysisResponse, RequestContext};
