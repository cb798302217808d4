//! Resilience and caching core for a code-review service fronting a slow
//! LLM backend.
//!
//! This crate is a thin facade over the eight crates under `crates/`: it
//! re-exports each one's public surface and hosts the cross-crate
//! integration tests under `tests/` that exercise the end-to-end scenarios
//! no single crate can test alone (a cache hit that never calls the
//! provider, a tripped breaker failing fast, a denied rate check, a
//! degraded health report). Each crate remains independently usable; this
//! facade exists for callers who want the whole stack with one dependency
//! line, the same role the teacher's root `tower-resilience-tests` package
//! plays for its crates.

pub use codeloom_cache as cache;
pub use codeloom_circuitbreaker as circuitbreaker;
pub use codeloom_core as core;
pub use codeloom_healthcheck as healthcheck;
pub use codeloom_orchestrator as orchestrator;
pub use codeloom_prompt as prompt;
pub use codeloom_provider as provider;
pub use codeloom_ratelimiter as ratelimiter;
