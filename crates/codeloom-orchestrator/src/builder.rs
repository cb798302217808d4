//! Fluent construction of an [`Orchestrator`], matching the builder idiom
//! every other crate in this workspace uses for its config types.

use crate::orchestrator::Orchestrator;
use crate::repository::AnalysisRepository;
use codeloom_cache::ResultCache;
use codeloom_circuitbreaker::CircuitBreaker;
use codeloom_core::CodeloomError;
use codeloom_provider::Provider;
use codeloom_ratelimiter::RateLimiter;
use std::sync::Arc;

/// Builds an [`Orchestrator`] from its collaborators.
///
/// Every collaborator is required: unlike the config builders elsewhere in
/// this workspace, there is no sensible default for "which provider to
/// call" or "which repository to persist to", so [`OrchestratorBuilder::build`]
/// fails with [`CodeloomError::Internal`] if any are missing rather than
/// silently substituting a no-op.
#[derive(Default)]
pub struct OrchestratorBuilder {
    cache: Option<Arc<ResultCache>>,
    breaker: Option<Arc<CircuitBreaker>>,
    limiter: Option<Arc<RateLimiter>>,
    provider: Option<Arc<dyn Provider>>,
    repository: Option<Arc<dyn AnalysisRepository>>,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(mut self, cache: Arc<ResultCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn breaker(mut self, breaker: Arc<CircuitBreaker>) -> Self {
        self.breaker = Some(breaker);
        self
    }

    pub fn limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    pub fn provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn repository(mut self, repository: Arc<dyn AnalysisRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn build(self) -> Result<Orchestrator, CodeloomError> {
        Ok(Orchestrator {
            cache: self
                .cache
                .ok_or_else(|| CodeloomError::Internal("orchestrator built without a cache".into()))?,
            breaker: self.breaker.ok_or_else(|| {
                CodeloomError::Internal("orchestrator built without a circuit breaker".into())
            })?,
            limiter: self.limiter.ok_or_else(|| {
                CodeloomError::Internal("orchestrator built without a rate limiter".into())
            })?,
            provider: self.provider.ok_or_else(|| {
                CodeloomError::Internal("orchestrator built without a provider".into())
            })?,
            repository: self.repository.ok_or_else(|| {
                CodeloomError::Internal("orchestrator built without a repository".into())
            })?,
        })
    }
}
