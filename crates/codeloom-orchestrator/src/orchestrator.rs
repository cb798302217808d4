//! The `Orchestrator`: the single entry point wiring every other component
//! into one `Analyze` call, grounded on `jlon-stellar`'s
//! `LLMServiceImpl::analyze` (cache check, call through a resilience guard,
//! parse, persist, cache, return — the same shape, generalized from one
//! concrete LLM client to this workspace's `Arc<dyn Provider>`).

use crate::repository::AnalysisRepository;
use crate::request::{AnalysisRequest, AnalysisResponse, RequestContext};
use codeloom_cache::ResultCache;
use codeloom_circuitbreaker::CircuitBreaker;
use codeloom_core::{AnalysisResult, CodeloomError};
use codeloom_prompt::ParsedAnalysis;
use codeloom_provider::Provider;
use codeloom_ratelimiter::RateLimiter;
use std::sync::Arc;
use std::time::Instant;

/// Holds every collaborator the `Analyze` flow needs, each as a cheaply
/// cloneable `Arc`. Built via [`crate::OrchestratorBuilder`], the same
/// swappable-collaborator shape `LLMServiceImpl::new`/`with_client` gives
/// its caller for tests.
pub struct Orchestrator {
    pub(crate) cache: Arc<ResultCache>,
    pub(crate) breaker: Arc<CircuitBreaker>,
    pub(crate) limiter: Arc<RateLimiter>,
    pub(crate) provider: Arc<dyn Provider>,
    pub(crate) repository: Arc<dyn AnalysisRepository>,
}

impl Orchestrator {
    /// Runs the full `Analyze` flow:
    /// `NEW -> RATE_OK -> PROMPTED -> PROVIDER_INVOKED -> PARSED -> PERSISTED -> CACHED -> RETURNED`.
    ///
    /// A multi-file request (`files.len() >= 2`) renders the structured-JSON
    /// prompt; a single-file request renders the plain-summary prompt. Both
    /// flow through the same cache/breaker/persist/return pipeline.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip(self, ctx, req),
            fields(
                review_id = req.review_id,
                mode = %req.mode,
                file_count = req.files.len(),
                correlation_id = %ctx.correlation_id,
                request_id = %ctx.request_id,
            )
        )
    )]
    pub async fn analyze(
        &self,
        ctx: &RequestContext,
        req: AnalysisRequest,
    ) -> Result<AnalysisResponse, CodeloomError> {
        if req.files.is_empty() {
            return Err(CodeloomError::InvalidArgument(
                "analyze requires at least one file".to_string(),
            ));
        }
        if let Some(t) = req.temperature {
            if !(0.0..=1.0).contains(&t) {
                return Err(CodeloomError::InvalidArgument(
                    "temperature must be in [0, 1]".to_string(),
                ));
            }
        }

        // 1. Cache lookup.
        if let Some(cached) = self
            .cache
            .get(req.review_id, req.mode.clone(), Some(&ctx.cancel))
            .await?
        {
            #[cfg(feature = "tracing")]
            tracing::debug!("cache hit, returning without invoking the provider");
            return Ok(response_from_cached(cached));
        }

        // 2. Rate check.
        self.limiter.check_limit(&req.identity)?;
        #[cfg(feature = "tracing")]
        tracing::debug!("rate check passed");

        if ctx.cancel.is_cancelled() {
            return Err(CodeloomError::Cancelled);
        }

        // 3. Prompt render.
        let prompt = codeloom_prompt::build_prompt(&req.mode, &req.files);
        #[cfg(feature = "tracing")]
        tracing::debug!(prompt_len = prompt.len(), "prompt rendered");

        // 4. Provider call through the circuit breaker. At most one
        // provider call per logical request.
        let start = Instant::now();
        let provider = Arc::clone(&self.provider);
        let generate_prompt = prompt.clone();
        let cancel = ctx.cancel.clone();
        let output = self
            .breaker
            .execute(move || {
                let provider = Arc::clone(&provider);
                let prompt = generate_prompt;
                async move { provider.generate(&prompt, &cancel).await }
            })
            .await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            "provider call complete"
        );

        // 5. Parse via the tolerant extractor. Always treated as success:
        // a fallback parse still produces a usable summary.
        let parsed = codeloom_prompt::extract(&output.text);
        let is_fallback = codeloom_prompt::is_fallback(&parsed);
        #[cfg(feature = "tracing")]
        if is_fallback {
            tracing::debug!("provider response did not parse as structured JSON, using raw-text fallback");
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let model_info = self.provider.model_info();
        let result = AnalysisResult {
            review_id: req.review_id,
            mode: req.mode.clone(),
            prompt,
            raw_output: output.text.clone(),
            summary: parsed.summary.clone(),
            metadata_json: metadata_json(&parsed),
            model_used: model_info.model,
            created_at: chrono::Utc::now(),
        };

        // 6. Persist, best-effort: a failure here is logged but does not
        // fail the caller, since the parsed result is already usable.
        #[allow(unused_variables)]
        if let Err(e) = self.repository.create(&result).await {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %e, "failed to persist analysis result");
        }

        // 7. Cache insert with the mode-appropriate TTL. A tolerant fallback
        // is returned as success but is never cached (§7 fallback
        // behaviour): caching a "the model rambled" summary under the real
        // key would poison every subsequent lookup until it expires.
        if !is_fallback {
            self.cache
                .set(
                    req.review_id,
                    req.mode.clone(),
                    result,
                    req.mode.default_ttl(),
                    Some(&ctx.cancel),
                )
                .await?;
        }
        #[cfg(feature = "metrics")]
        if is_fallback {
            metrics::counter!("codeloom_orchestrator_fallback_parses_total").increment(1);
        }

        Ok(AnalysisResponse {
            summary: parsed.summary,
            dependencies: parsed.dependencies,
            shared_abstractions: parsed.shared_abstractions,
            architecture_patterns: parsed.architecture_patterns,
            recommendations: parsed.recommendations,
            duration_ms,
            input_tokens: output.input_tokens,
            output_tokens: output.output_tokens,
        })
    }
}

fn response_from_cached(cached: AnalysisResult) -> AnalysisResponse {
    let parsed: ParsedAnalysis = serde_json::from_str(&cached.metadata_json).unwrap_or(ParsedAnalysis {
        summary: cached.summary.clone(),
        dependencies: Vec::new(),
        shared_abstractions: Vec::new(),
        architecture_patterns: Vec::new(),
        recommendations: Vec::new(),
    });

    AnalysisResponse {
        summary: parsed.summary,
        dependencies: parsed.dependencies,
        shared_abstractions: parsed.shared_abstractions,
        architecture_patterns: parsed.architecture_patterns,
        recommendations: parsed.recommendations,
        duration_ms: 0,
        input_tokens: 0,
        output_tokens: 0,
    }
}

fn metadata_json(parsed: &ParsedAnalysis) -> String {
    serde_json::to_string(parsed).unwrap_or_else(|_| "{}".to_string())
}
