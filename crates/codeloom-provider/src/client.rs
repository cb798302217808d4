//! `OllamaProvider`: the one component that speaks the provider wire
//! protocol, grounded on `jlon-stellar`'s `LLMClient` (same `reqwest::Client`
//! built once with a timeout, same status-code-driven error mapping).

use crate::config::ProviderConfig;
use crate::{GenerateOutput, Provider};
use async_trait::async_trait;
use codeloom_core::{Cancellation, CodeloomError, ModelInfo};
use codeloom_healthcheck::probes::ProviderProbe;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Talks to an Ollama-compatible `/api/generate` endpoint.
///
/// Builds its `reqwest::Client` once at construction, matching `LLMClient`'s
/// shape; never retries internally (`§9`: retry policy belongs to the
/// caller, which here is the circuit breaker plus the orchestrator).
pub struct OllamaProvider {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl OllamaProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("failed to build reqwest client");
        Self { http, config }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.endpoint.trim_end_matches('/'))
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn generate(
        &self,
        prompt: &str,
        cancel: &Cancellation,
    ) -> Result<GenerateOutput, CodeloomError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "calling provider");

        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CodeloomError::Cancelled),
            result = self.http.post(self.generate_url()).json(&request).send() => {
                result.map_err(map_transport_error)?
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CodeloomError::provider_unavailable(ProviderHttpError {
                status: status.as_u16(),
                body,
            }));
        }

        let body: GenerateResponse = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CodeloomError::Cancelled),
            result = response.json() => {
                result.map_err(|e| CodeloomError::provider_unavailable(e))?
            }
        };

        Ok(GenerateOutput {
            text: body.response,
            input_tokens: body.prompt_eval_count.unwrap_or(0),
            output_tokens: body.eval_count.unwrap_or(0),
        })
    }

    async fn health_check(&self) -> Result<(), CodeloomError> {
        let response = self
            .http
            .get(self.tags_url())
            .timeout(Duration::from_secs(3))
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(CodeloomError::provider_unavailable(ProviderHttpError {
                status: response.status().as_u16(),
                body: String::new(),
            }))
        }
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: "ollama".to_string(),
            model: self.config.model.clone(),
            display_name: self.config.display_name.clone(),
        }
    }
}

#[async_trait]
impl ProviderProbe for OllamaProvider {
    async fn ping(&self) -> Result<(), CodeloomError> {
        self.health_check().await
    }

    async fn list_models(&self) -> Result<Vec<String>, CodeloomError> {
        let response = self
            .http
            .get(self.tags_url())
            .timeout(Duration::from_secs(3))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(CodeloomError::provider_unavailable(ProviderHttpError {
                status: response.status().as_u16(),
                body: String::new(),
            }));
        }

        let body: TagsResponse = response
            .json()
            .await
            .map_err(|e| CodeloomError::provider_unavailable(e))?;

        Ok(body.models.into_iter().map(|m| m.name).collect())
    }
}

/// Maps a transport-level failure to [`CodeloomError::ProviderUnavailable`].
///
/// A `reqwest` timeout here is the provider's own `request_timeout` elapsing,
/// not the caller cancelling — that is a slow/unresponsive backend, exactly
/// what the circuit breaker exists to detect and fail fast against. Genuine
/// caller cancellation is handled separately, by racing the request future
/// against [`Cancellation::cancelled`] in [`OllamaProvider::generate`].
fn map_transport_error(e: reqwest::Error) -> CodeloomError {
    CodeloomError::provider_unavailable(e)
}

#[derive(Debug, thiserror::Error)]
#[error("provider returned HTTP {status}: {body}")]
struct ProviderHttpError {
    status: u16,
    body: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagsModel>,
}

#[derive(Deserialize)]
struct TagsModel {
    name: String,
}
