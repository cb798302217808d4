//! Configuration for [`crate::OllamaProvider`].

use std::time::Duration;

/// Connection details for an Ollama-compatible backend.
///
/// Reading `OLLAMA_ENDPOINT`/`OLLAMA_MODEL` from the environment is the
/// enclosing binary's job (env loading is out of scope here); this struct
/// only describes the shape once those values are known.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub(crate) endpoint: String,
    pub(crate) model: String,
    pub(crate) display_name: String,
    pub(crate) request_timeout: Duration,
}

impl ProviderConfig {
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }
}

/// Builder for [`ProviderConfig`].
pub struct ProviderConfigBuilder {
    endpoint: String,
    model: String,
    display_name: Option<String>,
    request_timeout: Duration,
}

impl ProviderConfigBuilder {
    fn new() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "qwen2.5-coder".to_string(),
            display_name: None,
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Base URL of the Ollama-compatible server. Default: `http://localhost:11434`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Model name passed on every `generate` call. Default: `qwen2.5-coder`.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Human-readable name surfaced in [`crate::ModelInfo`]. Defaults to the
    /// model name if unset.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Timeout applied to every HTTP call. Default: 120 seconds.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn build(self) -> ProviderConfig {
        let display_name = self.display_name.unwrap_or_else(|| self.model.clone());
        ProviderConfig {
            endpoint: self.endpoint,
            model: self.model,
            display_name,
            request_timeout: self.request_timeout,
        }
    }
}

impl Default for ProviderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
