//! Configuration for the health aggregator.

use std::time::Duration;

/// Tunables for [`crate::HealthAggregator`].
#[derive(Debug, Clone)]
pub struct HealthAggregatorConfig {
    pub(crate) probe_timeout: Duration,
    pub(crate) required_model: String,
}

impl HealthAggregatorConfig {
    pub fn builder() -> HealthAggregatorConfigBuilder {
        HealthAggregatorConfigBuilder::new()
    }
}

impl Default for HealthAggregatorConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(2),
            required_model: String::new(),
        }
    }
}

/// Builder for [`HealthAggregatorConfig`].
pub struct HealthAggregatorConfigBuilder {
    probe_timeout: Duration,
    required_model: String,
}

impl HealthAggregatorConfigBuilder {
    fn new() -> Self {
        let default = HealthAggregatorConfig::default();
        Self {
            probe_timeout: default.probe_timeout,
            required_model: default.required_model,
        }
    }

    /// Per-probe timeout applied independently to each of the three probes.
    ///
    /// Default: 2 seconds.
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// The model name that must appear in the provider's catalog for the
    /// `ollama_model` component to report healthy rather than degraded.
    pub fn required_model(mut self, model: impl Into<String>) -> Self {
        self.required_model = model.into();
        self
    }

    pub fn build(self) -> HealthAggregatorConfig {
        HealthAggregatorConfig {
            probe_timeout: self.probe_timeout,
            required_model: self.required_model,
        }
    }
}

impl Default for HealthAggregatorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HealthAggregatorConfig::builder().build();
        assert_eq!(config.probe_timeout, Duration::from_secs(2));
        assert_eq!(config.required_model, "");
    }

    #[test]
    fn custom_values() {
        let config = HealthAggregatorConfig::builder()
            .probe_timeout(Duration::from_secs(3))
            .required_model("qwen2.5-coder")
            .build();
        assert_eq!(config.probe_timeout, Duration::from_secs(3));
        assert_eq!(config.required_model, "qwen2.5-coder");
    }
}
