//! The three-probe health aggregator.

use crate::config::HealthAggregatorConfig;
use crate::probes::{DatabaseProbe, ProviderProbe};
use crate::report::{ComponentHealth, HealthReport};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A named check for whether one of the orchestrator's own collaborators
/// (cache, breaker, limiter, provider, ...) was actually wired up. An unset
/// reference is reported `unhealthy`; this costs nothing and performs no I/O,
/// so it runs alongside the three network probes rather than gating them.
pub struct SubServiceCheck {
    pub name: String,
    pub initialized: bool,
}

/// Runs the three cheap liveness/readiness probes described for the code
/// review service: provider connectivity, model presence, and database
/// reachability, plus any sub-service presence checks the caller supplies.
///
/// No generation call is ever made here; a "probe" is a status code and a
/// model list, not a real analysis.
pub struct HealthAggregator {
    provider: Arc<dyn ProviderProbe>,
    database: Arc<dyn DatabaseProbe>,
    config: HealthAggregatorConfig,
}

impl HealthAggregator {
    pub fn new(
        provider: Arc<dyn ProviderProbe>,
        database: Arc<dyn DatabaseProbe>,
        config: HealthAggregatorConfig,
    ) -> Self {
        Self {
            provider,
            database,
            config,
        }
    }

    /// Runs all probes concurrently under `config.probe_timeout` each, plus
    /// any sub-service presence checks, and aggregates into one report.
    pub async fn check(&self, sub_services: &[SubServiceCheck]) -> HealthReport {
        let (provider, model, database) = tokio::join!(
            self.probe_provider(),
            self.probe_model(),
            self.probe_database(),
        );

        let mut components = vec![provider, model, database];
        components.extend(sub_services.iter().map(Self::sub_service_component));

        #[cfg(feature = "tracing")]
        for component in &components {
            tracing::debug!(
                component = %component.name,
                status = %component.status,
                "health probe completed"
            );
        }

        #[cfg(feature = "metrics")]
        for component in &components {
            metrics::gauge!("codeloom_health_component_status", "component" => component.name.clone())
                .set(match component.status {
                    crate::HealthStatus::Healthy => 0.0,
                    crate::HealthStatus::Degraded => 1.0,
                    crate::HealthStatus::Unhealthy => 2.0,
                });
        }

        HealthReport::from_components(components)
    }

    async fn probe_provider(&self) -> ComponentHealth {
        let start = Instant::now();
        match tokio::time::timeout(self.config.probe_timeout, self.provider.ping()).await {
            Ok(Ok(())) => ComponentHealth::healthy("provider", "reachable", elapsed_ms(start)),
            Ok(Err(e)) => ComponentHealth::unhealthy("provider", e.to_string(), elapsed_ms(start)),
            Err(_) => ComponentHealth::unhealthy("provider", "probe timed out", elapsed_ms(start)),
        }
    }

    async fn probe_model(&self) -> ComponentHealth {
        let start = Instant::now();
        match tokio::time::timeout(self.config.probe_timeout, self.provider.list_models()).await {
            Ok(Ok(models)) => {
                if self.config.required_model.is_empty() {
                    ComponentHealth::healthy("ollama_model", "no required model configured", elapsed_ms(start))
                } else if models.iter().any(|m| m == &self.config.required_model) {
                    ComponentHealth::healthy(
                        "ollama_model",
                        format!("model '{}' present", self.config.required_model),
                        elapsed_ms(start),
                    )
                } else {
                    ComponentHealth::degraded(
                        "ollama_model",
                        format!("required model '{}' not found in catalog", self.config.required_model),
                        elapsed_ms(start),
                    )
                }
            }
            Ok(Err(e)) => ComponentHealth::degraded(
                "ollama_model",
                format!("could not parse model catalog: {e}"),
                elapsed_ms(start),
            ),
            Err(_) => ComponentHealth::degraded("ollama_model", "probe timed out", elapsed_ms(start)),
        }
    }

    async fn probe_database(&self) -> ComponentHealth {
        let start = Instant::now();
        match tokio::time::timeout(self.config.probe_timeout, self.database.ping()).await {
            Ok(Ok(())) => match tokio::time::timeout(self.config.probe_timeout, self.database.schema_exists()).await
            {
                Ok(Ok(true)) => ComponentHealth::healthy("database", "reachable, schema present", elapsed_ms(start)),
                Ok(Ok(false)) => {
                    ComponentHealth::degraded("database", "reachable, schema missing", elapsed_ms(start))
                }
                Ok(Err(e)) => ComponentHealth::degraded("database", format!("schema probe failed: {e}"), elapsed_ms(start)),
                Err(_) => ComponentHealth::degraded("database", "schema probe timed out", elapsed_ms(start)),
            },
            Ok(Err(e)) => ComponentHealth::unhealthy("database", e.to_string(), elapsed_ms(start)),
            Err(_) => ComponentHealth::unhealthy("database", "ping timed out", elapsed_ms(start)),
        }
    }

    fn sub_service_component(check: &SubServiceCheck) -> ComponentHealth {
        if check.initialized {
            ComponentHealth::healthy(check.name.clone(), "initialized", 0)
        } else {
            ComponentHealth::unhealthy(check.name.clone(), "not initialized", 0)
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::test_doubles::{FixedDatabaseProbe, FixedProviderProbe};
    use crate::HealthStatus;

    fn aggregator(provider: FixedProviderProbe, database: FixedDatabaseProbe, required_model: &str) -> HealthAggregator {
        HealthAggregator::new(
            Arc::new(provider),
            Arc::new(database),
            HealthAggregatorConfig::builder()
                .required_model(required_model)
                .probe_timeout(Duration::from_millis(200))
                .build(),
        )
    }

    #[tokio::test]
    async fn all_healthy_yields_overall_healthy() {
        let agg = aggregator(
            FixedProviderProbe {
                reachable: true,
                models: vec!["qwen2.5-coder".into()],
            },
            FixedDatabaseProbe {
                reachable: true,
                schema_present: true,
            },
            "qwen2.5-coder",
        );

        let report = agg.check(&[]).await;
        assert_eq!(report.overall, HealthStatus::Healthy);
        assert_eq!(report.components.len(), 3);
    }

    #[tokio::test]
    async fn missing_required_model_is_degraded() {
        let agg = aggregator(
            FixedProviderProbe {
                reachable: true,
                models: vec!["llama3".into()],
            },
            FixedDatabaseProbe {
                reachable: true,
                schema_present: true,
            },
            "qwen2.5-coder",
        );

        let report = agg.check(&[]).await;
        assert_eq!(report.overall, HealthStatus::Degraded);
        let model_component = report.component("ollama_model").unwrap();
        assert_eq!(model_component.status, HealthStatus::Degraded);
        assert!(model_component.message.contains("qwen2.5-coder"));
    }

    #[tokio::test]
    async fn provider_down_is_unhealthy() {
        let agg = aggregator(
            FixedProviderProbe {
                reachable: false,
                models: vec![],
            },
            FixedDatabaseProbe {
                reachable: true,
                schema_present: true,
            },
            "",
        );

        let report = agg.check(&[]).await;
        assert_eq!(report.overall, HealthStatus::Unhealthy);
        assert_eq!(report.component("provider").unwrap().status, HealthStatus::Unhealthy);
    }

    #[tokio::test]
    async fn database_unreachable_is_unhealthy() {
        let agg = aggregator(
            FixedProviderProbe {
                reachable: true,
                models: vec![],
            },
            FixedDatabaseProbe {
                reachable: false,
                schema_present: false,
            },
            "",
        );

        let report = agg.check(&[]).await;
        assert_eq!(report.overall, HealthStatus::Unhealthy);
    }

    #[tokio::test]
    async fn missing_schema_is_degraded_not_unhealthy() {
        let agg = aggregator(
            FixedProviderProbe {
                reachable: true,
                models: vec![],
            },
            FixedDatabaseProbe {
                reachable: true,
                schema_present: false,
            },
            "",
        );

        let report = agg.check(&[]).await;
        assert_eq!(report.component("database").unwrap().status, HealthStatus::Degraded);
    }

    #[tokio::test]
    async fn uninitialized_sub_service_reports_unhealthy() {
        let agg = aggregator(
            FixedProviderProbe {
                reachable: true,
                models: vec![],
            },
            FixedDatabaseProbe {
                reachable: true,
                schema_present: true,
            },
            "",
        );

        let report = agg
            .check(&[SubServiceCheck {
                name: "provider_adapter".into(),
                initialized: false,
            }])
            .await;

        assert_eq!(report.overall, HealthStatus::Unhealthy);
        assert_eq!(
            report.component("provider_adapter").unwrap().status,
            HealthStatus::Unhealthy
        );
    }
}
