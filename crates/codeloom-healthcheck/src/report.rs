//! The aggregate report a health check produces.

use crate::HealthStatus;
use chrono::{DateTime, Utc};
use std::fmt;

/// The outcome of probing a single component (provider connectivity, model
/// presence, database).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: String,
    #[cfg_attr(feature = "serde", serde(rename = "response_time_ms"))]
    pub response_time_ms: u64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub metadata: Option<serde_json::Value>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>, message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Healthy,
            message: message.into(),
            response_time_ms,
            metadata: None,
        }
    }

    pub fn degraded(name: impl Into<String>, message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Degraded,
            message: message.into(),
            response_time_ms,
            metadata: None,
        }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Unhealthy,
            message: message.into(),
            response_time_ms,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// `{overall, components}` as specified for the health endpoint JSON; a
/// `summary` count is derived rather than stored, so it can never drift from
/// `components`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HealthReport {
    pub overall: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub components: Vec<ComponentHealth>,
}

impl HealthReport {
    /// Aggregates component reports with the worst-wins rule: `unhealthy` if
    /// any component is `unhealthy`, else `degraded` if any is `degraded`,
    /// else `healthy`. An empty component list is `healthy` (vacuously: there
    /// is nothing reporting a problem).
    pub fn from_components(components: Vec<ComponentHealth>) -> Self {
        let overall = components
            .iter()
            .map(|c| c.status)
            .fold(HealthStatus::Healthy, HealthStatus::worst);

        Self {
            overall,
            timestamp: Utc::now(),
            components,
        }
    }

    /// A short, human-readable tally such as `"2/3 healthy"`.
    pub fn summary(&self) -> String {
        let healthy = self
            .components
            .iter()
            .filter(|c| c.status == HealthStatus::Healthy)
            .count();
        format!("{healthy}/{} healthy", self.components.len())
    }

    pub fn component(&self, name: &str) -> Option<&ComponentHealth> {
        self.components.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.overall, self.summary())
    }
}
