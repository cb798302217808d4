use std::fmt;

/// Health status of a single probed component, or of an aggregate report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthStatus {
    /// Functioning normally.
    Healthy,
    /// Functioning, but with a known limitation (e.g. a missing model, a
    /// missing schema).
    Degraded,
    /// Not usable.
    Unhealthy,
}

impl HealthStatus {
    /// Worst-wins: an aggregate is only as healthy as its least healthy
    /// component.
    pub(crate) fn worst(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
        };
        f.write_str(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for HealthStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unhealthy_outranks_degraded_and_healthy() {
        assert_eq!(HealthStatus::Healthy.worst(HealthStatus::Unhealthy), HealthStatus::Unhealthy);
        assert_eq!(HealthStatus::Degraded.worst(HealthStatus::Unhealthy), HealthStatus::Unhealthy);
    }

    #[test]
    fn degraded_outranks_healthy() {
        assert_eq!(HealthStatus::Healthy.worst(HealthStatus::Degraded), HealthStatus::Degraded);
    }

    #[test]
    fn healthy_is_the_identity() {
        assert_eq!(HealthStatus::Healthy.worst(HealthStatus::Healthy), HealthStatus::Healthy);
    }
}
