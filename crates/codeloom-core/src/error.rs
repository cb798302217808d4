//! The shared error taxonomy for the codeloom resilience core.
//!
//! [`CodeloomError`] plays the same role here that `ResilienceError<E>` plays
//! in a generic Tower resilience stack: every component in the workspace
//! returns this one type instead of each crate minting its own error enum
//! and forcing callers to write `From` boilerplate to compose them.
//!
//! Because `codeloom-core` sits at the bottom of the dependency graph (every
//! other crate depends on it, not the reverse), variants that wrap a cause
//! from a downstream crate (the HTTP provider, the repository) cannot name
//! that crate's concrete error type without creating a cycle. Those variants
//! instead box `dyn std::error::Error + Send + Sync`, and the constructor
//! helpers below accept `impl Into<BoxError>` so call sites never have to
//! box manually.

/// Alias for the boxed causes carried by [`CodeloomError::ProviderUnavailable`]
/// and [`CodeloomError::PersistenceError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error taxonomy shared by every component in the workspace.
///
/// Each variant corresponds to one of the kinds in the error handling
/// design: a caller-facing precondition failure, a resilience-pattern
/// rejection, or a wrapped cause from a downstream collaborator.
#[derive(Debug, thiserror::Error)]
pub enum CodeloomError {
    /// A caller-supplied precondition was violated (empty query, missing
    /// files, malformed id).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request carried no usable identity.
    #[error("unauthenticated")]
    Unauthenticated,

    /// The caller's identity was present but not permitted to act.
    #[error("forbidden")]
    Forbidden,

    /// The rate limiter denied the call.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until the caller's bucket is expected to admit another call.
        retry_after_secs: u64,
    },

    /// The requested entity or cache key was absent when the caller required
    /// its presence.
    #[error("not found: {0}")]
    NotFound(String),

    /// The circuit breaker rejected the call without invoking the provider.
    #[error("circuit breaker '{breaker}' is open")]
    CircuitOpen {
        /// Name of the breaker instance that rejected the call.
        breaker: String,
    },

    /// The provider call failed or returned a non-success status.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(#[source] BoxError),

    /// The provider returned text we could not structurally use and the
    /// tolerant fallback was not acceptable for this caller.
    #[error("provider returned an unusable response: {0}")]
    ProviderInvalidResponse(String),

    /// A repository call failed.
    #[error("persistence error: {0}")]
    PersistenceError(#[source] BoxError),

    /// The caller's context was cancelled before the operation completed.
    #[error("operation cancelled")]
    Cancelled,

    /// An invariant was violated; this is always a bug, never caller input.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CodeloomError {
    /// Wraps a cause from the provider adapter as [`CodeloomError::ProviderUnavailable`].
    pub fn provider_unavailable(cause: impl Into<BoxError>) -> Self {
        Self::ProviderUnavailable(cause.into())
    }

    /// Wraps a cause from a repository as [`CodeloomError::PersistenceError`].
    pub fn persistence(cause: impl Into<BoxError>) -> Self {
        Self::PersistenceError(cause.into())
    }

    /// Returns `true` if this is a rate-limiting rejection.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Returns `true` if this is a circuit-breaker rejection.
    pub fn is_circuit_open(&self) -> bool {
        matches!(self, Self::CircuitOpen { .. })
    }

    /// Returns `true` if the operation was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The HTTP status code an outer HTTP layer should map this error to.
    ///
    /// Kept here (rather than depending on an HTTP crate) so the core can
    /// hand a ready-to-use status to any transport without pulling in e.g.
    /// `http` or `axum` as a dependency.
    pub fn status_hint(&self) -> u16 {
        match self {
            Self::InvalidArgument(_) => 400,
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound(_) => 404,
            Self::RateLimited { .. } => 429,
            Self::CircuitOpen { .. } => 503,
            Self::ProviderUnavailable(_) => 503,
            Self::ProviderInvalidResponse(_) => 502,
            Self::PersistenceError(_) => 500,
            Self::Cancelled => 499,
            Self::Internal(_) => 500,
        }
    }
}

/// Human-readable label for the error kind, independent of the `Display`
/// message (which may include caller-supplied text unsuitable for metrics
/// labels).
impl CodeloomError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::RateLimited { .. } => "rate_limited",
            Self::NotFound(_) => "not_found",
            Self::CircuitOpen { .. } => "circuit_open",
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::ProviderInvalidResponse(_) => "provider_invalid_response",
            Self::PersistenceError(_) => "persistence_error",
            Self::Cancelled => "cancelled",
            Self::Internal(_) => "internal",
        }
    }
}
