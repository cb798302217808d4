//! The request/response pair for [`crate::Orchestrator::analyze`], and the
//! per-call context carrying cancellation and correlation fields.

use codeloom_core::{Cancellation, FileInput, ReviewMode};

/// A single `Analyze` call: one or more files read under one mode.
///
/// `identity` is the key the rate limiter checks against (a user id or, for
/// anonymous callers, a client IP) — the orchestrator does not distinguish
/// the two keyspaces itself, that choice is the caller's.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub review_id: i64,
    pub mode: ReviewMode,
    pub files: Vec<FileInput>,
    pub identity: String,
    /// Sampling temperature in `[0, 1]`, if the caller wants to override the
    /// provider's default.
    pub temperature: Option<f32>,
}

/// The per-request fields attached to the orchestrator's tracing span and
/// threaded through every suspension point for cooperative cancellation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: String,
    pub user_id: Option<String>,
    pub request_id: String,
    pub cancel: Cancellation,
}

impl RequestContext {
    pub fn new(correlation_id: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            user_id: None,
            request_id: request_id.into(),
            cancel: Cancellation::new(),
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_cancellation(mut self, cancel: Cancellation) -> Self {
        self.cancel = cancel;
        self
    }
}

/// The parsed, observability-annotated result of an `Analyze` call.
///
/// All four list fields are always present, possibly empty — never absent
/// — whether the provider's response parsed as structured JSON or fell back
/// to a raw-text summary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResponse {
    pub summary: String,
    pub dependencies: Vec<String>,
    pub shared_abstractions: Vec<String>,
    pub architecture_patterns: Vec<String>,
    pub recommendations: Vec<String>,
    pub duration_ms: u64,
    pub input_tokens: u32,
    pub output_tokens: u32,
}
