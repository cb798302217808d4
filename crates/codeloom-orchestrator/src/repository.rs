//! Repository traits the orchestrator depends on but never implements.
//!
//! Kept as traits, not concrete `sqlx` types, so this crate never depends on
//! a SQL driver: persistence is somebody else's problem, and the core only
//! needs to agree on the shape of what gets stored (mirroring
//! `jlon-stellar`'s `repository` traits sitting behind its `LLMServiceImpl`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use codeloom_core::{AnalysisResult, CodeloomError, ReviewMode};
use uuid::Uuid;

/// Persists and retrieves [`AnalysisResult`]s, keyed by `(review_id, mode)`.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    async fn find_by_review_and_mode(
        &self,
        review_id: i64,
        mode: &ReviewMode,
    ) -> Result<Option<AnalysisResult>, CodeloomError>;

    async fn create(&self, result: &AnalysisResult) -> Result<(), CodeloomError>;

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<(), CodeloomError>;
}

/// One file open in a review session.
///
/// Addressed by a stable UUID rather than an index so a tab survives
/// reordering; at most one tab per session is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tab {
    pub id: Uuid,
    pub session_id: i64,
    pub file_path: String,
    pub file_content: String,
    pub file_size: u64,
    pub language: String,
    pub is_active: bool,
    pub tab_order: i32,
}

/// A stored multi-file analysis, distinct from the single-file
/// [`AnalysisResult`] keyed by `(review_id, mode)`: this is the record of
/// one multi-file `Analyze` call against a session's open tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredMultiFileAnalysis {
    pub file_paths: Vec<String>,
    pub reading_mode: ReviewMode,
    pub ai_response: String,
    pub duration_ms: u64,
}

/// Persists GitHub review sessions, their open-file tabs, and the
/// multi-file analyses run against them.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Opens a new tab for `session_id`. The new tab is not activated; call
    /// [`SessionRepository::set_active_tab`] separately.
    async fn open_file(
        &self,
        session_id: i64,
        file_path: &str,
        file_content: &str,
        file_size: u64,
        language: &str,
    ) -> Result<Tab, CodeloomError>;

    /// Atomically deactivates every other tab of `session_id` and activates
    /// `tab_id`.
    async fn set_active_tab(&self, session_id: i64, tab_id: Uuid) -> Result<(), CodeloomError>;

    /// Removes one tab by id. Does not touch the active-tab invariant of
    /// any other tab.
    async fn close_file(&self, tab_id: Uuid) -> Result<(), CodeloomError>;

    /// Lists every open tab of a session, in `tab_order`.
    async fn list_tabs(&self, session_id: i64) -> Result<Vec<Tab>, CodeloomError>;

    /// Records a completed multi-file analysis against a session.
    async fn store_multi_file_analysis(
        &self,
        session_id: i64,
        analysis: &StoredMultiFileAnalysis,
    ) -> Result<(), CodeloomError>;
}
