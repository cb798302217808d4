//! Data-model entities shared across every component of the core.
//!
//! `ReviewMode` and `AnalysisResult` live here, rather than in
//! `codeloom-orchestrator`, because the cache, the provider adapter, and the
//! orchestrator all need to name them and the orchestrator depends on the
//! other crates (not the other way around).

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// One of the five reading strategies that selects a prompt template and
/// expected response shape.
///
/// `Other` preserves any wire value outside the known set so the cache and
/// repository round-trip modes they don't recognize rather than rejecting
/// them (the cache "does not validate mode").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReviewMode {
    Preview,
    Skim,
    Scan,
    Detailed,
    Critical,
    /// Any mode string outside the known set, preserved verbatim.
    Other(String),
}

// Serialized as its bare wire string (e.g. `"skim"`, `"exhaustive"`) rather
// than as a tagged enum, so `Other` round-trips indistinguishably from the
// known variants and callers never see the enum's Rust-side shape.
#[cfg(feature = "serde")]
impl serde::Serialize for ReviewMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ReviewMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("ReviewMode::from_str is infallible"))
    }
}

impl ReviewMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Preview => "preview",
            Self::Skim => "skim",
            Self::Scan => "scan",
            Self::Detailed => "detailed",
            Self::Critical => "critical",
            Self::Other(s) => s,
        }
    }

    /// Default cache TTL for results produced under this mode (§4.6: "the
    /// mode-appropriate TTL (default 1 hour)"). Every known mode currently
    /// shares the one-hour default; the per-mode match exists so a future
    /// mode can diverge without touching callers.
    pub fn default_ttl(&self) -> std::time::Duration {
        match self {
            Self::Preview
            | Self::Skim
            | Self::Scan
            | Self::Detailed
            | Self::Critical
            | Self::Other(_) => std::time::Duration::from_secs(3600),
        }
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "preview" => Self::Preview,
            "skim" => Self::Skim,
            "scan" => Self::Scan,
            "detailed" => Self::Detailed,
            "critical" => Self::Critical,
            other => Self::Other(other.to_string()),
        })
    }
}

/// Identifies which provider and model produced an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelInfo {
    pub provider: String,
    pub model: String,
    pub display_name: String,
}

/// One file's worth of input to the analysis orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileInput {
    pub path: String,
    pub content: String,
    pub size_bytes: u64,
}

/// An immutable analysis produced for a single `(review_id, mode)` key.
///
/// Immutable after creation; `(review_id, mode)` is the cache and
/// repository lookup key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    pub review_id: i64,
    pub mode: ReviewMode,
    pub prompt: String,
    pub raw_output: String,
    pub summary: String,
    /// Opaque JSON blob of whatever structured fields the mode produced,
    /// serialized by the caller (kept as a string so this crate does not
    /// need to depend on serde_json just to store an already-decided shape).
    pub metadata_json: String,
    pub model_used: String,
    pub created_at: DateTime<Utc>,
}
