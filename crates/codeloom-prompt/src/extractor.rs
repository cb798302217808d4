//! Tolerant extraction of a JSON object from raw model output.
//!
//! Models wrap JSON in Markdown fences more often than not, and occasionally
//! emit prose around it. This mirrors `nearai-ironclaw`'s
//! `parse_profile_json`: strip a ```` ```json ```` fence, then a bare ```` ``` ````
//! fence, then fall back to locating the outermost `{`...`}` span. If none of
//! that yields parseable JSON, the caller still gets a usable result: the raw
//! text becomes the summary, the arrays are empty, and one generic
//! recommendation is added. The caller treats this as success, not error.

use serde::{Deserialize, Serialize};

/// The structured shape every review mode's response is normalized into.
///
/// Single-file modes only ever populate `summary` and `recommendations`;
/// multi-file modes may also populate `dependencies`, `shared_abstractions`,
/// and `architecture_patterns`. Fields absent or `null` in the model's JSON
/// are normalized to empty arrays, never left absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAnalysis {
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub dependencies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub shared_abstractions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub architecture_patterns: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub recommendations: Vec<String>,
}

/// `#[serde(default)]` alone only covers an *absent* key; an explicit JSON
/// `null` still hits `Vec<String>`'s deserializer and errors. Models emit
/// `null` for "no items" as often as they omit the key entirely, so this
/// normalizes both to an empty `Vec` instead of tripping the fallback path.
fn null_as_empty_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ParsedAnalysis {
    fn fallback(raw_text: &str) -> Self {
        Self {
            summary: raw_text.trim().to_string(),
            dependencies: Vec::new(),
            shared_abstractions: Vec::new(),
            architecture_patterns: Vec::new(),
            recommendations: vec![
                "Unable to parse a structured response; review the raw model output directly."
                    .to_string(),
            ],
        }
    }
}

/// True if `extract` fell back to raw text rather than parsing real JSON.
/// The orchestrator uses this to skip caching a fallback result (`§7`: a
/// tolerant fallback is not cached).
pub fn is_fallback(parsed: &ParsedAnalysis) -> bool {
    parsed.recommendations.len() == 1
        && parsed.dependencies.is_empty()
        && parsed.shared_abstractions.is_empty()
        && parsed.architecture_patterns.is_empty()
        && parsed.recommendations[0].starts_with("Unable to parse")
}

/// Extracts a [`ParsedAnalysis`] from raw model output, never failing.
pub fn extract(raw_text: &str) -> ParsedAnalysis {
    let candidate = strip_fences(raw_text);
    let candidate = candidate.as_deref().unwrap_or(raw_text);

    if let Some(parsed) = try_parse(candidate) {
        return parsed;
    }

    if let Some(span) = outermost_braces(raw_text) {
        if let Some(parsed) = try_parse(span) {
            return parsed;
        }
    }

    ParsedAnalysis::fallback(raw_text)
}

fn try_parse(candidate: &str) -> Option<ParsedAnalysis> {
    serde_json::from_str(candidate.trim()).ok()
}

fn strip_fences(text: &str) -> Option<String> {
    let trimmed = text.trim();

    if let Some(rest) = trimmed.strip_prefix("```json") {
        return rest.strip_suffix("```").map(|s| s.trim().to_string());
    }

    if let Some(rest) = trimmed.strip_prefix("```") {
        return rest.strip_suffix("```").map(|s| s.trim().to_string());
    }

    None
}

fn outermost_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let parsed = extract(r#"{"summary": "fine", "recommendations": ["add tests"]}"#);
        assert_eq!(parsed.summary, "fine");
        assert_eq!(parsed.recommendations, vec!["add tests".to_string()]);
    }

    #[test]
    fn strips_json_fence() {
        let text = "```json\n{\"summary\": \"ok\"}\n```";
        let parsed = extract(text);
        assert_eq!(parsed.summary, "ok");
        assert!(parsed.recommendations.is_empty());
    }

    #[test]
    fn strips_bare_fence() {
        let text = "```\n{\"summary\": \"ok\"}\n```";
        let parsed = extract(text);
        assert_eq!(parsed.summary, "ok");
    }

    #[test]
    fn finds_json_embedded_in_prose() {
        let text = "Sure, here you go: {\"summary\": \"looks good\"} hope that helps!";
        let parsed = extract(text);
        assert_eq!(parsed.summary, "looks good");
    }

    #[test]
    fn missing_array_fields_normalize_to_empty_not_absent() {
        let parsed = extract(r#"{"summary": "ok"}"#);
        assert!(parsed.dependencies.is_empty());
        assert!(parsed.shared_abstractions.is_empty());
        assert!(parsed.architecture_patterns.is_empty());
    }

    #[test]
    fn null_arrays_normalize_to_empty() {
        let parsed = extract(r#"{"summary": "ok", "dependencies": null}"#);
        assert!(parsed.dependencies.is_empty());
        assert_eq!(parsed.summary, "ok");
        assert!(!is_fallback(&parsed));
    }

    #[test]
    fn unparseable_text_falls_back_to_raw_summary_with_one_recommendation() {
        let parsed = extract("the model rambled without ever producing JSON");
        assert_eq!(parsed.summary, "the model rambled without ever producing JSON");
        assert_eq!(parsed.recommendations.len(), 1);
        assert!(is_fallback(&parsed));
    }

    #[test]
    fn successful_parse_is_never_flagged_as_fallback() {
        let parsed = extract(r#"{"summary": "ok", "recommendations": ["do a thing"]}"#);
        assert!(!is_fallback(&parsed));
    }
}
