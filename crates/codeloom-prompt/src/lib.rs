//! Prompt rendering and tolerant response parsing for the analysis
//! pipeline.
//!
//! This crate owns the two halves of the wire format that never touch the
//! network itself: turning a [`ReviewMode`] plus one or more
//! [`FileInput`]s into the text sent to the provider, and turning whatever
//! text comes back into a [`ParsedAnalysis`] the orchestrator can persist
//! and cache.

mod extractor;
mod templates;

pub use extractor::{extract, is_fallback, ParsedAnalysis};
pub use templates::{build_multi_file_prompt, build_single_file_prompt};

use codeloom_core::{FileInput, ReviewMode};

/// Renders the prompt for a review, choosing the single- or multi-file
/// template based on how many files were given.
///
/// # Panics
/// Panics if `files` is empty; callers must validate at least one file
/// before building a prompt.
pub fn build_prompt(mode: &ReviewMode, files: &[FileInput]) -> String {
    match files {
        [] => panic!("build_prompt requires at least one file"),
        [single] => build_single_file_prompt(mode, single),
        many => build_multi_file_prompt(mode, many),
    }
}
