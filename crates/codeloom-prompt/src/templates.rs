//! Per-mode prompt templates.
//!
//! Each [`ReviewMode`] gets a short, fixed instruction block (depth and tone
//! vary by mode, mirroring how `jlon-stellar`'s scenario prompts layer a
//! static base instruction over dynamic per-request sections) followed by
//! the file content. Multi-file prompts additionally number each file with
//! a stable `FILE i/N: path` header so the model can refer to files
//! symbolically in its response, and append the structured-JSON contract
//! every multi-file mode must honor.

use codeloom_core::{FileInput, ReviewMode};

fn mode_instruction(mode: &ReviewMode) -> &'static str {
    match mode {
        ReviewMode::Preview => {
            "Skim the following code and give a one-paragraph impression: what it does and \
             whether anything looks obviously wrong. Do not enumerate every detail."
        }
        ReviewMode::Skim => {
            "Review the following code at a high level. Note the overall structure, the \
             apparent intent, and any immediately visible issues. Keep it brief."
        }
        ReviewMode::Scan => {
            "Scan the following code for specific concerns: unhandled errors, obvious bugs, \
             and deviations from the surrounding style. List what you find."
        }
        ReviewMode::Detailed => {
            "Review the following code in detail. Cover correctness, error handling, \
             readability, and any design concerns. Justify each point with a specific \
             reference to the code."
        }
        ReviewMode::Critical => {
            "Perform a critical review of the following code as a senior engineer gating a \
             merge. Be skeptical: look for correctness bugs, security issues, missed edge \
             cases, and structural problems. Do not soften findings."
        }
        ReviewMode::Other(_) => "Review the following code and summarize your findings.",
    }
}

const STRUCTURED_RESPONSE_CONTRACT: &str = r#"
Respond with a single JSON object and nothing else, with exactly these fields:
{
  "summary": "<string>",
  "dependencies": ["<string>", ...],
  "shared_abstractions": ["<string>", ...],
  "architecture_patterns": ["<string>", ...],
  "recommendations": ["<string>", ...]
}
Use empty arrays for fields with nothing to report. Do not wrap the JSON in markdown."#;

/// Renders a single-file prompt. No `FILE i/N` header: there is only one
/// file, so an index would be noise.
pub fn build_single_file_prompt(mode: &ReviewMode, file: &FileInput) -> String {
    format!(
        "{instruction}\n\nFile: {path}\n```\n{content}\n```",
        instruction = mode_instruction(mode),
        path = file.path,
        content = file.content,
    )
}

/// Renders a multi-file prompt with a stable `FILE i/N: path` header per
/// file (preserving input order) and the structured-JSON response contract.
///
/// Callers are expected to have already validated `files.len() >= 2`; this
/// function does not re-check it, since `codeloom-orchestrator` owns that
/// precondition and the count is fixed by the time a prompt is rendered.
pub fn build_multi_file_prompt(mode: &ReviewMode, files: &[FileInput]) -> String {
    let total = files.len();
    let mut prompt = String::new();
    prompt.push_str(mode_instruction(mode));
    prompt.push_str("\n\nYou are given multiple files from the same review. Consider them \
                      together: shared abstractions, dependencies between files, and the \
                      architecture they imply.\n");

    for (i, file) in files.iter().enumerate() {
        prompt.push_str(&format!(
            "\n--- FILE {index}/{total}: {path} ---\n```\n{content}\n```\n",
            index = i + 1,
            path = file.path,
            content = file.content,
        ));
    }

    prompt.push_str(STRUCTURED_RESPONSE_CONTRACT);
    prompt
}
