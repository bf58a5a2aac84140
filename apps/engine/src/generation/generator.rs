//! Suggestion generation pipeline.
//!
//! Builds the tailoring prompt from a parsed CV and a job description,
//! drives the completion backend through the [`TextCompletion`] seam, and
//! parses the reply into a batch of pending suggestions plus a match
//! analysis. The backend owns the transport; this module only sees prompt
//! in, text out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::prompts::{SUGGESTION_PROMPT_TEMPLATE, SUGGESTION_SYSTEM};
use crate::models::cv::ParsedCV;
use crate::models::suggestion::{Suggestion, SuggestionStatus};

/// Shortest job description worth sending to the model.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 100;

/// Total completion attempts before a malformed reply becomes an error.
const MAX_GENERATION_ATTEMPTS: u32 = 2;

// ────────────────────────────────────────────────────────────────────────────
// Completion seam
// ────────────────────────────────────────────────────────────────────────────

/// Seam to the text-generation backend.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion returned no content")]
    Empty,
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Job-fit analysis returned alongside the suggestion batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    #[serde(default)]
    pub match_score: u8,
    #[serde(default)]
    pub key_matches: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
}

/// One generation call's full result.
#[derive(Debug, Clone)]
pub struct SuggestionBatch {
    pub suggestions: Vec<Suggestion>,
    pub analysis: MatchAnalysis,
    /// Estimated from prompt and reply length; backends report no usage.
    pub tokens_used: u32,
}

#[derive(Debug, Deserialize)]
struct SuggestionReply {
    suggestions: Vec<Suggestion>,
    #[serde(default)]
    analysis: MatchAnalysis,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("job description too short: {got} chars (minimum {min})")]
    JobDescriptionTooShort { got: usize, min: usize },

    #[error("failed to serialize CV for the prompt: {0}")]
    SerializeCv(#[source] serde_json::Error),

    #[error("completion backend: {0}")]
    Completion(#[from] CompletionError),

    #[error("reply was not a valid suggestion payload after {attempts} attempts: {source}")]
    MalformedReply {
        attempts: u32,
        #[source]
        source: serde_json::Error,
    },
}

/// Generates tailoring suggestions for `cv` against `job_description`.
///
/// Every returned suggestion is stamped `pending` with its confidence
/// clamped to [0, 1], whatever the model claimed. A reply that does not
/// parse is retried once before the call fails.
pub async fn generate_suggestions(
    backend: &dyn TextCompletion,
    cv: &ParsedCV,
    job_description: &str,
    position: Option<&str>,
    company: Option<&str>,
) -> Result<SuggestionBatch, GenerationError> {
    let jd_chars = job_description.trim().chars().count();
    if jd_chars < MIN_JOB_DESCRIPTION_CHARS {
        return Err(GenerationError::JobDescriptionTooShort {
            got: jd_chars,
            min: MIN_JOB_DESCRIPTION_CHARS,
        });
    }

    let cv_json = serde_json::to_string_pretty(cv).map_err(GenerationError::SerializeCv)?;
    let prompt = SUGGESTION_PROMPT_TEMPLATE
        .replace("{cv_json}", &cv_json)
        .replace("{job_description}", job_description)
        .replace(
            "{position_context}",
            &build_position_context(position, company),
        );
    debug!("Built suggestion prompt ({} chars)", prompt.len());

    let mut attempt = 0;
    loop {
        attempt += 1;
        let raw = backend.complete(SUGGESTION_SYSTEM, &prompt).await?;
        let cleaned = strip_json_fences(&raw);

        match serde_json::from_str::<SuggestionReply>(cleaned) {
            Ok(reply) => {
                let tokens_used = estimate_tokens(&prompt) + estimate_tokens(&raw);
                let batch = finalize_batch(reply, tokens_used);
                info!(
                    "Generated {} suggestions, match score {} (~{} tokens)",
                    batch.suggestions.len(),
                    batch.analysis.match_score,
                    batch.tokens_used
                );
                return Ok(batch);
            }
            Err(source) if attempt < MAX_GENERATION_ATTEMPTS => {
                warn!(
                    "Generation attempt {}/{} returned an unparseable reply, retrying: {}",
                    attempt, MAX_GENERATION_ATTEMPTS, source
                );
            }
            Err(source) => {
                return Err(GenerationError::MalformedReply {
                    attempts: attempt,
                    source,
                });
            }
        }
    }
}

fn finalize_batch(reply: SuggestionReply, tokens_used: u32) -> SuggestionBatch {
    let mut suggestions = reply.suggestions;
    for suggestion in &mut suggestions {
        suggestion.status = SuggestionStatus::Pending;
        suggestion.confidence = suggestion.confidence.clamp(0.0, 1.0);
    }
    let mut analysis = reply.analysis;
    analysis.match_score = analysis.match_score.min(100);
    SuggestionBatch {
        suggestions,
        analysis,
        tokens_used,
    }
}

fn build_position_context(position: Option<&str>, company: Option<&str>) -> String {
    if position.is_none() && company.is_none() {
        return String::new();
    }
    let mut context = String::from("## Position Context:\n");
    if let Some(position) = position {
        context.push_str(&format!("Position: {}\n", position));
    }
    if let Some(company) = company {
        context.push_str(&format!("Company: {}\n", company));
    }
    context
}

/// Strips markdown code fences some models wrap around JSON replies.
fn strip_json_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let opened = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    opened.strip_suffix("```").unwrap_or(opened).trim()
}

/// 4-characters-per-token approximation.
pub fn estimate_tokens(text: &str) -> u32 {
    text.len().div_ceil(4) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
