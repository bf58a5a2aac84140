//! Applies an accepted suggestion batch to a copy of a parsed CV.
//!
//! Targets are untrusted model output, so every resolution or patch failure
//! is isolated to its own suggestion: it is logged, recorded on the
//! outcome, and the loop moves on. The working copy mutates as suggestions
//! land, so later targets see earlier edits, including the index shifts
//! caused by `add` and `remove`.

use tracing::{debug, info, warn};

use super::patch::apply_patch;
use super::path::{resolve, TargetPath};
use super::ApplyError;
use crate::models::cv::ParsedCV;
use crate::models::suggestion::{Suggestion, SuggestionStatus};

/// Result of one apply pass over a suggestion batch.
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    /// The tailored document. The input document is never mutated.
    pub cv: ParsedCV,
    /// Ids of suggestions that were accepted and applied without error, in
    /// application order.
    pub applied: Vec<String>,
    /// Accepted suggestions that could not be applied.
    pub failures: Vec<ApplyFailure>,
}

impl ApplyOutcome {
    /// Number of changes actually made to the document. Accepted
    /// suggestions that failed to apply do not count.
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

#[derive(Debug, Clone)]
pub struct ApplyFailure {
    pub suggestion_id: String,
    pub error: ApplyError,
}

/// Applies every accepted suggestion to a deep copy of `cv`, preserving the
/// batch's relative order. Pending and rejected suggestions are skipped.
pub fn apply_suggestions(cv: &ParsedCV, suggestions: &[Suggestion]) -> ApplyOutcome {
    let mut tailored = cv.clone();
    let mut applied = Vec::new();
    let mut failures = Vec::new();

    let accepted: Vec<&Suggestion> = suggestions
        .iter()
        .filter(|s| s.status == SuggestionStatus::Accepted)
        .collect();
    debug!(
        "Applying {} accepted of {} total suggestions",
        accepted.len(),
        suggestions.len()
    );

    for suggestion in accepted {
        match apply_one(&mut tailored, suggestion) {
            Ok(()) => applied.push(suggestion.id.clone()),
            Err(error) => {
                warn!(
                    "Skipping suggestion {} targeting '{}': {}",
                    suggestion.id, suggestion.target, error
                );
                failures.push(ApplyFailure {
                    suggestion_id: suggestion.id.clone(),
                    error,
                });
            }
        }
    }

    info!(
        "Applied {} suggestions, {} failed",
        applied.len(),
        failures.len()
    );
    ApplyOutcome {
        cv: tailored,
        applied,
        failures,
    }
}

fn apply_one(cv: &mut ParsedCV, suggestion: &Suggestion) -> Result<(), ApplyError> {
    let path = TargetPath::parse(&suggestion.target)?;
    let parent = resolve(cv, &path)?;
    apply_patch(
        parent,
        path.last(),
        suggestion.suggestion_type,
        &suggestion.suggested,
        path.raw(),
    )
}
