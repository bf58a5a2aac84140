//! Core engine of an AI-assisted CV tailoring service.
//!
//! A parsed CV and a job description go in; a reviewed batch of
//! fine-grained edit suggestions comes back out as a tailored CV. The
//! crate covers suggestion generation (behind a completion seam), review
//! bookkeeping, patch application, and completeness scoring. Transport,
//! storage, and rendering belong to the hosting service.

pub mod apply;
pub mod completeness;
pub mod generation;
pub mod models;
pub mod session;

pub use apply::{apply_suggestions, ApplyError, ApplyFailure, ApplyOutcome};
pub use completeness::completeness_score;
pub use generation::{
    generate_suggestions, CompletionError, GenerationError, MatchAnalysis, SuggestionBatch,
    TextCompletion,
};
pub use models::cv::ParsedCV;
pub use models::suggestion::{CVSection, Suggestion, SuggestionStatus, SuggestionType};
pub use session::{DecisionStats, NewSession, StatusUpdate, SuggestionSession};
