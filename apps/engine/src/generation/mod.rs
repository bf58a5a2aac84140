//! Suggestion generation: prompt assembly, the completion seam, and reply
//! parsing.

pub mod generator;
pub mod prompts;

pub use generator::{
    estimate_tokens, generate_suggestions, CompletionError, GenerationError, MatchAnalysis,
    SuggestionBatch, TextCompletion, MIN_JOB_DESCRIPTION_CHARS,
};
