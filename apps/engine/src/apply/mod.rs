//! The suggestion application engine: path resolution, the patch policy,
//! and the batch applier.

mod applier;
mod patch;
mod path;

pub use applier::{apply_suggestions, ApplyFailure, ApplyOutcome};
pub use path::{Segment, TargetPath};

use thiserror::Error;

use crate::models::suggestion::SuggestionType;

/// A single suggestion's failure to land. Always recovered by the batch
/// applier; never escapes an apply pass.
#[derive(Debug, Clone, Error)]
pub enum ApplyError {
    /// The navigation prefix of the target could not be resolved.
    #[error("cannot resolve '{path}': {detail} at '{segment}'")]
    Navigation {
        path: String,
        segment: String,
        detail: String,
    },

    /// A string-list index was out of range for the requested edit.
    #[error("index {index} out of range for '{path}' (list has {len} items)")]
    Index {
        path: String,
        index: usize,
        len: usize,
    },

    /// The operation is not defined for the resolved target.
    #[error("cannot {op} '{path}': {detail}")]
    UnsupportedOperation {
        path: String,
        op: SuggestionType,
        detail: String,
    },
}
