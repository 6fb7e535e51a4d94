//! Error types for the draft editor

use thiserror::Error;

use crate::lifecycle::DraftStatus;
use crate::validate::ValidationResult;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The draft is not ready to submit. Carries every violated rule so
    /// the writer can fix all issues in one pass.
    #[error("Validation failed: {}", .0.errors.join("; "))]
    Validation(ValidationResult),

    /// An edit or save was attempted while the draft is frozen.
    #[error("Draft is locked (status: {status})")]
    ImmutableDraft { status: DraftStatus },

    /// An illegal state transition was requested.
    #[error("Illegal transition from status: {from}")]
    PreconditionFailed { from: DraftStatus },

    #[error("Invalid edit: {0}")]
    InvalidEdit(String),
}

pub type EditorResult<T> = Result<T, EditorError>;
