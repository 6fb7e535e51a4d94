//! # Draft Lifecycle
//!
//! The finite set of statuses a draft may occupy and the legal
//! transitions between them:
//!
//! ```text
//! draft → submitted → inReview → published
//!                              ↘ rejected
//! ```
//!
//! Only `draft` is mutable. The one writer-initiated transition is
//! `draft → submitted` (see [`crate::Draft::submit`]); everything past
//! that belongs to the external review workflow. Regressions (e.g.
//! `published → draft`) are never legal inside this subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a draft within its authoring lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftStatus {
    /// Initial state, the only one in which the writer may edit.
    Draft,
    /// Handed to the review queue; frozen for the writer.
    Submitted,
    /// Picked up by a reviewer; still frozen.
    InReview,
    /// Live on the site. Terminal.
    Published,
    /// Declined by a reviewer. Terminal for this subsystem; re-opening
    /// is a reviewer action performed elsewhere.
    Rejected,
}

impl DraftStatus {
    /// Whether content-mutating operations are accepted in this status.
    pub fn is_editable(self) -> bool {
        matches!(self, DraftStatus::Draft)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DraftStatus::Published | DraftStatus::Rejected)
    }

    /// The full transition table, shared with reviewer tooling and tests.
    ///
    /// Note this answers "is the edge legal", not "may the writer take
    /// it". The writer only ever performs `Draft → Submitted`.
    pub fn can_advance_to(self, next: DraftStatus) -> bool {
        matches!(
            (self, next),
            (DraftStatus::Draft, DraftStatus::Submitted)
                | (DraftStatus::Submitted, DraftStatus::InReview)
                | (DraftStatus::InReview, DraftStatus::Published)
                | (DraftStatus::InReview, DraftStatus::Rejected)
        )
    }
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftStatus::Draft => "draft",
            DraftStatus::Submitted => "submitted",
            DraftStatus::InReview => "inReview",
            DraftStatus::Published => "published",
            DraftStatus::Rejected => "rejected",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_draft_is_editable() {
        assert!(DraftStatus::Draft.is_editable());
        assert!(!DraftStatus::Submitted.is_editable());
        assert!(!DraftStatus::InReview.is_editable());
        assert!(!DraftStatus::Published.is_editable());
        assert!(!DraftStatus::Rejected.is_editable());
    }

    #[test]
    fn test_no_regressions_in_transition_table() {
        assert!(!DraftStatus::Submitted.can_advance_to(DraftStatus::Draft));
        assert!(!DraftStatus::Published.can_advance_to(DraftStatus::Draft));
        assert!(!DraftStatus::Rejected.can_advance_to(DraftStatus::Draft));
        assert!(!DraftStatus::InReview.can_advance_to(DraftStatus::Submitted));
    }

    #[test]
    fn test_terminal_states_advance_nowhere() {
        for next in [
            DraftStatus::Draft,
            DraftStatus::Submitted,
            DraftStatus::InReview,
            DraftStatus::Published,
            DraftStatus::Rejected,
        ] {
            assert!(!DraftStatus::Published.can_advance_to(next));
            assert!(!DraftStatus::Rejected.can_advance_to(next));
        }
    }

    #[test]
    fn test_status_serializes_camel_case() {
        let json = serde_json::to_string(&DraftStatus::InReview).unwrap();
        assert_eq!(json, r#""inReview""#);
    }
}
