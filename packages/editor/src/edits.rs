//! # Draft Edits
//!
//! High-level semantic operations a writer performs on a draft. Each
//! edit is an atomic field replacement; intermediate keystrokes are the
//! editor UI's concern, this layer only sees the settled value.
//!
//! Edits are serializable so the UI can ship them over its in-process
//! boundary unchanged.

use newsdesk_content::StructuredContent;
use newsdesk_metrics::ContentMetrics;
use serde::{Deserialize, Serialize};

use crate::errors::EditorError;

/// A single writer-initiated change to a draft field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DraftEdit {
    SetTitle { title: String },

    SetSubtitle { subtitle: String },

    SetExcerpt { excerpt: String },

    /// Replace the whole body tree (atomic replacement, not a diff).
    SetBody { body: StructuredContent },

    SetCategory { category_id: Option<String> },

    AddTag { tag: String },

    RemoveTag { tag: String },
}

impl DraftEdit {
    /// Validate without applying.
    pub fn validate(&self) -> Result<(), EditorError> {
        match self {
            DraftEdit::AddTag { tag } | DraftEdit::RemoveTag { tag }
                if tag.trim().is_empty() =>
            {
                Err(EditorError::InvalidEdit("tag must not be blank".to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Whether applying this edit replaces the body tree.
    pub fn touches_body(&self) -> bool {
        matches!(self, DraftEdit::SetBody { .. })
    }
}

/// Result of applying an edit to a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    /// New in-memory version number.
    pub version: u64,

    /// Whether the body (and therefore the derived metrics) changed.
    pub body_changed: bool,

    /// Metrics after the edit, always consistent with the current body.
    pub metrics: ContentMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_serialization() {
        let edit = DraftEdit::SetTitle {
            title: "Hello World".to_string(),
        };

        let json = serde_json::to_string(&edit).unwrap();
        let deserialized: DraftEdit = serde_json::from_str(&json).unwrap();

        assert_eq!(edit, deserialized);
    }

    #[test]
    fn test_blank_tag_is_rejected() {
        let edit = DraftEdit::AddTag {
            tag: "  ".to_string(),
        };
        assert!(matches!(
            edit.validate(),
            Err(EditorError::InvalidEdit(_))
        ));
    }

    #[test]
    fn test_only_set_body_touches_body() {
        assert!(DraftEdit::SetBody {
            body: StructuredContent::empty()
        }
        .touches_body());
        assert!(!DraftEdit::SetTitle {
            title: "t".to_string()
        }
        .touches_body());
    }
}
