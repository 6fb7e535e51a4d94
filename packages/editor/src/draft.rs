//! # Draft Aggregate
//!
//! A Draft is the record representing one article from first keystroke
//! to publication. It is mutated only through [`Draft::apply`], which
//! enforces the mutability rule and keeps the derived metrics cache
//! consistent with the body on every change, before any autosave
//! debounce window opens, so persisted `(body, word_count,
//! read_time_minutes)` triples always agree.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use newsdesk_content::StructuredContent;
use newsdesk_metrics::{compute_metrics, ContentMetrics};
use serde::{Deserialize, Serialize};

use crate::edits::{DraftEdit, EditOutcome};
use crate::errors::EditorError;
use crate::lifecycle::DraftStatus;
use crate::validate::{validate, ValidationResult};

/// One article through its authoring lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: String,

    /// Owning writer; the record is scoped to this author.
    pub author_id: String,

    pub title: String,
    pub subtitle: String,
    pub excerpt: String,

    /// The article body tree. Source of truth for the metrics below.
    pub body: StructuredContent,

    pub category_id: Option<String>,
    pub tags: BTreeSet<String>,

    /// Cached from `body`; recomputed whenever the body changes.
    pub word_count: u32,
    pub read_time_minutes: u32,

    pub status: DraftStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,

    /// Set when the writer discards the draft (soft delete).
    pub deleted_at: Option<DateTime<Utc>>,

    /// In-memory edit counter, increments on each applied edit.
    #[serde(skip)]
    version: u64,
}

impl Draft {
    /// A brand-new empty draft, owned by `author_id`, in `draft` status.
    pub fn new(id: impl Into<String>, author_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            title: String::new(),
            subtitle: String::new(),
            excerpt: String::new(),
            body: StructuredContent::empty(),
            category_id: None,
            tags: BTreeSet::new(),
            word_count: 0,
            read_time_minutes: 0,
            status: DraftStatus::Draft,
            created_at: now,
            updated_at: now,
            submitted_at: None,
            deleted_at: None,
            version: 0,
        }
    }

    /// Current in-memory version number.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the writer may still mutate this draft.
    pub fn is_editable(&self) -> bool {
        self.status.is_editable() && self.deleted_at.is_none()
    }

    /// The current derived-metrics cache.
    pub fn metrics(&self) -> ContentMetrics {
        ContentMetrics {
            word_count: self.word_count,
            read_time_minutes: self.read_time_minutes,
        }
    }

    /// Check this draft against the publication-readiness rules.
    pub fn validate(&self) -> ValidationResult {
        validate(self)
    }

    /// Apply a writer edit.
    ///
    /// Rejected with [`EditorError::ImmutableDraft`] once the draft has
    /// left the `draft` state. On a body change the metrics cache is
    /// recomputed synchronously before returning.
    pub fn apply(&mut self, edit: DraftEdit, now: DateTime<Utc>) -> Result<EditOutcome, EditorError> {
        if !self.is_editable() {
            return Err(EditorError::ImmutableDraft {
                status: self.status,
            });
        }

        edit.validate()?;

        let body_changed = match edit {
            DraftEdit::SetTitle { title } => {
                self.title = title;
                false
            }
            DraftEdit::SetSubtitle { subtitle } => {
                self.subtitle = subtitle;
                false
            }
            DraftEdit::SetExcerpt { excerpt } => {
                self.excerpt = excerpt;
                false
            }
            DraftEdit::SetBody { body } => {
                self.body = body;
                true
            }
            DraftEdit::SetCategory { category_id } => {
                self.category_id = category_id;
                false
            }
            DraftEdit::AddTag { tag } => {
                self.tags.insert(tag.trim().to_string());
                false
            }
            DraftEdit::RemoveTag { tag } => {
                self.tags.remove(tag.trim());
                false
            }
        };

        if body_changed {
            let metrics = compute_metrics(&self.body);
            self.word_count = metrics.word_count;
            self.read_time_minutes = metrics.read_time_minutes;
        }

        self.updated_at = now;
        self.version += 1;

        Ok(EditOutcome {
            version: self.version,
            body_changed,
            metrics: self.metrics(),
        })
    }

    /// The writer-initiated `draft → submitted` transition.
    ///
    /// Fails with [`EditorError::PreconditionFailed`] unless the status
    /// is exactly `draft`, and with [`EditorError::Validation`] carrying
    /// every violated rule when the draft is not publication-ready. On
    /// success sets `submitted_at` and `updated_at`; the caller persists
    /// the transition through the repository.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<(), EditorError> {
        if self.status != DraftStatus::Draft || self.deleted_at.is_some() {
            return Err(EditorError::PreconditionFailed {
                from: self.status,
            });
        }

        let result = validate(self);
        if !result.ok {
            return Err(EditorError::Validation(result));
        }

        self.status = DraftStatus::Submitted;
        self.submitted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Writer-initiated soft delete, legal only while in `draft` status.
    /// A submitted record belongs to the review workflow.
    pub fn discard(&mut self, now: DateTime<Utc>) -> Result<(), EditorError> {
        if self.status != DraftStatus::Draft {
            return Err(EditorError::PreconditionFailed {
                from: self.status,
            });
        }

        if self.deleted_at.is_none() {
            self.deleted_at = Some(now);
            self.updated_at = now;
        }
        Ok(())
    }
}
