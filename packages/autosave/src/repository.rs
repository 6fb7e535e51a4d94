//! # Draft Repository
//!
//! The persistence contract consumed by the autosave coordinator and the
//! editing session. The real implementation fronts the relational
//! datastore; [`InMemoryDraftStore`] backs tests and local development.
//!
//! Records are keyed by draft id and scoped to the owning author. While
//! a record's status is `draft` it belongs to the writer's session; once
//! the status moves on, writer-side updates are conflicts.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsdesk_content::StructuredContent;
use newsdesk_editor::{Draft, DraftStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Draft not found: {draft_id}")]
    NotFound { draft_id: String },

    /// Transient storage failure; the next debounce window retries.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The stored record changed underneath the session (another process
    /// advanced its status, or the optimistic check failed).
    #[error("Conflicting write detected for draft: {draft_id}")]
    Conflict { draft_id: String },
}

impl PersistenceError {
    /// Whether the next edit's debounce window may silently retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PersistenceError::Unavailable(_))
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Partial update of a stored draft record.
///
/// Autosave always writes the body together with the metrics derived
/// from it, so a reader can never observe a `word_count` that does not
/// correspond to the stored body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<StructuredContent>,
    /// `Some(None)` clears the category.
    pub category_id: Option<Option<String>>,
    pub tags: Option<BTreeSet<String>>,
    pub word_count: Option<u32>,
    pub read_time_minutes: Option<u32>,
    pub status: Option<DraftStatus>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency guard: when set, implementations must
    /// reject the write if the stored record's `updated_at` differs.
    pub expected_updated_at: Option<DateTime<Utc>>,
}

impl DraftPatch {
    fn empty(updated_at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            subtitle: None,
            excerpt: None,
            body: None,
            category_id: None,
            tags: None,
            word_count: None,
            read_time_minutes: None,
            status: None,
            submitted_at: None,
            deleted_at: None,
            updated_at,
            expected_updated_at: None,
        }
    }

    /// Everything one autosave persists: content fields plus the metrics
    /// derived from the body, in a single write.
    pub fn content_snapshot(draft: &Draft) -> Self {
        Self {
            title: Some(draft.title.clone()),
            subtitle: Some(draft.subtitle.clone()),
            excerpt: Some(draft.excerpt.clone()),
            body: Some(draft.body.clone()),
            category_id: Some(draft.category_id.clone()),
            tags: Some(draft.tags.clone()),
            word_count: Some(draft.word_count),
            read_time_minutes: Some(draft.read_time_minutes),
            ..Self::empty(draft.updated_at)
        }
    }

    /// The `draft → submitted` transition: the final content snapshot
    /// and the status fields, atomically in one write.
    pub fn submission(draft: &Draft) -> Self {
        Self {
            status: Some(draft.status),
            submitted_at: draft.submitted_at,
            ..Self::content_snapshot(draft)
        }
    }

    /// Writer-initiated soft delete.
    pub fn discarded(draft: &Draft) -> Self {
        Self {
            deleted_at: draft.deleted_at,
            ..Self::empty(draft.updated_at)
        }
    }

    /// Whether the patch carries any content-bearing field.
    pub fn touches_content(&self) -> bool {
        self.title.is_some()
            || self.subtitle.is_some()
            || self.excerpt.is_some()
            || self.body.is_some()
            || self.category_id.is_some()
            || self.tags.is_some()
    }
}

/// Persistence contract for draft records.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Insert the initial record for a brand-new draft.
    async fn create(&self, draft: &Draft) -> PersistenceResult<()>;

    async fn get(&self, author_id: &str, draft_id: &str) -> PersistenceResult<Draft>;

    /// Apply a partial update to the stored record.
    async fn update(
        &self,
        author_id: &str,
        draft_id: &str,
        patch: DraftPatch,
    ) -> PersistenceResult<()>;
}

/// Hash-map-backed repository used by tests and local development.
///
/// Enforces the same conflict rules a production implementation must:
/// writer updates against a record that has left `draft` status fail,
/// as does any write whose optimistic `expected_updated_at` check
/// misses.
pub struct InMemoryDraftStore {
    records: Mutex<HashMap<(String, String), Draft>>,
    update_calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            update_calls: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Number of `update` calls attempted, successful or not.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Simulate the storage backend going down (or back up).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Inspect the stored record, if any.
    pub async fn stored(&self, author_id: &str, draft_id: &str) -> Option<Draft> {
        let records = self.records.lock().await;
        records
            .get(&(author_id.to_string(), draft_id.to_string()))
            .cloned()
    }

    /// Simulate an external reviewer advancing the stored record.
    pub async fn force_status(&self, author_id: &str, draft_id: &str, status: DraftStatus) {
        let mut records = self.records.lock().await;
        if let Some(record) = records.get_mut(&(author_id.to_string(), draft_id.to_string())) {
            record.status = status;
        }
    }
}

impl Default for InMemoryDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftRepository for InMemoryDraftStore {
    async fn create(&self, draft: &Draft) -> PersistenceResult<()> {
        let mut records = self.records.lock().await;
        records.insert((draft.author_id.clone(), draft.id.clone()), draft.clone());
        Ok(())
    }

    async fn get(&self, author_id: &str, draft_id: &str) -> PersistenceResult<Draft> {
        let records = self.records.lock().await;
        records
            .get(&(author_id.to_string(), draft_id.to_string()))
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound {
                draft_id: draft_id.to_string(),
            })
    }

    async fn update(
        &self,
        author_id: &str,
        draft_id: &str,
        patch: DraftPatch,
    ) -> PersistenceResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(
                "draft store is offline".to_string(),
            ));
        }

        let mut records = self.records.lock().await;
        let record = records
            .get_mut(&(author_id.to_string(), draft_id.to_string()))
            .ok_or_else(|| PersistenceError::NotFound {
                draft_id: draft_id.to_string(),
            })?;

        if let Some(expected) = patch.expected_updated_at {
            if record.updated_at != expected {
                return Err(PersistenceError::Conflict {
                    draft_id: draft_id.to_string(),
                });
            }
        }

        // The record is frozen to the writer once its status moved on.
        if record.status != DraftStatus::Draft {
            return Err(PersistenceError::Conflict {
                draft_id: draft_id.to_string(),
            });
        }

        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(subtitle) = patch.subtitle {
            record.subtitle = subtitle;
        }
        if let Some(excerpt) = patch.excerpt {
            record.excerpt = excerpt;
        }
        if let Some(body) = patch.body {
            record.body = body;
        }
        if let Some(category_id) = patch.category_id {
            record.category_id = category_id;
        }
        if let Some(tags) = patch.tags {
            record.tags = tags;
        }
        if let Some(word_count) = patch.word_count {
            record.word_count = word_count;
        }
        if let Some(read_time_minutes) = patch.read_time_minutes {
            record.read_time_minutes = read_time_minutes;
        }
        if let Some(status) = patch.status {
            record.status = status;
        }
        if patch.submitted_at.is_some() {
            record.submitted_at = patch.submitted_at;
        }
        if patch.deleted_at.is_some() {
            record.deleted_at = patch.deleted_at;
        }
        record.updated_at = patch.updated_at;

        Ok(())
    }
}
