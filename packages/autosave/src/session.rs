//! # Editing Session
//!
//! One writer editing one draft. The session is the explicit context
//! object binding the writer's identity, the in-memory draft, the
//! repository, and the autosave coordinator. Nothing reads ambient
//! state, so independent sessions (including those spun up by tests)
//! never cross-talk.
//!
//! The in-memory draft is authoritative for the whole session: a failed
//! save never discards it, and the worst outcome anywhere in this module
//! is a delayed or refused write.

use std::sync::Arc;

use chrono::Utc;
use newsdesk_editor::{Draft, DraftEdit, EditOutcome, EditorError};
use thiserror::Error;
use tokio_stream::wrappers::ReceiverStream;

use crate::coordinator::{AutosaveCoordinator, AutosaveEvent, CoordinatorStopped};
use crate::repository::{DraftPatch, DraftRepository, PersistenceError};
use crate::scheduler::AutosaveConfig;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Stopped(#[from] CoordinatorStopped),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// A writer's live editing session over one draft.
pub struct EditorSession {
    draft: Draft,
    repository: Arc<dyn DraftRepository>,
    coordinator: AutosaveCoordinator,
}

impl EditorSession {
    /// Start a brand-new article: persist the empty draft record and
    /// spawn the autosave coordinator. Returns the session and the
    /// stream of autosave outcomes for the UI.
    pub async fn start_new(
        author_id: impl Into<String>,
        draft_id: impl Into<String>,
        repository: Arc<dyn DraftRepository>,
        config: AutosaveConfig,
    ) -> SessionResult<(Self, ReceiverStream<AutosaveEvent>)> {
        let draft = Draft::new(draft_id, author_id, Utc::now());
        repository.create(&draft).await?;
        tracing::info!(draft_id = %draft.id, author_id = %draft.author_id, "started new draft");
        Ok(Self::attach(draft, repository, config))
    }

    /// Resume editing an existing draft.
    pub async fn resume(
        author_id: &str,
        draft_id: &str,
        repository: Arc<dyn DraftRepository>,
        config: AutosaveConfig,
    ) -> SessionResult<(Self, ReceiverStream<AutosaveEvent>)> {
        let draft = repository.get(author_id, draft_id).await?;
        Ok(Self::attach(draft, repository, config))
    }

    fn attach(
        draft: Draft,
        repository: Arc<dyn DraftRepository>,
        config: AutosaveConfig,
    ) -> (Self, ReceiverStream<AutosaveEvent>) {
        let (coordinator, events) = AutosaveCoordinator::spawn(repository.clone(), config);
        (
            Self {
                draft,
                repository,
                coordinator,
            },
            events,
        )
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Apply a writer edit and schedule an autosave.
    ///
    /// Metrics are recomputed synchronously inside the edit, before the
    /// debounce window opens. When the draft is locked the edit is
    /// refused and the autosave path is not touched at all.
    pub async fn apply(&mut self, edit: DraftEdit) -> SessionResult<EditOutcome> {
        let outcome = self.draft.apply(edit, Utc::now())?;
        self.coordinator.note_edit(self.draft.clone()).await?;
        Ok(outcome)
    }

    /// Submit the draft for review.
    ///
    /// Validates, transitions in memory, then persists the final content
    /// snapshot together with the status fields in one write. On
    /// persistence failure the in-memory draft reverts to its editable
    /// state so the writer can retry; on success any pending autosave
    /// window is cancelled so no stray late save follows the freeze.
    pub async fn submit(&mut self) -> SessionResult<()> {
        let restore = self.draft.clone();
        self.draft.submit(Utc::now())?;

        let patch = DraftPatch::submission(&self.draft);
        if let Err(error) = self
            .repository
            .update(&self.draft.author_id, &self.draft.id, patch)
            .await
        {
            tracing::warn!(draft_id = %self.draft.id, %error, "submit failed to persist; reverting");
            self.draft = restore;
            return Err(error.into());
        }

        tracing::info!(draft_id = %self.draft.id, "draft submitted for review");
        self.coordinator.cancel_pending().await?;
        Ok(())
    }

    /// Discard the draft (writer-initiated soft delete).
    pub async fn discard(&mut self) -> SessionResult<()> {
        self.draft.discard(Utc::now())?;
        self.coordinator.cancel_pending().await?;

        let patch = DraftPatch::discarded(&self.draft);
        self.repository
            .update(&self.draft.author_id, &self.draft.id, patch)
            .await?;
        tracing::info!(draft_id = %self.draft.id, "draft discarded");
        Ok(())
    }

    /// Force any pending autosave to fire now.
    pub async fn flush(&self) -> SessionResult<()> {
        self.coordinator.flush().await?;
        Ok(())
    }

    /// End the session (navigation away). Cancels any pending save and
    /// stops the coordinator.
    pub async fn close(self) {
        self.coordinator.shutdown().await;
    }
}
