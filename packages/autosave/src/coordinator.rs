//! # Autosave Coordinator
//!
//! Persists writer edits without an explicit save action while
//! guaranteeing three things:
//!
//! - edits inside one debounce window coalesce into a single write
//!   carrying the latest snapshot;
//! - a draft that has left the `draft` state is never written (the
//!   window elapsing on a locked snapshot makes no storage call at all);
//! - at most one save is in flight per draft: the actor awaits each
//!   write before looking at the next command, so later windows are
//!   deferred, not concurrent.
//!
//! The coordinator runs as a spawned task fed over an mpsc channel; the
//! writer keeps typing while a save is in flight. Save outcomes stream
//! back to the editing UI as [`AutosaveEvent`]s.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use newsdesk_editor::{Draft, DraftStatus};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_stream::wrappers::ReceiverStream;

use crate::repository::{DraftPatch, DraftRepository, PersistenceError};
use crate::scheduler::{AutosaveConfig, DebounceWindow};

/// Outcome of one autosave attempt, streamed to the editing UI.
#[derive(Debug, Clone, PartialEq)]
pub enum AutosaveEvent {
    /// The latest snapshot reached the store.
    Saved {
        draft_id: String,
        updated_at: DateTime<Utc>,
    },

    /// The window elapsed on a locked draft; no storage call was made.
    Skipped {
        draft_id: String,
        status: DraftStatus,
    },

    /// Persistence failed. When `retryable`, the next edit's debounce
    /// window retries the latest state; the in-memory draft is
    /// unaffected either way.
    Failed {
        draft_id: String,
        reason: String,
        retryable: bool,
    },

    /// The stored record changed underneath the session. Surfaced
    /// immediately rather than masked by a silent retry.
    Conflict { draft_id: String },
}

enum Command {
    /// Latest full-draft snapshot; restarts the debounce window.
    Edited(Box<Draft>),

    /// Fire the pending window immediately.
    Flush,

    /// Disarm the pending window (navigation away, lock).
    CancelPending,

    Shutdown,
}

/// The coordinator stopped (its task ended or was shut down).
#[derive(Debug, Error)]
#[error("Autosave coordinator is no longer running")]
pub struct CoordinatorStopped;

/// Handle to the autosave actor for one draft's editing session.
pub struct AutosaveCoordinator {
    commands: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

impl AutosaveCoordinator {
    /// Spawn the actor. Returns the handle and the stream of save
    /// outcomes for the UI.
    pub fn spawn(
        repository: Arc<dyn DraftRepository>,
        config: AutosaveConfig,
    ) -> (Self, ReceiverStream<AutosaveEvent>) {
        let (commands, command_rx) = mpsc::channel(config.channel_capacity);
        let (event_tx, event_rx) = mpsc::channel(config.channel_capacity);

        let task = tokio::spawn(run(repository, config, command_rx, event_tx));

        (Self { commands, task }, ReceiverStream::new(event_rx))
    }

    /// Hand the coordinator the draft as it stands after an edit.
    ///
    /// Restarts the debounce window; snapshots arriving before the
    /// window elapses replace each other rather than queueing.
    pub async fn note_edit(&self, snapshot: Draft) -> Result<(), CoordinatorStopped> {
        self.commands
            .send(Command::Edited(Box::new(snapshot)))
            .await
            .map_err(|_| CoordinatorStopped)
    }

    /// Fire any pending save immediately instead of waiting the window out.
    pub async fn flush(&self) -> Result<(), CoordinatorStopped> {
        self.commands
            .send(Command::Flush)
            .await
            .map_err(|_| CoordinatorStopped)
    }

    /// Drop any pending save without firing it.
    pub async fn cancel_pending(&self) -> Result<(), CoordinatorStopped> {
        self.commands
            .send(Command::CancelPending)
            .await
            .map_err(|_| CoordinatorStopped)
    }

    /// Stop the actor. Pending saves are dropped, not fired.
    pub async fn shutdown(self) {
        let _ = self.commands.send(Command::Shutdown).await;
        let _ = self.task.await;
    }
}

async fn run(
    repository: Arc<dyn DraftRepository>,
    config: AutosaveConfig,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::Sender<AutosaveEvent>,
) {
    let mut window = DebounceWindow::new(config.debounce);
    let mut pending: Option<Box<Draft>> = None;

    loop {
        let deadline = window.deadline();

        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Edited(snapshot)) => {
                    pending = Some(snapshot);
                    window.restart(Instant::now());
                }
                Some(Command::Flush) => {
                    window.cancel();
                    if let Some(snapshot) = pending.take() {
                        save(repository.as_ref(), &events, *snapshot).await;
                    }
                }
                Some(Command::CancelPending) => {
                    window.cancel();
                    if pending.take().is_some() {
                        tracing::debug!("pending autosave cancelled");
                    }
                }
                Some(Command::Shutdown) | None => break,
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                window.cancel();
                if let Some(snapshot) = pending.take() {
                    save(repository.as_ref(), &events, *snapshot).await;
                }
            }
        }
    }
}

async fn save(
    repository: &dyn DraftRepository,
    events: &mpsc::Sender<AutosaveEvent>,
    snapshot: Draft,
) {
    // The immutability rule, enforced at fire time: a draft that left
    // the editable state is skipped without any storage call.
    if snapshot.status != DraftStatus::Draft {
        tracing::debug!(
            draft_id = %snapshot.id,
            status = %snapshot.status,
            "skipping autosave for locked draft"
        );
        let _ = events
            .send(AutosaveEvent::Skipped {
                draft_id: snapshot.id,
                status: snapshot.status,
            })
            .await;
        return;
    }

    let patch = DraftPatch::content_snapshot(&snapshot);
    match repository
        .update(&snapshot.author_id, &snapshot.id, patch)
        .await
    {
        Ok(()) => {
            tracing::debug!(
                draft_id = %snapshot.id,
                words = snapshot.word_count,
                "autosaved draft"
            );
            let _ = events
                .send(AutosaveEvent::Saved {
                    draft_id: snapshot.id,
                    updated_at: snapshot.updated_at,
                })
                .await;
        }
        Err(PersistenceError::Conflict { .. }) => {
            tracing::warn!(draft_id = %snapshot.id, "autosave hit a conflicting write");
            let _ = events
                .send(AutosaveEvent::Conflict {
                    draft_id: snapshot.id,
                })
                .await;
        }
        Err(error) => {
            tracing::warn!(
                draft_id = %snapshot.id,
                %error,
                "autosave failed; in-memory draft is unaffected"
            );
            let _ = events
                .send(AutosaveEvent::Failed {
                    draft_id: snapshot.id,
                    reason: error.to_string(),
                    retryable: error.is_retryable(),
                })
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryDraftStore;
    use newsdesk_content::{Block, StructuredContent};
    use newsdesk_editor::DraftEdit;
    use tokio_stream::StreamExt;

    fn body(text: &str) -> StructuredContent {
        StructuredContent::new(vec![Block::paragraph(text)])
    }

    async fn store_with(draft: &Draft) -> Arc<InMemoryDraftStore> {
        let store = Arc::new(InMemoryDraftStore::new());
        store.create(draft).await.unwrap();
        store
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_in_one_window_coalesce_into_one_write() {
        let mut draft = Draft::new("d-1", "w-1", Utc::now());
        let store = store_with(&draft).await;
        let (coordinator, mut events) =
            AutosaveCoordinator::spawn(store.clone(), AutosaveConfig::default());

        for text in ["first", "first second", "first second third"] {
            draft
                .apply(
                    DraftEdit::SetBody { body: body(text) },
                    Utc::now(),
                )
                .unwrap();
            coordinator.note_edit(draft.clone()).await.unwrap();
        }

        let event = events.next().await.unwrap();
        assert!(matches!(event, AutosaveEvent::Saved { .. }));
        assert_eq!(store.update_calls(), 1);

        let stored = store.stored("w-1", "d-1").await.unwrap();
        assert_eq!(stored.word_count, 3);
        assert_eq!(stored.body, body("first second third"));

        coordinator.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_locked_snapshot_is_skipped_without_a_storage_call() {
        let mut draft = Draft::new("d-1", "w-1", Utc::now());
        let store = store_with(&draft).await;
        let (coordinator, mut events) =
            AutosaveCoordinator::spawn(store.clone(), AutosaveConfig::default());

        // The snapshot the window sees has already left `draft`.
        draft.status = DraftStatus::Submitted;
        coordinator.note_edit(draft.clone()).await.unwrap();

        let event = events.next().await.unwrap();
        assert_eq!(
            event,
            AutosaveEvent::Skipped {
                draft_id: "d-1".to_string(),
                status: DraftStatus::Submitted,
            }
        );
        assert_eq!(store.update_calls(), 0);

        coordinator.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_reported_and_next_edit_retries() {
        let mut draft = Draft::new("d-1", "w-1", Utc::now());
        let store = store_with(&draft).await;
        let (coordinator, mut events) =
            AutosaveCoordinator::spawn(store.clone(), AutosaveConfig::default());

        store.set_unavailable(true);
        draft
            .apply(DraftEdit::SetBody { body: body("offline edit") }, Utc::now())
            .unwrap();
        coordinator.note_edit(draft.clone()).await.unwrap();

        match events.next().await.unwrap() {
            AutosaveEvent::Failed { retryable, .. } => assert!(retryable),
            other => panic!("expected failure event, got {:?}", other),
        }

        // Storage comes back; the next edit's window persists the
        // latest state, nothing was lost.
        store.set_unavailable(false);
        draft
            .apply(DraftEdit::SetBody { body: body("back online edit") }, Utc::now())
            .unwrap();
        coordinator.note_edit(draft.clone()).await.unwrap();

        assert!(matches!(
            events.next().await.unwrap(),
            AutosaveEvent::Saved { .. }
        ));
        let stored = store.stored("w-1", "d-1").await.unwrap();
        assert_eq!(stored.body, body("back online edit"));

        coordinator.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_status_change_surfaces_as_conflict() {
        let mut draft = Draft::new("d-1", "w-1", Utc::now());
        let store = store_with(&draft).await;
        let (coordinator, mut events) =
            AutosaveCoordinator::spawn(store.clone(), AutosaveConfig::default());

        // Another process advances the stored record while the writer
        // keeps typing against an in-memory draft that still says
        // `draft`.
        store.force_status("w-1", "d-1", DraftStatus::InReview).await;
        draft
            .apply(DraftEdit::SetBody { body: body("stale edit") }, Utc::now())
            .unwrap();
        coordinator.note_edit(draft.clone()).await.unwrap();

        assert_eq!(
            events.next().await.unwrap(),
            AutosaveEvent::Conflict {
                draft_id: "d-1".to_string()
            }
        );

        coordinator.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_prevents_the_save() {
        let mut draft = Draft::new("d-1", "w-1", Utc::now());
        let store = store_with(&draft).await;
        let (coordinator, _events) =
            AutosaveCoordinator::spawn(store.clone(), AutosaveConfig::default());

        draft
            .apply(DraftEdit::SetBody { body: body("never saved") }, Utc::now())
            .unwrap();
        coordinator.note_edit(draft.clone()).await.unwrap();
        coordinator.cancel_pending().await.unwrap();

        // Give the (disarmed) window far longer than the debounce.
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        assert_eq!(store.update_calls(), 0);

        coordinator.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_fires_without_waiting_for_the_window() {
        let mut draft = Draft::new("d-1", "w-1", Utc::now());
        let store = store_with(&draft).await;
        let (coordinator, mut events) =
            AutosaveCoordinator::spawn(store.clone(), AutosaveConfig::default());

        draft
            .apply(DraftEdit::SetBody { body: body("save me now") }, Utc::now())
            .unwrap();
        coordinator.note_edit(draft.clone()).await.unwrap();
        coordinator.flush().await.unwrap();

        assert!(matches!(
            events.next().await.unwrap(),
            AutosaveEvent::Saved { .. }
        ));
        assert_eq!(store.update_calls(), 1);

        coordinator.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drafts_save_independently() {
        let draft_a = Draft::new("d-a", "w-1", Utc::now());
        let draft_b = Draft::new("d-b", "w-1", Utc::now());
        let store = Arc::new(InMemoryDraftStore::new());
        store.create(&draft_a).await.unwrap();
        store.create(&draft_b).await.unwrap();

        let (coord_a, mut events_a) =
            AutosaveCoordinator::spawn(store.clone(), AutosaveConfig::default());
        let (coord_b, mut events_b) =
            AutosaveCoordinator::spawn(store.clone(), AutosaveConfig::default());

        let mut a = draft_a.clone();
        a.apply(DraftEdit::SetTitle { title: "A".to_string() }, Utc::now())
            .unwrap();
        coord_a.note_edit(a).await.unwrap();

        let mut b = draft_b.clone();
        b.apply(DraftEdit::SetTitle { title: "B".to_string() }, Utc::now())
            .unwrap();
        coord_b.note_edit(b).await.unwrap();

        assert!(matches!(
            events_a.next().await.unwrap(),
            AutosaveEvent::Saved { .. }
        ));
        assert!(matches!(
            events_b.next().await.unwrap(),
            AutosaveEvent::Saved { .. }
        ));
        assert_eq!(store.update_calls(), 2);

        coord_a.shutdown().await;
        coord_b.shutdown().await;
    }
}
