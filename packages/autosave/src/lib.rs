//! # Newsdesk Autosave
//!
//! Debounced, conflict-aware persistence of in-progress drafts.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ EditorSession: writer + draft + coordinator  │
//! │  - apply edits (metrics recomputed inline)   │
//! │  - submit / discard / close                  │
//! └──────────────────────────────────────────────┘
//!         │ note_edit(snapshot)        │ events
//!         ▼                            ▼
//! ┌──────────────────────────────────────────────┐
//! │ AutosaveCoordinator (spawned actor)          │
//! │  - DebounceWindow coalesces edit bursts      │
//! │  - skips locked drafts, one save in flight   │
//! └──────────────────────────────────────────────┘
//!         │ DraftPatch
//!         ▼
//! ┌──────────────────────────────────────────────┐
//! │ DraftRepository (relational datastore)       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The in-memory draft is authoritative**: failed saves report and
//!    wait for the next window; they never discard writer state
//! 2. **Coalesce, don't queue**: only the snapshot present when the
//!    window elapses is persisted
//! 3. **Consistent triples**: body and its derived metrics always land
//!    in the same write
//! 4. **Conflicts surface immediately**: a record another process moved
//!    out of `draft` is reported, not silently retried

mod categories;
mod coordinator;
mod repository;
mod scheduler;
mod session;

pub use categories::{Category, CategoryStore, StaticCategoryStore};
pub use coordinator::{AutosaveCoordinator, AutosaveEvent, CoordinatorStopped};
pub use repository::{
    DraftPatch, DraftRepository, InMemoryDraftStore, PersistenceError, PersistenceResult,
};
pub use scheduler::{AutosaveConfig, DebounceWindow, AUTOSAVE_DEBOUNCE};
pub use session::{EditorSession, SessionError, SessionResult};
