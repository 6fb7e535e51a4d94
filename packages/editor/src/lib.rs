//! # Newsdesk Editor
//!
//! Core draft lifecycle engine for the authoring portal.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ content: article body as a typed block tree │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Draft lifecycle + edits             │
//! │  - Apply edits with mutability checks       │
//! │  - Recompute derived metrics on body change │
//! │  - Validate publication readiness           │
//! │  - draft → submitted transition             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ autosave: debounced persistence             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The body tree is source of truth**: word count and read time are
//!    derived cache, recomputed before anything is persisted
//! 2. **Single writer**: one active editing session per draft, no merge
//! 3. **Frozen after submission**: every content mutation is refused the
//!    moment the draft leaves the `draft` state
//! 4. **Errors are recoverable**: nothing here crashes a session or
//!    corrupts the in-memory draft
//!
//! ## Usage
//!
//! ```rust,ignore
//! use newsdesk_editor::{Draft, DraftEdit};
//!
//! let mut draft = Draft::new("draft-81", "writer-3", chrono::Utc::now());
//!
//! draft.apply(DraftEdit::SetTitle { title: "Hello".into() }, chrono::Utc::now())?;
//! draft.apply(DraftEdit::SetBody { body }, chrono::Utc::now())?;
//!
//! // Ready? Every violated rule comes back at once if not.
//! draft.submit(chrono::Utc::now())?;
//! ```

mod draft;
mod edits;
mod errors;
mod lifecycle;
mod validate;

pub use draft::Draft;
pub use edits::{DraftEdit, EditOutcome};
pub use errors::{EditorError, EditorResult};
pub use lifecycle::DraftStatus;
pub use validate::{validate, ValidationResult, MIN_WORD_COUNT};
