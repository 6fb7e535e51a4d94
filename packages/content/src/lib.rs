//! # Newsdesk Content
//!
//! The canonical in-memory representation of an article body: an ordered
//! tree of typed blocks produced and consumed by the visual editor.
//!
//! The tree is a closed tagged union: every block kind the editor can
//! emit has a variant, traversals match exhaustively, and storage uses a
//! portable JSON form (see [`serializer`]). Leaf [`TextRun`]s carry the
//! authoritative text that downstream word counting reads.

pub mod block;
pub mod error;
pub mod serializer;
pub mod visitor;

pub use block::{Block, HeadingLevel, Marks, StructuredContent, TextRun};
pub use error::{ContentError, ContentResult};
pub use serializer::{from_json, to_json};
pub use visitor::{walk_block, walk_content, Visitor};
