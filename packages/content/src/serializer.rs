use crate::block::StructuredContent;
use crate::error::{ContentError, ContentResult};

/// Serialize a content tree to the portable JSON format used for storage.
///
/// Blocks serialize as internally tagged objects (`"type": "paragraph"`,
/// `"type": "heading"`, ...) so the stored form survives round-trips and
/// stays readable in the datastore.
pub fn to_json(content: &StructuredContent) -> ContentResult<String> {
    serde_json::to_string(content).map_err(ContentError::Serialize)
}

/// Parse a stored content tree.
///
/// Unknown block kinds fail here rather than leaking an untyped node into
/// the editor.
pub fn from_json(json: &str) -> ContentResult<StructuredContent> {
    serde_json::from_str(json).map_err(ContentError::Malformed)
}
