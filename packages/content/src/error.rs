use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Invalid heading level: {0} (expected 1-6)")]
    InvalidHeadingLevel(u8),

    #[error("Malformed content tree: {0}")]
    Malformed(serde_json::Error),

    #[error("Failed to serialize content tree: {0}")]
    Serialize(serde_json::Error),
}

pub type ContentResult<T> = Result<T, ContentError>;
