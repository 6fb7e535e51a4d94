use newsdesk_content::StructuredContent;
use serde::{Deserialize, Serialize};

/// Reading speed assumed for the read-time estimate.
pub const WORDS_PER_MINUTE: u32 = 200;

/// Values derived from an article body.
///
/// These are cache, never source of truth: they must be recomputed from
/// the body whenever it changes, and persisted together with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetrics {
    pub word_count: u32,
    pub read_time_minutes: u32,
}

/// Walk the content tree and derive word count and estimated read time.
///
/// Words are what remains after joining every text run with single
/// spaces and splitting on whitespace runs; images and code blocks
/// contribute nothing. An empty or whitespace-only body reads in zero
/// minutes; anything with text reads in at least one.
pub fn compute_metrics(content: &StructuredContent) -> ContentMetrics {
    let word_count = count_words(content);
    ContentMetrics {
        word_count,
        read_time_minutes: read_time_minutes(word_count),
    }
}

fn count_words(content: &StructuredContent) -> u32 {
    content
        .flatten_text()
        .join(" ")
        .split_whitespace()
        .count() as u32
}

fn read_time_minutes(word_count: u32) -> u32 {
    if word_count == 0 {
        0
    } else {
        word_count.div_ceil(WORDS_PER_MINUTE)
    }
}
