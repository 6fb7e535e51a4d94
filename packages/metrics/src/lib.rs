//! # Newsdesk Metrics
//!
//! Pure derivation of word count and estimated read time from a
//! structured article body. No I/O, no side effects: callers recompute on
//! every body change and persist the result alongside the body so stored
//! metrics always correspond to the stored content.

pub mod calculator;

#[cfg(test)]
mod tests_calculator;

pub use calculator::{compute_metrics, ContentMetrics, WORDS_PER_MINUTE};
