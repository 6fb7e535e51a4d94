//! # Draft Validator
//!
//! Publication-readiness rules checked before a draft may leave the
//! `draft` state. Pure: no I/O, and the draft under inspection is never
//! mutated.
//!
//! Every rule is evaluated (the check never short-circuits) so the
//! writer sees the complete list of problems at once.

use serde::Serialize;

use crate::draft::Draft;

/// Submissions below this word count are refused.
pub const MIN_WORD_COUNT: u32 = 100;

/// Outcome of a publication-readiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub ok: bool,
    /// Violated rules, in the fixed order title, body, category, words.
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }
}

/// Check a draft against all publication-readiness rules.
pub fn validate(draft: &Draft) -> ValidationResult {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push("Title is required".to_string());
    }

    if draft.body.is_empty() {
        errors.push("Article body is required".to_string());
    }

    if draft.category_id.is_none() {
        errors.push("Category is required".to_string());
    }

    if draft.word_count < MIN_WORD_COUNT {
        errors.push(format!("Minimum {} words required", MIN_WORD_COUNT));
    }

    ValidationResult::from_errors(errors)
}
