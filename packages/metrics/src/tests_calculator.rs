use crate::calculator::{compute_metrics, WORDS_PER_MINUTE};
use newsdesk_content::{Block, HeadingLevel, StructuredContent, TextRun};

fn words(n: usize) -> String {
    (0..n).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ")
}

fn body_with_words(n: usize) -> StructuredContent {
    StructuredContent::new(vec![Block::paragraph(words(n))])
}

#[test]
fn test_empty_tree_yields_zero() {
    let metrics = compute_metrics(&StructuredContent::empty());
    assert_eq!(metrics.word_count, 0);
    assert_eq!(metrics.read_time_minutes, 0);
}

#[test]
fn test_tree_without_text_blocks_yields_zero() {
    let body = StructuredContent::new(vec![
        Block::Image {
            src: "chart.png".to_string(),
            alt: None,
            caption: None,
        },
        Block::CodeBlock {
            language: Some("rust".to_string()),
            code: "fn main() { println!(\"not prose\"); }".to_string(),
        },
    ]);
    let metrics = compute_metrics(&body);
    assert_eq!(metrics.word_count, 0);
    assert_eq!(metrics.read_time_minutes, 0);
}

#[test]
fn test_whitespace_only_runs_count_nothing() {
    let body = StructuredContent::new(vec![
        Block::paragraph("   "),
        Block::paragraph("\n\t  \n"),
    ]);
    assert_eq!(compute_metrics(&body).word_count, 0);
}

#[test]
fn test_runs_are_joined_with_spaces() {
    let body = StructuredContent::new(vec![Block::Paragraph {
        runs: vec![TextRun::plain("good"), TextRun::plain("morning")],
    }]);
    assert_eq!(compute_metrics(&body).word_count, 2);
}

#[test]
fn test_counts_nested_blocks() {
    let body = StructuredContent::new(vec![
        Block::heading(HeadingLevel::H2, "Two words"),
        Block::BulletedList {
            items: vec![Block::paragraph("one"), Block::paragraph("and two")],
        },
        Block::Blockquote {
            children: vec![Block::paragraph("a quoted line")],
        },
    ]);
    assert_eq!(compute_metrics(&body).word_count, 8);
}

#[test]
fn test_read_time_minimum_is_one_minute() {
    assert_eq!(compute_metrics(&body_with_words(1)).read_time_minutes, 1);
    assert_eq!(compute_metrics(&body_with_words(50)).read_time_minutes, 1);
    assert_eq!(
        compute_metrics(&body_with_words(WORDS_PER_MINUTE as usize)).read_time_minutes,
        1
    );
}

#[test]
fn test_read_time_rounds_up() {
    assert_eq!(compute_metrics(&body_with_words(201)).read_time_minutes, 2);
    assert_eq!(compute_metrics(&body_with_words(400)).read_time_minutes, 2);
    assert_eq!(compute_metrics(&body_with_words(401)).read_time_minutes, 3);
}

#[test]
fn test_word_count_matches_read_time_formula() {
    for n in [1usize, 99, 100, 199, 200, 250, 1000] {
        let metrics = compute_metrics(&body_with_words(n));
        assert_eq!(metrics.word_count, n as u32);
        assert_eq!(
            metrics.read_time_minutes,
            (n as u32).div_ceil(WORDS_PER_MINUTE).max(1)
        );
    }
}

#[test]
fn test_idempotent_on_unchanged_tree() {
    let body = body_with_words(321);
    let first = compute_metrics(&body);
    let second = compute_metrics(&body);
    assert_eq!(first, second);
}
