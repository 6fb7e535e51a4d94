use crate::block::{Block, StructuredContent, TextRun};

/// Visitor pattern for traversing a content tree immutably.
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
/// The `'ast` lifetime lets implementations collect references into the
/// tree being walked.
pub trait Visitor<'ast>: Sized {
    fn visit_content(&mut self, content: &'ast StructuredContent) {
        walk_content(self, content);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_text_run(&mut self, _run: &'ast TextRun) {
        // Leaf node, no children to walk
    }
}

pub fn walk_content<'ast, V: Visitor<'ast>>(visitor: &mut V, content: &'ast StructuredContent) {
    for block in &content.blocks {
        visitor.visit_block(block);
    }
}

pub fn walk_block<'ast, V: Visitor<'ast>>(visitor: &mut V, block: &'ast Block) {
    match block {
        Block::Paragraph { runs } | Block::Heading { runs, .. } => {
            for run in runs {
                visitor.visit_text_run(run);
            }
        }
        Block::BulletedList { items } | Block::NumberedList { items } => {
            for item in items {
                visitor.visit_block(item);
            }
        }
        Block::Blockquote { children } => {
            for child in children {
                visitor.visit_block(child);
            }
        }
        Block::CodeBlock { .. } | Block::Image { .. } => {
            // No nested runs or blocks
        }
    }
}
