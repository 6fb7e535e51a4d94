use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::visitor::Visitor;

/// Inline formatting flags attached to a text run.
///
/// Marks belong to runs, never to block containers. A run with no marks
/// set renders as plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marks {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    /// Link target URL, when the run is wrapped in a link.
    #[serde(default)]
    pub link: Option<String>,
}

impl Marks {
    /// No formatting at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.underline && !self.code && self.link.is_none()
    }
}

/// A contiguous span of text sharing one set of marks.
///
/// Leaf text runs carry the authoritative text used for word counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub marks: Marks,
}

impl TextRun {
    pub fn new(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// A run with no formatting.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Marks::none())
    }

    /// A run wrapped in a link to `target`.
    pub fn link(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            text,
            Marks {
                link: Some(target.into()),
                ..Marks::none()
            },
        )
    }
}

/// Heading depth, `h1` through `h6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = ContentError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            4 => Ok(HeadingLevel::H4),
            5 => Ok(HeadingLevel::H5),
            6 => Ok(HeadingLevel::H6),
            other => Err(ContentError::InvalidHeadingLevel(other)),
        }
    }
}

/// One node of the article body tree.
///
/// The union is closed: every kind the editor can produce has a variant
/// here, and deserialization of an unknown kind fails instead of carrying
/// an untyped tag through the system. Each block owns its children
/// outright (`Vec`), so cycles are unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    /// Body text.
    Paragraph { runs: Vec<TextRun> },

    /// Section heading.
    Heading {
        level: HeadingLevel,
        runs: Vec<TextRun>,
    },

    /// Unordered list; items are themselves blocks.
    BulletedList { items: Vec<Block> },

    /// Ordered list.
    NumberedList { items: Vec<Block> },

    /// Quoted passage wrapping nested blocks.
    Blockquote { children: Vec<Block> },

    /// Preformatted code. The code text is literal, not runs, and does
    /// not contribute to word counts.
    CodeBlock {
        language: Option<String>,
        code: String,
    },

    /// Embedded image.
    Image {
        src: String,
        alt: Option<String>,
        caption: Option<String>,
    },
}

impl Block {
    /// A paragraph holding a single plain run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            runs: vec![TextRun::plain(text)],
        }
    }

    /// A heading holding a single plain run.
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            runs: vec![TextRun::plain(text)],
        }
    }
}

/// Ordered tree of blocks representing one article body.
///
/// This is the canonical in-memory form produced and consumed by the
/// visual editor. Not thread-shared: one writer, one tree per editing
/// session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredContent {
    pub blocks: Vec<Block>,
}

impl StructuredContent {
    /// The body of a brand-new draft: no blocks at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Depth-first traversal yielding each text run's text.
    ///
    /// Non-text blocks (images, code) are skipped entirely; container
    /// blocks contribute only what their nested runs carry.
    pub fn flatten_text(&self) -> Vec<&str> {
        let mut collector = TextCollector { texts: Vec::new() };
        collector.visit_content(self);
        collector.texts
    }

    /// Whether any run carries non-whitespace text.
    pub fn has_text(&self) -> bool {
        self.flatten_text().iter().any(|t| !t.trim().is_empty())
    }
}

struct TextCollector<'ast> {
    texts: Vec<&'ast str>,
}

impl<'ast> Visitor<'ast> for TextCollector<'ast> {
    fn visit_text_run(&mut self, run: &'ast TextRun) {
        self.texts.push(&run.text);
    }
}
