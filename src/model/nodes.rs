//! Core data structures of the canonical document model.

use serde::{Deserialize, Serialize};

/// The canonical in-memory document: an ordered sequence of blocks.
///
/// A `Document` is created fresh per encode or decode call. Decoders build
/// one and hand it over; encoders only read it. There is no shared mutable
/// state between conversions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Document { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A block-level element.
///
/// Blocks never nest arbitrarily: the only containment is list → items and
/// table → rows → cells, where a cell is itself a small block sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph { runs: Vec<InlineRun> },
    /// `level` is always in 1..=6; decoders clamp out-of-range input.
    Heading { level: u8, runs: Vec<InlineRun> },
    Blockquote { runs: Vec<InlineRun> },
    /// Plain text, no inline styling.
    CodeBlock { text: String },
    BulletList { items: Vec<Vec<InlineRun>> },
    NumberedList { items: Vec<Vec<InlineRun>> },
    Table { rows: Vec<Vec<Cell>> },
}

impl Block {
    /// Convenience constructor for the most common block shape.
    pub fn paragraph(text: &str) -> Self {
        Block::Paragraph {
            runs: vec![InlineRun::plain(text)],
        }
    }
}

/// A table cell.
///
/// Editor input only ever produces single-paragraph cells, but rows of
/// malformed input may carry anything, so the model keeps the general form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub blocks: Vec<Block>,
}

impl Cell {
    /// A cell holding a single plain-text paragraph.
    pub fn text(text: &str) -> Self {
        Cell {
            blocks: vec![Block::paragraph(text)],
        }
    }
}

/// A maximal span of text sharing one formatting-attribute set.
///
/// `text` is never absent: the empty string stands in for "no text".
/// Hard line breaks inside a block are represented as a `"\n"`-bearing run
/// with empty formatting between its neighbours (no new block is created).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub code: bool,
    /// Foreground colour as a `#rrggbb` hex string.
    pub color: Option<String>,
    /// Background colour as a `#rrggbb` hex string.
    pub background: Option<String>,
    pub link: Option<String>,
}

impl InlineRun {
    pub fn plain(text: impl Into<String>) -> Self {
        InlineRun {
            text: text.into(),
            ..Default::default()
        }
    }

    /// A hard line break: a newline with empty formatting.
    pub fn line_break() -> Self {
        InlineRun::plain("\n")
    }

    /// Whether two runs carry the same attribute set (ignoring text).
    /// Encoders merge adjacent runs for which this holds.
    pub fn style_eq(&self, other: &InlineRun) -> bool {
        self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
            && self.code == other.code
            && self.color == other.color
            && self.background == other.background
            && self.link == other.link
    }

    pub fn has_style(&self) -> bool {
        self.bold
            || self.italic
            || self.underline
            || self.code
            || self.color.is_some()
            || self.background.is_some()
            || self.link.is_some()
    }
}
