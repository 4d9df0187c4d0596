//! Shared document builders for the format test suites.

use scribe_babel::{Block, Cell, Document, InlineRun};

pub fn plain(text: &str) -> InlineRun {
    InlineRun::plain(text)
}

pub fn bold(text: &str) -> InlineRun {
    InlineRun {
        text: text.to_string(),
        bold: true,
        ..Default::default()
    }
}

pub fn italic(text: &str) -> InlineRun {
    InlineRun {
        text: text.to_string(),
        italic: true,
        ..Default::default()
    }
}

pub fn heading(level: u8, text: &str) -> Block {
    Block::Heading {
        level,
        runs: vec![plain(text)],
    }
}

/// The heading-plus-bold document used across encoder suites.
pub fn title_and_bold_doc() -> Document {
    Document::new(vec![
        heading(1, "Title"),
        Block::Paragraph {
            runs: vec![plain("Hello "), bold("world")],
        },
    ])
}

/// A 2x2 table with single-letter cells.
pub fn square_table_doc() -> Document {
    Document::new(vec![Block::Table {
        rows: vec![
            vec![Cell::text("A"), Cell::text("B")],
            vec![Cell::text("C"), Cell::text("D")],
        ],
    }])
}

/// One of everything the model supports.
pub fn kitchen_sink_doc() -> Document {
    Document::new(vec![
        heading(1, "Report"),
        Block::Paragraph {
            runs: vec![plain("Intro with "), bold("bold"), plain(" and "), italic("italic")],
        },
        Block::Blockquote {
            runs: vec![plain("a quoted line")],
        },
        Block::CodeBlock {
            text: "fn main() {\n    println!(\"hi\");\n}".to_string(),
        },
        Block::BulletList {
            items: vec![vec![plain("first")], vec![plain("second")]],
        },
        Block::NumberedList {
            items: vec![vec![plain("one")], vec![plain("two")]],
        },
        Block::Table {
            rows: vec![
                vec![Cell::text("h1"), Cell::text("h2")],
                vec![Cell::text("v1"), Cell::text("v2")],
            ],
        },
    ])
}
