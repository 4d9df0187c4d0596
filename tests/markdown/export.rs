//! Export tests for Markdown (Document → Markdown)
//!
//! Encoder output bytes are contractual, so these pin exact strings.

use crate::common::{bold, heading, plain, square_table_doc, title_and_bold_doc};
use insta::assert_snapshot;
use scribe_babel::{encode_markdown, Block, Cell, Document, InlineRun};

#[test]
fn test_heading_and_bold_scenario() {
    assert_eq!(
        encode_markdown(&title_and_bold_doc()),
        "# Title\n\nHello **world**"
    );
}

#[test]
fn test_square_table_scenario() {
    let md = encode_markdown(&square_table_doc());
    assert_eq!(md, "| A | B |\n| --- | --- |\n| C | D |");
}

#[test]
fn test_separator_follows_first_row() {
    let md = encode_markdown(&square_table_doc());
    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines[0], "| A | B |");
    assert_eq!(lines[1], "| --- | --- |");
    assert_eq!(lines[2], "| C | D |");
}

#[test]
fn test_table_rectangularity() {
    let doc = Document::new(vec![Block::Table {
        rows: vec![
            vec![Cell::text("a")],
            vec![Cell::text("b"), Cell::text("c"), Cell::text("d")],
            vec![Cell::text("e"), Cell::text("f")],
        ],
    }]);
    let md = encode_markdown(&doc);
    for line in md.lines() {
        assert_eq!(
            line.matches('|').count(),
            4,
            "every row must have the max column count: {line}"
        );
    }
}

#[test]
fn test_kitchen_sink_layout() {
    let md = encode_markdown(&crate::common::kitchen_sink_doc());
    assert_snapshot!(md, @r###"
    # Report

    Intro with **bold** and *italic*

    > a quoted line

    ```
    fn main() {
        println!("hi");
    }
    ```

    - first
    - second

    1. one
    2. two

    | h1 | h2 |
    | --- | --- |
    | v1 | v2 |
    "###);
}

#[test]
fn test_heading_levels() {
    for level in 1..=6u8 {
        let doc = Document::new(vec![heading(level, "H")]);
        assert_eq!(
            encode_markdown(&doc),
            format!("{} H", "#".repeat(usize::from(level)))
        );
    }
}

#[test]
fn test_underline_escape_sequence() {
    let doc = Document::new(vec![Block::Paragraph {
        runs: vec![InlineRun {
            text: "needed".to_string(),
            underline: true,
            ..Default::default()
        }],
    }]);
    assert_eq!(encode_markdown(&doc), "<u>needed</u>");
}

#[test]
fn test_adjacent_same_style_runs_merge() {
    let doc = Document::new(vec![Block::Paragraph {
        runs: vec![bold("wor"), bold("ld")],
    }]);
    assert_eq!(encode_markdown(&doc), "**world**");
}

#[test]
fn test_idempotent_encoding() {
    let doc = crate::common::kitchen_sink_doc();
    assert_eq!(encode_markdown(&doc), encode_markdown(&doc));
}

#[test]
fn test_empty_document() {
    assert_eq!(encode_markdown(&Document::default()), "");
}

#[test]
fn test_color_dropped_silently_from_output() {
    let doc = Document::new(vec![Block::Paragraph {
        runs: vec![InlineRun {
            text: "tinted".to_string(),
            color: Some("#ff0000".to_string()),
            ..Default::default()
        }],
    }]);
    assert_eq!(encode_markdown(&doc), "tinted");
}

#[test]
fn test_link_with_plain_text() {
    let doc = Document::new(vec![Block::Paragraph {
        runs: vec![
            plain("see "),
            InlineRun {
                text: "docs".to_string(),
                link: Some("https://example.com/docs".to_string()),
                ..Default::default()
            },
        ],
    }]);
    assert_eq!(encode_markdown(&doc), "see [docs](https://example.com/docs)");
}
