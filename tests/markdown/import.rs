//! Import tests for Markdown (Markdown → Document)

use crate::common::{bold, heading, plain};
use scribe_babel::{decode_markdown, Block, Cell, InlineRun};

#[test]
fn test_heading_paragraph_structure() {
    let doc = decode_markdown("# Title\n\nHello **world**");
    assert_eq!(doc.blocks.len(), 2);
    assert_eq!(doc.blocks[0], heading(1, "Title"));
    assert_eq!(
        doc.blocks[1],
        Block::Paragraph {
            runs: vec![plain("Hello "), bold("world")],
        }
    );
}

#[test]
fn test_deep_heading_clamped() {
    // CommonMark only goes to six #s; a seventh makes it literal text.
    let doc = decode_markdown("###### Six");
    assert_eq!(doc.blocks[0], heading(6, "Six"));
}

#[test]
fn test_table() {
    let doc = decode_markdown("| A | B |\n| --- | --- |\n| C | D |");
    assert_eq!(
        doc.blocks[0],
        Block::Table {
            rows: vec![
                vec![Cell::text("A"), Cell::text("B")],
                vec![Cell::text("C"), Cell::text("D")],
            ],
        }
    );
}

#[test]
fn test_styled_table_cells() {
    let doc = decode_markdown("| **A** | B |\n| --- | --- |\n| C | D |");
    match &doc.blocks[0] {
        Block::Table { rows } => match &rows[0][0].blocks[0] {
            Block::Paragraph { runs } => {
                assert!(runs[0].bold);
                assert_eq!(runs[0].text, "A");
            }
            other => panic!("expected paragraph in cell, got {other:?}"),
        },
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn test_unterminated_fence_degrades() {
    let doc = decode_markdown("# Head\n\n```\nlet x = 1;");
    assert_eq!(doc.blocks.len(), 2);
    assert_eq!(
        doc.blocks[1],
        Block::CodeBlock {
            text: "let x = 1;".to_string()
        }
    );
}

#[test]
fn test_unterminated_emphasis_is_literal() {
    let doc = decode_markdown("before **never closed");
    assert_eq!(doc.blocks, vec![Block::paragraph("before **never closed")]);
}

#[test]
fn test_escaped_characters_unescaped() {
    let doc = decode_markdown("2 \\* 3");
    assert_eq!(doc.blocks, vec![Block::paragraph("2 * 3")]);
}

#[test]
fn test_nested_list_flattened() {
    let doc = decode_markdown("- outer\n  - inner");
    match &doc.blocks[0] {
        Block::BulletList { items } => {
            assert_eq!(items.len(), 1);
            let text = scribe_babel::model::plain_text(&items[0]);
            assert_eq!(text, "outer\ninner");
        }
        other => panic!("expected bullet list, got {other:?}"),
    }
}

#[test]
fn test_thematic_break_skipped() {
    let doc = decode_markdown("above\n\n---\n\nbelow");
    assert_eq!(
        doc.blocks,
        vec![Block::paragraph("above"), Block::paragraph("below")]
    );
}

#[test]
fn test_autolink() {
    let doc = decode_markdown("visit https://example.com now");
    match &doc.blocks[0] {
        Block::Paragraph { runs } => {
            let linked: Vec<_> = runs.iter().filter(|r| r.link.is_some()).collect();
            assert_eq!(linked.len(), 1);
            assert_eq!(linked[0].text, "https://example.com");
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn test_underline_html_not_reparsed() {
    // Intentionally asymmetric with the encoder's <u> escape: the tag is
    // dropped and its text survives without the underline attribute.
    let doc = decode_markdown("<u>plain again</u>");
    match &doc.blocks[0] {
        Block::Paragraph { runs } => {
            assert!(runs.iter().all(|r| !r.underline));
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn test_image_keeps_alt_text() {
    let doc = decode_markdown("![diagram](img.png)");
    assert_eq!(doc.blocks, vec![Block::paragraph("diagram")]);
}

#[test]
fn test_soft_break_becomes_line_break_run() {
    let doc = decode_markdown("one\ntwo");
    match &doc.blocks[0] {
        Block::Paragraph { runs } => {
            assert_eq!(scribe_babel::model::plain_text(runs), "one\ntwo");
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn test_code_span() {
    let doc = decode_markdown("run `cargo doc` now");
    match &doc.blocks[0] {
        Block::Paragraph { runs } => {
            assert_eq!(
                runs[1],
                InlineRun {
                    text: "cargo doc".to_string(),
                    code: true,
                    ..Default::default()
                }
            );
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}
