//! Import tests for legacy uploads (.doc/.docx/plain text → Document)

use scribe_babel::{normalize_legacy, Block, FormatRegistry, InlineRun};

const WORD_EXPORT: &str = "<?xml version=\"1.0\" encoding=\"windows-1252\"?>\
<!DOCTYPE html>\
<html xmlns:o=\"urn:schemas-microsoft-com:office:office\" \
xmlns:w=\"urn:schemas-microsoft-com:office:word\" \
xmlns=\"http://www.w3.org/TR/REC-html40\">\
<head><meta name=\"Generator\" content=\"Word 97\"><title>Report</title>\
<style>p.MsoNormal { margin: 0 }</style></head>\
<body><!--[if gte mso 9]><xml>junk</xml><![endif]-->\
<h1>Quarterly Report</h1>\
<p class=\"MsoNormal\">Revenue was <b>up</b>.<o:p></o:p></p>\
<p class=\"MsoNormal\">Costs were down.<o:p> </o:p></p>\
</body></html>";

#[test]
fn test_word_html_export_normalizes() {
    let doc = normalize_legacy(WORD_EXPORT.as_bytes(), "doc");
    assert_eq!(doc.blocks.len(), 3);
    assert_eq!(
        doc.blocks[0],
        Block::Heading {
            level: 1,
            runs: vec![InlineRun::plain("Quarterly Report")],
        }
    );
    match &doc.blocks[1] {
        Block::Paragraph { runs } => {
            assert_eq!(scribe_babel::model::plain_text(runs), "Revenue was up.");
            assert!(runs.iter().any(|r| r.bold));
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
    assert_eq!(doc.blocks[2], Block::paragraph("Costs were down."));
}

#[test]
fn test_vendor_comment_content_dropped() {
    let doc = normalize_legacy(WORD_EXPORT.as_bytes(), "doc");
    for block in &doc.blocks {
        if let Block::Paragraph { runs } = block {
            let text = scribe_babel::model::plain_text(runs);
            assert!(!text.contains("junk"), "comment leaked into {text:?}");
        }
    }
}

#[test]
fn test_renamed_html_without_body_tag() {
    let doc = normalize_legacy(b"<h2>Notes</h2><div>some content</div>", "doc");
    assert_eq!(
        doc.blocks,
        vec![
            Block::Heading {
                level: 2,
                runs: vec![InlineRun::plain("Notes")],
            },
            Block::paragraph("some content"),
        ]
    );
}

#[test]
fn test_near_plain_text_doc() {
    let doc = normalize_legacy(b"Meeting Notes\n\nWe discussed the plan.\nIt was fine.", "doc");
    assert_eq!(
        doc.blocks[0],
        Block::Heading {
            level: 3,
            runs: vec![InlineRun::plain("Meeting Notes")],
        }
    );
    match &doc.blocks[1] {
        Block::Paragraph { runs } => {
            assert_eq!(
                scribe_babel::model::plain_text(runs),
                "We discussed the plan.\nIt was fine."
            );
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn test_txt_upload_is_literal() {
    let doc = normalize_legacy(b"Line one\n\nLine two", "txt");
    assert_eq!(
        doc.blocks,
        vec![Block::paragraph("Line one"), Block::paragraph("Line two")]
    );
}

#[test]
fn test_non_utf8_bytes_replaced() {
    let mut bytes = b"caf".to_vec();
    bytes.push(0xE9); // Latin-1 é, invalid alone in UTF-8
    let doc = normalize_legacy(&bytes, "txt");
    assert_eq!(doc.blocks, vec![Block::paragraph("caf\u{fffd}")]);
}

#[test]
fn test_registry_routes_doc_uploads() {
    let registry = FormatRegistry::with_defaults();
    assert_eq!(
        registry.detect_format_from_filename("report.doc"),
        Some("legacy-doc".to_string())
    );
    let doc = registry
        .parse("Summary\n\nbody text here", "legacy-doc")
        .expect("legacy parse is total");
    assert!(matches!(doc.blocks[0], Block::Heading { level: 3, .. }));
}

#[test]
fn test_registry_routes_txt_uploads() {
    let registry = FormatRegistry::with_defaults();
    let doc = registry
        .parse("Summary\n\nbody text here", "plain-text")
        .expect("plain text parse is total");
    assert_eq!(doc.blocks[0], Block::paragraph("Summary"));
}

#[test]
fn test_docx_extension_gets_heading_heuristic() {
    let registry = FormatRegistry::with_defaults();
    assert_eq!(
        registry.detect_format_from_filename("notes.docx"),
        Some("legacy-doc".to_string())
    );
}
