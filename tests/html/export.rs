//! Export tests for HTML (Document → HTML fragment)

use crate::common::{kitchen_sink_doc, square_table_doc, title_and_bold_doc};
use scribe_babel::{encode_html, Block, Document, InlineRun};

fn encode(doc: &Document) -> String {
    encode_html(doc).expect("HTML encoding does not fail on model documents")
}

#[test]
fn test_title_and_bold() {
    assert_eq!(
        encode(&title_and_bold_doc()),
        "<h1>Title</h1><p>Hello <strong>world</strong></p>"
    );
}

#[test]
fn test_fragment_has_no_document_wrapper() {
    let html = encode(&title_and_bold_doc());
    assert!(!html.contains("<html"));
    assert!(!html.contains("<body"));
}

#[test]
fn test_table_structure() {
    assert_eq!(
        encode(&square_table_doc()),
        "<table><tbody>\
         <tr><td><p>A</p></td><td><p>B</p></td></tr>\
         <tr><td><p>C</p></td><td><p>D</p></td></tr>\
         </tbody></table>"
    );
}

#[test]
fn test_kitchen_sink_tags_present() {
    let html = encode(&kitchen_sink_doc());
    for tag in [
        "<h1>",
        "<blockquote>",
        "<pre><code>",
        "<ul><li>",
        "<ol><li>",
        "<table><tbody><tr><td>",
    ] {
        assert!(html.contains(tag), "missing {tag} in {html}");
    }
}

#[test]
fn test_styled_run_with_color_and_link() {
    let doc = Document::new(vec![Block::Paragraph {
        runs: vec![InlineRun {
            text: "go".to_string(),
            bold: true,
            color: Some("#336699".to_string()),
            link: Some("https://example.com/".to_string()),
            ..Default::default()
        }],
    }]);
    assert_eq!(
        encode(&doc),
        "<p><a href=\"https://example.com/\">\
         <span style=\"color: #336699\"><strong>go</strong></span></a></p>"
    );
}

#[test]
fn test_markup_in_text_is_escaped() {
    let doc = Document::new(vec![Block::paragraph("<script>alert(1)</script>")]);
    let html = encode(&doc);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn test_empty_document() {
    assert_eq!(encode(&Document::default()), "");
}
