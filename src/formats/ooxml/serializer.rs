//! OOXML-lite serialization (Document → WordprocessingML)
//!
//! Emits a standalone XML document with a `w:document`/`w:body` wrapper.
//! Lists have no numbering part in this subset, so items are emitted as
//! prefixed paragraphs.

use crate::model::{merge_runs, Block, Cell, Document, InlineRun};

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const TABLE_PROPS: &str = concat!(
    "<w:tblPr>",
    "<w:tblStyle w:val=\"TableGrid\"/>",
    "<w:tblW w:w=\"5000\" w:type=\"pct\"/>",
    "<w:tblBorders>",
    "<w:top w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "<w:left w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "<w:bottom w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "<w:right w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "<w:insideH w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "<w:insideV w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>",
    "</w:tblBorders>",
    "<w:tblLook w:val=\"04A0\"/>",
    "</w:tblPr>",
);

/// Serialize a document to a WordprocessingML body wrapped in `w:document`.
pub fn serialize_to_ooxml(doc: &Document) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str(&format!("<w:document xmlns:w=\"{W_NS}\"><w:body>"));
    for block in &doc.blocks {
        serialize_block(block, &mut out);
    }
    out.push_str("</w:body></w:document>");
    out
}

fn serialize_block(block: &Block, out: &mut String) {
    match block {
        Block::Paragraph { runs } => {
            out.push_str("<w:p>");
            serialize_runs(runs, out);
            out.push_str("</w:p>");
        }
        Block::Heading { level, runs } => {
            let level = (*level).clamp(1, 6);
            out.push_str(&format!(
                "<w:p><w:pPr><w:pStyle w:val=\"Heading{level}\"/></w:pPr>"
            ));
            serialize_runs(runs, out);
            out.push_str("</w:p>");
        }
        Block::Blockquote { runs } => {
            out.push_str("<w:p><w:pPr><w:pStyle w:val=\"Quote\"/></w:pPr>");
            serialize_runs(runs, out);
            out.push_str("</w:p>");
        }
        Block::CodeBlock { text } => {
            out.push_str("<w:p>");
            let run = InlineRun {
                text: text.clone(),
                code: true,
                ..Default::default()
            };
            serialize_run(&run, out);
            out.push_str("</w:p>");
        }
        Block::BulletList { items } => {
            for item in items {
                out.push_str("<w:p>");
                serialize_run(&InlineRun::plain("\u{2022} "), out);
                serialize_runs(item, out);
                out.push_str("</w:p>");
            }
        }
        Block::NumberedList { items } => {
            for (i, item) in items.iter().enumerate() {
                out.push_str("<w:p>");
                serialize_run(&InlineRun::plain(format!("{}. ", i + 1)), out);
                serialize_runs(item, out);
                out.push_str("</w:p>");
            }
        }
        Block::Table { rows } => serialize_table(rows, out),
    }
}

fn serialize_table(rows: &[Vec<Cell>], out: &mut String) {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if cols == 0 {
        return;
    }

    out.push_str("<w:tbl>");
    out.push_str(TABLE_PROPS);
    for row in rows {
        out.push_str("<w:tr>");
        for col in 0..cols {
            out.push_str("<w:tc><w:tcPr><w:tcW w:w=\"2000\" w:type=\"dxa\"/></w:tcPr>");
            match row.get(col) {
                Some(cell) => {
                    for block in &cell.blocks {
                        serialize_block(block, out);
                    }
                }
                // Every cell needs at least an empty paragraph to be valid.
                None => out.push_str("<w:p></w:p>"),
            }
            out.push_str("</w:tc>");
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
}

fn serialize_runs(runs: &[InlineRun], out: &mut String) {
    for run in merge_runs(runs.to_vec()) {
        serialize_run(&run, out);
    }
}

fn serialize_run(run: &InlineRun, out: &mut String) {
    let mut props = String::new();
    if run.code {
        props.push_str("<w:rFonts w:ascii=\"Courier New\" w:hAnsi=\"Courier New\"/>");
    }
    if run.bold {
        props.push_str("<w:b/>");
    }
    if run.italic {
        props.push_str("<w:i/>");
    }
    if run.underline {
        props.push_str("<w:u w:val=\"single\"/>");
    }

    out.push_str("<w:r>");
    if !props.is_empty() {
        out.push_str(&format!("<w:rPr>{props}</w:rPr>"));
    }
    for (i, part) in run.text.split('\n').enumerate() {
        if i > 0 {
            out.push_str("<w:br/>");
        }
        if !part.is_empty() {
            out.push_str(&format!(
                "<w:t xml:space=\"preserve\">{}</w:t>",
                xml_escape(part)
            ));
        }
    }
    out.push_str("</w:r>");
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            // Text formats normalize non-breaking spaces.
            '\u{a0}' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}
