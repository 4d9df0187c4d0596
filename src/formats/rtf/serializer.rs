//! RTF serialization (Document → RTF)
//!
//! Emits a fixed header with a two-font table (serif body, monospace for
//! code runs), then one group per styled run and a `\par` per block. Every
//! literal backslash and brace in document text is escaped, which keeps the
//! output brace-balanced for any input document.

use crate::model::{merge_runs, Block, Cell, Document, InlineRun};

const HEADER: &str =
    "{\\rtf1\\ansi\\deff0 {\\fonttbl {\\f0 Times New Roman;}{\\f1 Courier New;}}\\f0\\fs24 ";

/// Half-points for heading levels 1 through 6 (body text is \fs24).
const HEADING_SIZES: [u8; 6] = [32, 28, 24, 22, 20, 18];

/// Serialize a document to RTF.
pub fn serialize_to_rtf(doc: &Document) -> String {
    let mut out = String::from(HEADER);
    for block in &doc.blocks {
        serialize_block(block, &mut out);
    }
    out.push('}');
    out
}

fn serialize_block(block: &Block, out: &mut String) {
    match block {
        Block::Paragraph { runs } => {
            serialize_runs(runs, out);
            out.push_str("\\par ");
        }
        Block::Heading { level, runs } => {
            let idx = usize::from((*level).clamp(1, 6) - 1);
            out.push_str(&format!("{{\\b\\fs{} ", HEADING_SIZES[idx]));
            serialize_runs(runs, out);
            out.push_str("}\\par ");
        }
        Block::Blockquote { runs } => {
            out.push_str("{\\i \"");
            serialize_runs(runs, out);
            out.push_str("\"}\\par ");
        }
        Block::CodeBlock { text } => {
            out.push_str("{\\f1 ");
            out.push_str(&escape_rtf(text));
            out.push_str("}\\par ");
        }
        Block::BulletList { items } => {
            for item in items {
                out.push_str("\\u8226? ");
                serialize_runs(item, out);
                out.push_str("\\par ");
            }
        }
        Block::NumberedList { items } => {
            for (i, item) in items.iter().enumerate() {
                out.push_str(&format!("{}. ", i + 1));
                serialize_runs(item, out);
                out.push_str("\\par ");
            }
        }
        Block::Table { rows } => serialize_table(rows, out),
    }
}

fn serialize_table(rows: &[Vec<Cell>], out: &mut String) {
    if rows.is_empty() {
        return;
    }
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if cols == 0 {
        return;
    }

    out.push_str("{\\trowd\\trgaph100\\trleft0");

    // Equal column widths across half the page (5000 twips of usable width).
    let col_width = 5000 / cols;
    for i in 0..cols {
        out.push_str(&format!(
            "\\clbrdrl\\brdrs\\clbrdrt\\brdrs\\clbrdrb\\brdrs\\clbrdrr\\brdrs\\cellx{}",
            (i + 1) * col_width
        ));
    }

    for row in rows {
        for col in 0..cols {
            out.push_str("\\intbl ");
            if let Some(cell) = row.get(col) {
                serialize_cell(cell, out);
            }
            out.push_str("\\cell");
        }
        out.push_str("\\row");
    }
    out.push_str("}\\par ");
}

fn serialize_cell(cell: &Cell, out: &mut String) {
    let mut first = true;
    for block in &cell.blocks {
        match block {
            Block::Paragraph { runs } | Block::Heading { runs, .. } | Block::Blockquote { runs } => {
                if !first {
                    out.push_str("\\line ");
                }
                serialize_runs(runs, out);
                first = false;
            }
            Block::CodeBlock { text } => {
                if !first {
                    out.push_str("\\line ");
                }
                out.push_str("{\\f1 ");
                out.push_str(&escape_rtf(text));
                out.push('}');
                first = false;
            }
            Block::BulletList { items } | Block::NumberedList { items } => {
                for item in items {
                    if !first {
                        out.push_str("\\line ");
                    }
                    serialize_runs(item, out);
                    first = false;
                }
            }
            // Nested tables do not survive a cell.
            Block::Table { .. } => {}
        }
    }
}

fn serialize_runs(runs: &[InlineRun], out: &mut String) {
    for run in merge_runs(runs.to_vec()) {
        serialize_run(&run, out);
    }
}

fn serialize_run(run: &InlineRun, out: &mut String) {
    if run.color.is_some() || run.background.is_some() {
        log::debug!("dropping inline color on RTF output");
    }
    if run.link.is_some() {
        log::debug!("dropping hyperlink target on RTF output");
    }

    let text = escape_rtf(&run.text);
    if !run.bold && !run.italic && !run.underline && !run.code {
        out.push_str(&text);
        return;
    }

    out.push('{');
    if run.code {
        out.push_str("\\f1");
    }
    if run.bold {
        out.push_str("\\b");
    }
    if run.italic {
        out.push_str("\\i");
    }
    if run.underline {
        out.push_str("\\ul");
    }
    out.push(' ');
    out.push_str(&text);
    out.push('}');
}

fn escape_rtf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\line "),
            '\t' => out.push_str("\\tab "),
            // Text formats normalize non-breaking spaces.
            '\u{a0}' => out.push(' '),
            c if (c as u32) < 0x80 => out.push(c),
            c if (c as u32) <= 0xFF => out.push_str(&format!("\\'{:02x}", c as u32)),
            c => {
                // Non-Latin-1 goes out as signed 16-bit units with a '?'
                // fallback, surrogate pairs included.
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
    out
}
