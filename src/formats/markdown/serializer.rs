//! Markdown serialization (Document → Markdown)
//!
//! Emits CommonMark with pipe tables. The output is built by hand rather
//! than delegated to a Markdown formatter: downstream callers diff encoder
//! output across runs, so the exact bytes are part of the contract.

use crate::model::{merge_runs, Block, Cell, Document, InlineRun};

/// Serialize a document to Markdown.
///
/// Blocks are separated by exactly one blank line. Blocks that render to
/// nothing (e.g. a paragraph whose runs are all empty) are omitted entirely
/// rather than leaving stray blank lines.
///
/// Two same-typed lists in a row get an HTML comment between them: a blank
/// line alone would re-parse as one loose list.
pub fn serialize_to_markdown(doc: &Document) -> String {
    let mut chunks: Vec<String> = Vec::new();
    let mut prev_list = None;
    for block in &doc.blocks {
        let chunk = serialize_block(block);
        if chunk.is_empty() {
            continue;
        }
        let list_kind = match block {
            Block::BulletList { .. } => Some("-"),
            Block::NumberedList { .. } => Some("1"),
            _ => None,
        };
        if list_kind.is_some() && list_kind == prev_list {
            chunks.push("<!-- -->".to_string());
        }
        prev_list = list_kind;
        chunks.push(chunk);
    }
    chunks.join("\n\n")
}

fn serialize_block(block: &Block) -> String {
    match block {
        Block::Paragraph { runs } => serialize_runs(runs, false),
        Block::Heading { level, runs } => {
            let text = serialize_runs(runs, false);
            if text.is_empty() {
                return String::new();
            }
            format!("{} {text}", "#".repeat(usize::from(*level)))
        }
        Block::Blockquote { runs } => {
            let text = serialize_runs(runs, false);
            if text.is_empty() {
                return String::new();
            }
            text.lines()
                .map(|line| format!("> {line}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Block::CodeBlock { text } => {
            let mut out = String::from("```\n");
            out.push_str(text);
            if !text.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```");
            out
        }
        Block::BulletList { items } => items
            .iter()
            .map(|item| format!("- {}", serialize_runs(item, false)))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::NumberedList { items } => items
            .iter()
            .enumerate()
            // Always renumber from 1; source offsets are not preserved.
            .map(|(i, item)| format!("{}. {}", i + 1, serialize_runs(item, false)))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::Table { rows } => serialize_table(rows),
    }
}

fn serialize_table(rows: &[Vec<Cell>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    // Ragged input rows are padded to the widest row so the emitted table
    // is rectangular.
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if cols == 0 {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (i, row) in rows.iter().enumerate() {
        let mut line = String::from("|");
        for col in 0..cols {
            let text = row.get(col).map(cell_text).unwrap_or_default();
            line.push(' ');
            line.push_str(&text);
            line.push_str(" |");
        }
        lines.push(line);

        // Pipe tables require a delimiter row after the header row.
        if i == 0 {
            let mut sep = String::from("|");
            for _ in 0..cols {
                sep.push_str(" --- |");
            }
            lines.push(sep);
        }
    }
    lines.join("\n")
}

/// Flatten a cell to a single Markdown-safe line.
fn cell_text(cell: &Cell) -> String {
    let mut parts = Vec::new();
    for block in &cell.blocks {
        match block {
            Block::Paragraph { runs }
            | Block::Heading { runs, .. }
            | Block::Blockquote { runs } => {
                let text = serialize_runs(runs, true);
                if !text.is_empty() {
                    parts.push(text);
                }
            }
            Block::CodeBlock { text } => {
                let flat = text.replace('\n', " ");
                let flat = flat.trim();
                if !flat.is_empty() {
                    parts.push(flat.to_string());
                }
            }
            Block::BulletList { items } | Block::NumberedList { items } => {
                for item in items {
                    let text = serialize_runs(item, true);
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
            }
            // Nested tables cannot be expressed in a pipe table cell.
            Block::Table { .. } => {}
        }
    }
    parts.join(" ")
}

fn serialize_runs(runs: &[InlineRun], in_cell: bool) -> String {
    let merged = merge_runs(runs.to_vec());
    let mut out = String::new();
    for run in &merged {
        out.push_str(&serialize_run(run, in_cell));
    }
    out
}

fn serialize_run(run: &InlineRun, in_cell: bool) -> String {
    if run.color.is_some() || run.background.is_some() {
        log::debug!("dropping inline color on Markdown output");
    }

    let mut text = if run.code {
        code_span(&run.text)
    } else {
        escape_markdown(&run.text, in_cell)
    };
    if text.is_empty() {
        return text;
    }

    if !run.code && (run.italic || run.bold || run.underline) {
        // CommonMark flanking rules forbid emphasis delimiters against
        // whitespace, so edge whitespace moves outside the markers.
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return text;
        }
        let lead = &text[..text.len() - text.trim_start().len()];
        let trail = &text[text.trim_end().len()..];
        let mut styled = trimmed.to_string();
        if run.italic {
            styled = format!("*{styled}*");
        }
        if run.bold {
            styled = format!("**{styled}**");
        }
        if run.underline {
            // Markdown has no underline syntax; emit literal HTML.
            styled = format!("<u>{styled}</u>");
        }
        text = format!("{lead}{styled}{trail}");
    }
    if let Some(url) = &run.link {
        text = format!("[{text}]({url})");
    }
    text
}

/// Wrap text in a code span, widening the fence when the text itself
/// contains backticks.
fn code_span(text: &str) -> String {
    let text = text.replace('\u{a0}', " ");
    if text.contains('`') {
        format!("`` {text} ``")
    } else {
        format!("`{text}`")
    }
}

fn escape_markdown(text: &str, in_cell: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '*' | '_' | '`' => {
                out.push('\\');
                out.push(ch);
            }
            '|' if in_cell => out.push_str("\\|"),
            '\n' if in_cell => out.push(' '),
            // Text formats normalize non-breaking spaces.
            '\u{a0}' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}
