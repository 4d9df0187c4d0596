//! Legacy import normalizer (decode only)
//!
//! Exported legacy ".doc" files are frequently just renamed HTML, or
//! near-plain-text with word-processor droppings. This module routes such
//! uploads: markup goes through the HTML decoder after a cleanup pass,
//! anything else is treated as line-oriented plain text.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::{Block, Document, InlineRun};

/// Normalize an uploaded legacy file into a document.
///
/// `declared_extension` is the extension the upload claimed (without the
/// dot). It decides whether the plain-text path may promote short
/// capitalized lines to headings: declared word-processor files get the
/// heuristic, declared plain text never does.
pub fn normalize_legacy(content: &str, declared_extension: &str) -> Document {
    let is_word_processor = matches!(
        declared_extension.to_ascii_lowercase().as_str(),
        "doc" | "docx"
    );

    if content.contains("<body") {
        log::debug!("legacy import: found <body>, routing through HTML decoder");
        let cleaned = strip_vendor_markup(content);
        return crate::formats::html::parser::parse_from_html(&cleaned);
    }

    if looks_like_html(content) {
        log::debug!("legacy import: markup detected, routing through HTML decoder");
        return crate::formats::html::parser::parse_from_html(content);
    }

    plain_text_document(content, is_word_processor)
}

/// Remove the word-processor wrapping that trips up strict parsing:
/// XML declarations, DOCTYPE, comments, namespace declarations, and empty
/// `<o:p>` vendor paragraph markers.
fn strip_vendor_markup(content: &str) -> String {
    let mut cleaned = strip_delimited(content, "<?xml", "?>");
    cleaned = strip_delimited(&cleaned, "<!DOCTYPE", ">");
    cleaned = strip_delimited(&cleaned, "<!--", "-->");
    cleaned = strip_xmlns_attrs(&cleaned);
    cleaned = cleaned.replace("<o:p></o:p>", "");
    cleaned = cleaned.replace("<o:p> </o:p>", "");
    cleaned
}

/// Remove every `start`..`end` span (end delimiter included). An unclosed
/// span runs to the end of input.
fn strip_delimited(content: &str, start: &str, end: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(open) = rest.find(start) {
        out.push_str(&rest[..open]);
        match rest[open..].find(end) {
            Some(close) => rest = &rest[open + close + end.len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Remove `xmlns...="..."` attribute declarations.
fn strip_xmlns_attrs(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(pos) = rest.find(" xmlns") {
        let after = &rest[pos..];
        // Only treat it as an attribute if an ="..." value follows.
        let value_start = match after.find('=') {
            Some(eq) if after[..eq].chars().skip(1).all(|c| !c.is_whitespace()) => eq,
            _ => {
                out.push_str(&rest[..pos + 6]);
                rest = &rest[pos + 6..];
                continue;
            }
        };
        let after_eq = &after[value_start + 1..];
        if let Some(quoted) = after_eq.strip_prefix('"') {
            match quoted.find('"') {
                Some(close) => {
                    out.push_str(&rest[..pos]);
                    rest = &after_eq[close + 2..];
                }
                None => {
                    out.push_str(&rest[..pos]);
                    return out;
                }
            }
        } else {
            out.push_str(&rest[..pos + 6]);
            rest = &rest[pos + 6..];
        }
    }
    out.push_str(rest);
    out
}

fn looks_like_html(content: &str) -> bool {
    ["<p", "<h1", "<h2", "<h3", "<div", "<table"]
        .iter()
        .any(|tag| content.contains(tag))
}

fn plain_text_document(content: &str, promote_headings: bool) -> Document {
    let mut blocks = Vec::new();
    let mut paragraph_lines: Vec<String> = Vec::new();

    let flush = |lines: &mut Vec<String>, blocks: &mut Vec<Block>| {
        if lines.is_empty() {
            return;
        }
        let mut runs = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                runs.push(InlineRun::line_break());
            }
            runs.push(InlineRun::plain(line.clone()));
        }
        blocks.push(Block::Paragraph { runs });
        lines.clear();
    };

    for raw_line in content.lines() {
        let line = if promote_headings {
            strip_control_chars(raw_line)
        } else {
            raw_line.to_string()
        };
        let line = line.trim();

        if line.is_empty() {
            flush(&mut paragraph_lines, &mut blocks);
            continue;
        }

        if promote_headings && is_heading_candidate(line) {
            flush(&mut paragraph_lines, &mut blocks);
            blocks.push(Block::Heading {
                level: 3,
                runs: vec![InlineRun::plain(line)],
            });
        } else {
            paragraph_lines.push(line.to_string());
        }
    }
    flush(&mut paragraph_lines, &mut blocks);

    Document::new(blocks)
}

/// Drop control bytes that survive in near-plain-text ".doc" exports.
fn strip_control_chars(line: &str) -> String {
    line.chars()
        .filter(|&c| {
            !matches!(c, '\u{00}'..='\u{08}' | '\u{0b}' | '\u{0c}' | '\u{0e}'..='\u{1f}' | '\u{7f}'..='\u{9f}')
        })
        .collect()
}

/// Short capitalized line with no trailing punctuation. Lossy by design;
/// it exists because legacy exports carry no structural heading markers.
fn is_heading_candidate(line: &str) -> bool {
    if line.len() >= 100 || line.chars().count() < 2 {
        return false;
    }
    let mut chars = line.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if !first.is_ascii_uppercase() {
        return false;
    }
    if !line.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return false;
    }
    line.chars().last().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Declared `.doc`/`.docx` uploads.
pub struct LegacyDocFormat;

impl Format for LegacyDocFormat {
    fn name(&self) -> &str {
        "legacy-doc"
    }

    fn description(&self) -> &str {
        "Legacy word-processor export (often renamed HTML)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["doc", "docx"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(normalize_legacy(source, "doc"))
    }
}

/// Declared plain-text uploads. Never promotes headings.
pub struct PlainTextFormat;

impl Format for PlainTextFormat {
    fn name(&self) -> &str {
        "plain-text"
    }

    fn description(&self) -> &str {
        "Plain text split into paragraphs"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(normalize_legacy(source, "txt"))
    }
}
