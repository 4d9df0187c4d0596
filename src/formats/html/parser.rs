//! HTML parsing (HTML → Document)
//!
//! Pipeline: HTML string → html5ever RcDom → Document. The tree builder
//! already repairs misnested tags and decodes entities, so this walk only
//! has to map elements onto blocks and runs.
//!
//! Decoding is total: any input yields a document, unknown elements degrade
//! to their inline content.

use crate::model::{
    clamp_heading_level, merge_runs, Block, Cell, Document, InlineRun, RunStyle,
};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML string (full document or fragment) into a document.
pub fn parse_from_html(source: &str) -> Document {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);
    let root = find_body(&dom.document).unwrap_or_else(|| dom.document.clone());

    let mut builder = BlockBuilder::default();
    for child in root.children.borrow().iter() {
        builder.walk(child);
    }
    Document::new(builder.finish())
}

/// Locate the `<body>` element the tree builder always synthesizes.
fn find_body(node: &Handle) -> Option<Handle> {
    if element_name(node) == Some("body".to_string()) {
        return Some(node.clone());
    }
    for child in node.children.borrow().iter() {
        if let Some(body) = find_body(child) {
            return Some(body);
        }
    }
    None
}

fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_ascii_lowercase().to_string()),
        _ => None,
    }
}

fn attr_value(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == attr_name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Accumulates blocks, buffering loose inline content (bare text or inline
/// elements directly under body) into an implicit paragraph.
#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    pending: Vec<InlineRun>,
}

impl BlockBuilder {
    fn walk(&mut self, node: &Handle) {
        match &node.data {
            NodeData::Text { contents } => {
                let text = collapse_whitespace(&contents.borrow());
                if !text.trim().is_empty() {
                    self.pending.push(InlineRun::plain(text));
                }
            }
            NodeData::Element { .. } => self.walk_element(node),
            _ => {}
        }
    }

    fn walk_element(&mut self, node: &Handle) {
        let name = match element_name(node) {
            Some(name) => name,
            None => return,
        };

        match name.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush_pending();
                let level = name[1..].parse::<u32>().unwrap_or(1);
                let runs = trim_block_runs(collect_inline(node, &RunStyle::default()));
                self.blocks.push(Block::Heading {
                    level: clamp_heading_level(level),
                    runs,
                });
            }
            "p" | "div" => {
                if has_block_children(node) {
                    // Wrapper div around further block markup, recurse.
                    self.flush_pending();
                    for child in node.children.borrow().iter() {
                        self.walk(child);
                    }
                    self.flush_pending();
                } else {
                    self.flush_pending();
                    let runs = trim_block_runs(collect_inline(node, &RunStyle::default()));
                    if !runs.is_empty() {
                        self.blocks.push(Block::Paragraph { runs });
                    }
                }
            }
            "blockquote" => {
                self.flush_pending();
                let runs = trim_block_runs(collect_blocky_inline(node));
                self.blocks.push(Block::Blockquote { runs });
            }
            "pre" => {
                self.flush_pending();
                let mut text = String::new();
                collect_verbatim_text(node, &mut text);
                let text = text.strip_suffix('\n').unwrap_or(&text).to_string();
                self.blocks.push(Block::CodeBlock { text });
            }
            "ul" | "ol" => {
                self.flush_pending();
                let mut items = Vec::new();
                for child in node.children.borrow().iter() {
                    if element_name(child).as_deref() == Some("li") {
                        items.push(trim_block_runs(collect_blocky_inline(child)));
                    }
                }
                if name == "ul" {
                    self.blocks.push(Block::BulletList { items });
                } else {
                    self.blocks.push(Block::NumberedList { items });
                }
            }
            "table" => {
                self.flush_pending();
                let mut rows = Vec::new();
                collect_table_rows(node, &mut rows);
                self.blocks.push(Block::Table { rows });
            }
            "br" => self.pending.push(InlineRun::line_break()),
            "script" | "style" | "head" | "title" | "meta" | "link" => {}
            // Legacy word-processor vendor markers carry no content.
            "o:p" => {}
            "html" | "body" => {
                for child in node.children.borrow().iter() {
                    self.walk(child);
                }
            }
            _ => {
                // Inline (or unknown) element directly at block level.
                let style = RunStyle::default();
                let mut runs = Vec::new();
                collect_inline_into(node, &style, &mut runs);
                self.pending.extend(runs);
            }
        }
    }

    fn flush_pending(&mut self) {
        let runs = trim_block_runs(std::mem::take(&mut self.pending));
        if !runs.is_empty() {
            self.blocks.push(Block::Paragraph { runs });
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_pending();
        self.blocks
    }
}

fn has_block_children(node: &Handle) -> bool {
    node.children.borrow().iter().any(|child| {
        matches!(
            element_name(child).as_deref(),
            Some(
                "p" | "div"
                    | "h1"
                    | "h2"
                    | "h3"
                    | "h4"
                    | "h5"
                    | "h6"
                    | "blockquote"
                    | "pre"
                    | "ul"
                    | "ol"
                    | "table"
            )
        )
    })
}

fn collect_table_rows(node: &Handle, rows: &mut Vec<Vec<Cell>>) {
    for child in node.children.borrow().iter() {
        match element_name(child).as_deref() {
            Some("tr") => {
                let mut cells = Vec::new();
                for cell_node in child.children.borrow().iter() {
                    if matches!(element_name(cell_node).as_deref(), Some("td" | "th")) {
                        let runs = trim_block_runs(collect_blocky_inline(cell_node));
                        cells.push(Cell {
                            blocks: vec![Block::Paragraph { runs }],
                        });
                    }
                }
                rows.push(cells);
            }
            Some("thead" | "tbody" | "tfoot") => collect_table_rows(child, rows),
            _ => {}
        }
    }
}

/// Inline collection for containers whose children may include block
/// elements (list items, quote bodies, table cells). Block children are
/// separated by hard breaks instead of being lost.
fn collect_blocky_inline(node: &Handle) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let style = RunStyle::default();
    for child in node.children.borrow().iter() {
        let is_block = matches!(
            element_name(child).as_deref(),
            Some("p" | "div" | "blockquote" | "pre" | "ul" | "ol" | "li")
        );
        if is_block && runs.iter().any(|r: &InlineRun| !r.text.trim().is_empty()) {
            runs.push(InlineRun::line_break());
        }
        collect_inline_into(child, &style, &mut runs);
    }
    runs
}

fn collect_inline(node: &Handle, style: &RunStyle) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    for child in node.children.borrow().iter() {
        collect_inline_into(child, style, &mut runs);
    }
    runs
}

fn collect_inline_into(node: &Handle, style: &RunStyle, runs: &mut Vec<InlineRun>) {
    match &node.data {
        NodeData::Text { contents } => {
            let text = collapse_whitespace(&contents.borrow());
            if !text.is_empty() {
                runs.push(style.apply(text));
            }
        }
        NodeData::Element { .. } => {
            let name = match element_name(node) {
                Some(name) => name,
                None => return,
            };
            let mut nested = style.clone();
            match name.as_str() {
                "b" | "strong" => nested.bold = true,
                "i" | "em" => nested.italic = true,
                "u" => nested.underline = true,
                "code" => nested.code = true,
                "a" => nested.link = attr_value(node, "href"),
                "br" => {
                    runs.push(InlineRun::line_break());
                    return;
                }
                "script" | "style" | "o:p" => return,
                "span" | "font" | "mark" => apply_css_style(node, &mut nested),
                _ => {
                    // Unknown element: keep walking, its text survives.
                }
            }
            for child in node.children.borrow().iter() {
                collect_inline_into(child, &nested, runs);
            }
        }
        _ => {}
    }
}

/// Record `color` / `background-color` declarations from a style attribute.
/// Only `#hex` values are taken; other CSS color syntaxes are ignored.
fn apply_css_style(node: &Handle, style: &mut RunStyle) {
    let css = match attr_value(node, "style") {
        Some(css) => css,
        None => return,
    };
    for decl in css.split(';') {
        let (key, value) = match decl.split_once(':') {
            Some(pair) => pair,
            None => continue,
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        if !value.starts_with('#') {
            continue;
        }
        match key.as_str() {
            "color" => style.color = Some(value.to_ascii_lowercase()),
            "background-color" => style.background = Some(value.to_ascii_lowercase()),
            _ => {}
        }
    }
}

/// Collapse runs of ASCII whitespace to single spaces, keeping U+00A0.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch == ' ' || ch == '\n' || ch == '\r' || ch == '\t' {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Merge runs and strip whitespace hanging off the edges of a block.
fn trim_block_runs(runs: Vec<InlineRun>) -> Vec<InlineRun> {
    let mut runs = merge_runs(runs);
    if let Some(first) = runs.first_mut() {
        first.text = first.text.trim_start().to_string();
    }
    if let Some(last) = runs.last_mut() {
        last.text = last.text.trim_end().to_string();
    }
    merge_runs(runs)
}

/// Text content with whitespace preserved, for `<pre>` blocks.
fn collect_verbatim_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        _ => {
            for child in node.children.borrow().iter() {
                collect_verbatim_text(child, out);
            }
        }
    }
}
