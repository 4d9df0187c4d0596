//! Markdown parsing (Markdown → Document)
//!
//! Converts CommonMark Markdown (with pipe tables) to the document model.
//! Pipeline: Markdown string → Comrak AST → Document
//!
//! Decoding is total: comrak closes unterminated fences at end of input and
//! treats unterminated emphasis markers as literal text, so any byte soup
//! yields a usable document.

use crate::model::{clamp_heading_level, merge_runs, Block, Cell, Document, InlineRun, RunStyle};
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse a Markdown string into a document.
pub fn parse_from_markdown(source: &str) -> Document {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let mut blocks = Vec::new();
    for child in root.children() {
        collect_block(child, &mut blocks);
    }
    Document::new(blocks)
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
}

fn collect_block<'a>(node: &'a AstNode<'a>, blocks: &mut Vec<Block>) {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Heading(heading) => {
            let runs = collect_inline_children(node, &RunStyle::default());
            blocks.push(Block::Heading {
                level: clamp_heading_level(u32::from(heading.level)),
                runs: merge_runs(runs),
            });
        }

        NodeValue::Paragraph => {
            let runs = collect_inline_children(node, &RunStyle::default());
            let runs = merge_runs(runs);
            if !runs.is_empty() {
                blocks.push(Block::Paragraph { runs });
            }
        }

        NodeValue::BlockQuote => {
            // Paragraphs inside a quote collapse into one quote block with
            // hard breaks between them.
            let mut runs = Vec::new();
            for child in node.children() {
                if matches!(child.data.borrow().value, NodeValue::Paragraph) {
                    if !runs.is_empty() {
                        runs.push(InlineRun::line_break());
                    }
                    runs.extend(collect_inline_children(child, &RunStyle::default()));
                } else {
                    // Non-paragraph quote content (nested quotes, lists)
                    // degrades to its text.
                    let mut inner = Vec::new();
                    collect_block(child, &mut inner);
                    for block in inner {
                        if !runs.is_empty() {
                            runs.push(InlineRun::line_break());
                        }
                        runs.extend(block_to_runs(block));
                    }
                }
            }
            blocks.push(Block::Blockquote {
                runs: merge_runs(runs),
            });
        }

        NodeValue::CodeBlock(code_block) => {
            let mut text = code_block.literal.clone();
            // comrak's literal keeps the newline before the closing fence.
            if text.ends_with('\n') {
                text.pop();
            }
            blocks.push(Block::CodeBlock { text });
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, comrak::nodes::ListType::Ordered);
            let mut items = Vec::new();
            for item in node.children() {
                items.push(collect_list_item(item));
            }
            if ordered {
                blocks.push(Block::NumberedList { items });
            } else {
                blocks.push(Block::BulletList { items });
            }
        }

        NodeValue::Table(_) => {
            let mut rows = Vec::new();
            for row in node.children() {
                if !matches!(row.data.borrow().value, NodeValue::TableRow(_)) {
                    continue;
                }
                let mut cells = Vec::new();
                for cell in row.children() {
                    let runs = merge_runs(collect_inline_children(cell, &RunStyle::default()));
                    cells.push(Cell {
                        blocks: vec![Block::Paragraph { runs }],
                    });
                }
                rows.push(cells);
            }
            blocks.push(Block::Table { rows });
        }

        NodeValue::ThematicBreak | NodeValue::HtmlBlock(_) | NodeValue::FrontMatter(_) => {
            log::debug!("skipping Markdown construct with no model equivalent");
        }

        _ => {
            // Unknown block type, skip
        }
    }
}

/// Flatten a list item to a single run sequence. Multi-paragraph items are
/// joined with hard breaks; nested lists degrade to their text.
fn collect_list_item<'a>(item: &'a AstNode<'a>) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    for child in item.children() {
        match &child.data.borrow().value {
            NodeValue::Paragraph => {
                if !runs.is_empty() {
                    runs.push(InlineRun::line_break());
                }
                runs.extend(collect_inline_children(child, &RunStyle::default()));
            }
            NodeValue::List(_) => {
                for nested in child.children() {
                    let nested_runs = collect_list_item(nested);
                    if !runs.is_empty() {
                        runs.push(InlineRun::line_break());
                    }
                    runs.extend(nested_runs);
                }
            }
            _ => {
                let mut inner = Vec::new();
                collect_block(child, &mut inner);
                for block in inner {
                    if !runs.is_empty() {
                        runs.push(InlineRun::line_break());
                    }
                    runs.extend(block_to_runs(block));
                }
            }
        }
    }
    merge_runs(runs)
}

/// Degrade a block to its run content (used when nesting cannot be kept).
fn block_to_runs(block: Block) -> Vec<InlineRun> {
    match block {
        Block::Paragraph { runs } | Block::Heading { runs, .. } | Block::Blockquote { runs } => {
            runs
        }
        Block::CodeBlock { text } => vec![InlineRun {
            text,
            code: true,
            ..Default::default()
        }],
        Block::BulletList { items } | Block::NumberedList { items } => {
            let mut runs = Vec::new();
            for item in items {
                if !runs.is_empty() {
                    runs.push(InlineRun::line_break());
                }
                runs.extend(item);
            }
            runs
        }
        Block::Table { rows } => {
            let mut runs = Vec::new();
            for row in rows {
                for cell in row {
                    for block in cell.blocks {
                        runs.extend(block_to_runs(block));
                    }
                }
            }
            runs
        }
    }
}

fn collect_inline_children<'a>(node: &'a AstNode<'a>, style: &RunStyle) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    for child in node.children() {
        collect_inline(child, style, &mut runs);
    }
    runs
}

fn collect_inline<'a>(node: &'a AstNode<'a>, style: &RunStyle, runs: &mut Vec<InlineRun>) {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Text(text) => runs.push(style.apply(text.clone())),

        NodeValue::Strong => {
            let mut nested = style.clone();
            nested.bold = true;
            for child in node.children() {
                collect_inline(child, &nested, runs);
            }
        }

        NodeValue::Emph => {
            let mut nested = style.clone();
            nested.italic = true;
            for child in node.children() {
                collect_inline(child, &nested, runs);
            }
        }

        NodeValue::Code(code) => {
            let mut nested = style.clone();
            nested.code = true;
            runs.push(nested.apply(code.literal.clone()));
        }

        NodeValue::Link(link) => {
            let mut nested = style.clone();
            nested.link = Some(link.url.clone());
            for child in node.children() {
                collect_inline(child, &nested, runs);
            }
        }

        NodeValue::SoftBreak | NodeValue::LineBreak => runs.push(InlineRun::line_break()),

        // Inline HTML tags (including <u>) are dropped; their inner text
        // arrives as separate Text nodes and survives unstyled.
        NodeValue::HtmlInline(_) => {}

        NodeValue::Image(_) => {
            // Images have no model equivalent; keep the alt text.
            for child in node.children() {
                collect_inline(child, style, runs);
            }
        }

        NodeValue::Strikethrough => {
            // No strikethrough attribute in the model; keep the text.
            for child in node.children() {
                collect_inline(child, style, runs);
            }
        }

        _ => {
            // Skip unknown inline types
        }
    }
}
