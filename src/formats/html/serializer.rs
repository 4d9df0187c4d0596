//! HTML serialization (Document → HTML fragment)
//!
//! Builds an RcDom tree and serializes it with html5ever, which handles all
//! attribute and text escaping. Output is a body fragment (no `<html>`
//! wrapper) ready to hand back to a live editor.

use crate::error::FormatError;
use crate::model::{merge_runs, Block, Cell, Document, InlineRun};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell as StdCell, RefCell};
use std::rc::Rc;

/// Serialize a document to an HTML fragment.
pub fn serialize_to_html(doc: &Document) -> Result<String, FormatError> {
    let container = create_element("div", vec![]);
    for block in &doc.blocks {
        let node = build_block(block);
        container.children.borrow_mut().push(node);
    }
    serialize_children(&container)
}

fn build_block(block: &Block) -> Handle {
    match block {
        Block::Paragraph { runs } => {
            let p = create_element("p", vec![]);
            append_runs(&p, runs);
            p
        }
        Block::Heading { level, runs } => {
            let tag = format!("h{}", (*level).clamp(1, 6));
            let heading = create_element(&tag, vec![]);
            append_runs(&heading, runs);
            heading
        }
        Block::Blockquote { runs } => {
            let quote = create_element("blockquote", vec![]);
            let p = create_element("p", vec![]);
            append_runs(&p, runs);
            quote.children.borrow_mut().push(p);
            quote
        }
        Block::CodeBlock { text } => {
            let pre = create_element("pre", vec![]);
            let code = create_element("code", vec![]);
            code.children.borrow_mut().push(create_text(text));
            pre.children.borrow_mut().push(code);
            pre
        }
        Block::BulletList { items } => build_list("ul", items),
        Block::NumberedList { items } => build_list("ol", items),
        Block::Table { rows } => build_table(rows),
    }
}

fn build_list(tag: &str, items: &[Vec<InlineRun>]) -> Handle {
    let list = create_element(tag, vec![]);
    for item in items {
        let li = create_element("li", vec![]);
        append_runs(&li, item);
        list.children.borrow_mut().push(li);
    }
    list
}

fn build_table(rows: &[Vec<Cell>]) -> Handle {
    let table = create_element("table", vec![]);
    let tbody = create_element("tbody", vec![]);
    for row in rows {
        let tr = create_element("tr", vec![]);
        for cell in row {
            let td = create_element("td", vec![]);
            for block in &cell.blocks {
                let node = build_block(block);
                td.children.borrow_mut().push(node);
            }
            tr.children.borrow_mut().push(td);
        }
        tbody.children.borrow_mut().push(tr);
    }
    table.children.borrow_mut().push(tbody);
    table
}

fn append_runs(parent: &Handle, runs: &[InlineRun]) {
    for run in merge_runs(runs.to_vec()) {
        append_run(parent, &run);
    }
}

fn append_run(parent: &Handle, run: &InlineRun) {
    // A pure line break run renders as <br>.
    if run.text == "\n" && !run.has_style() {
        parent
            .children
            .borrow_mut()
            .push(create_element("br", vec![]));
        return;
    }

    // Innermost first: text, then code/u/em/strong, span for colors,
    // finally the anchor.
    let mut node = build_text_with_breaks(&run.text);
    if run.code {
        node = wrap(node, create_element("code", vec![]));
    }
    if run.underline {
        node = wrap(node, create_element("u", vec![]));
    }
    if run.italic {
        node = wrap(node, create_element("em", vec![]));
    }
    if run.bold {
        node = wrap(node, create_element("strong", vec![]));
    }
    if run.color.is_some() || run.background.is_some() {
        let mut css = String::new();
        if let Some(color) = &run.color {
            css.push_str(&format!("color: {color}"));
        }
        if let Some(background) = &run.background {
            if !css.is_empty() {
                css.push_str("; ");
            }
            css.push_str(&format!("background-color: {background}"));
        }
        node = wrap(node, create_element("span", vec![("style", &css)]));
    }
    if let Some(url) = &run.link {
        node = wrap(node, create_element("a", vec![("href", url)]));
    }
    parent.children.borrow_mut().push(node);
}

/// Text with embedded newlines becomes text nodes separated by <br>.
fn build_text_with_breaks(text: &str) -> Handle {
    if !text.contains('\n') {
        return create_text(text);
    }
    let span = create_element("span", vec![]);
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            span.children
                .borrow_mut()
                .push(create_element("br", vec![]));
        }
        if !part.is_empty() {
            span.children.borrow_mut().push(create_text(part));
        }
    }
    span
}

fn wrap(inner: Handle, outer: Handle) -> Handle {
    outer.children.borrow_mut().push(inner);
    outer
}

/// Create an element node
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: StdCell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: StdCell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize each child of the container (the container itself is not
/// part of the output).
fn serialize_children(container: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}
