//! Helpers for working with inline runs.

use super::nodes::InlineRun;

/// Coalesce adjacent runs that share an attribute set and drop empty runs.
///
/// Every encoder merges before emitting, which is what makes re-encoding an
/// already-encoded document byte-identical.
pub fn merge_runs(runs: Vec<InlineRun>) -> Vec<InlineRun> {
    let mut merged: Vec<InlineRun> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(prev) if prev.style_eq(&run) => prev.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }
    merged
}

/// Concatenated text of a run sequence with all formatting stripped.
pub fn plain_text(runs: &[InlineRun]) -> String {
    let mut out = String::new();
    for run in runs {
        out.push_str(&run.text);
    }
    out
}

/// Clamp a heading level into the model's 1..=6 range.
pub fn clamp_heading_level(level: u32) -> u8 {
    level.clamp(1, 6) as u8
}

/// Formatting context threaded through decoder tree walks.
///
/// Both the HTML and Markdown decoders accumulate one of these while
/// descending into nested inline markup, then stamp it onto each text leaf.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Option<String>,
    pub background: Option<String>,
    pub link: Option<String>,
}

impl RunStyle {
    /// A run carrying this style and the given text.
    pub fn apply(&self, text: impl Into<String>) -> InlineRun {
        InlineRun {
            text: text.into(),
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            code: self.code,
            color: self.color.clone(),
            background: self.background.clone(),
            link: self.link.clone(),
        }
    }
}
