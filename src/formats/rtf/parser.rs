//! RTF parsing (RTF → Document)
//!
//! Walks the token stream with an explicit brace-depth counter and a
//! formatting-state stack, so nested and overlapping groups resolve
//! correctly. Header destinations (font table, color table, stylesheet,
//! info, `\*` ignorables) are skipped wholesale.
//!
//! The parser never fails. Brace underflow is ignored, and end of input
//! inside an open group flushes whatever was assembled so far.

use super::lexer::{tokenize, ControlWord, Token};
use crate::model::{merge_runs, Block, Cell, Document, InlineRun};

/// Parse an RTF string into a document.
pub fn parse_from_rtf(source: &str) -> Document {
    let mut state = ParseState::default();
    for token in tokenize(source) {
        state.feed(token);
    }
    state.finish()
}

/// Character formatting in effect at the current group depth.
#[derive(Debug, Clone, Default)]
struct CharFormat {
    bold: bool,
    italic: bool,
    underline: bool,
    code: bool,
}

impl CharFormat {
    fn apply(&self, text: String) -> InlineRun {
        InlineRun {
            text,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            code: self.code,
            ..Default::default()
        }
    }
}

#[derive(Default)]
struct ParseState {
    blocks: Vec<Block>,
    stack: Vec<CharFormat>,
    depth: usize,
    /// When set, content tokens are discarded until brace depth drops
    /// below this value (destination skipping).
    skip_below: Option<usize>,
    para_runs: Vec<InlineRun>,
    in_table: bool,
    rows: Vec<Vec<Cell>>,
    row: Vec<Cell>,
    cell_runs: Vec<InlineRun>,
    saw_underflow: bool,
}

impl ParseState {
    fn current(&mut self) -> &mut CharFormat {
        if self.stack.is_empty() {
            self.stack.push(CharFormat::default());
        }
        let top = self.stack.len() - 1;
        &mut self.stack[top]
    }

    fn feed(&mut self, token: Token) {
        match token {
            Token::OpenBrace => {
                self.depth += 1;
                let top = self.current().clone();
                self.stack.push(top);
            }
            Token::CloseBrace => {
                if self.depth == 0 {
                    self.saw_underflow = true;
                    return;
                }
                self.depth -= 1;
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
                if let Some(limit) = self.skip_below {
                    if self.depth < limit {
                        self.skip_below = None;
                    }
                }
            }
            Token::Control(word) => {
                if self.skip_below.is_some() {
                    return;
                }
                self.control(word);
            }
            Token::Text(text) => {
                if self.skip_below.is_some() {
                    return;
                }
                let run = self.current().apply(text);
                self.push_run(run);
            }
        }
    }

    fn control(&mut self, word: ControlWord) {
        match word {
            ControlWord::Bold(on) => self.current().bold = on,
            ControlWord::Italic(on) => self.current().italic = on,
            ControlWord::Underline(on) => self.current().underline = on,
            // Font 1 is the monospace slot in the emitted font table.
            ControlWord::Font(n) => self.current().code = n == 1,
            ControlWord::FontTable
            | ControlWord::ColorTable
            | ControlWord::Stylesheet
            | ControlWord::Info
            | ControlWord::IgnorableDestination => {
                if self.depth > 0 {
                    self.skip_below = Some(self.depth);
                }
            }
            ControlWord::Par => self.par(),
            ControlWord::Line => self.push_run(InlineRun::line_break()),
            ControlWord::Tab => self.push_run(InlineRun::plain("\t")),
            ControlWord::TableRowDefaults | ControlWord::InTable => {
                if !self.in_table {
                    self.flush_paragraph();
                    self.in_table = true;
                }
            }
            ControlWord::Cell => {
                let runs = merge_runs(std::mem::take(&mut self.cell_runs));
                self.row.push(Cell {
                    blocks: vec![Block::Paragraph { runs }],
                });
                self.in_table = true;
            }
            ControlWord::Row => {
                if !self.cell_runs.is_empty() {
                    let runs = merge_runs(std::mem::take(&mut self.cell_runs));
                    self.row.push(Cell {
                        blocks: vec![Block::Paragraph { runs }],
                    });
                }
                if !self.row.is_empty() {
                    self.rows.push(std::mem::take(&mut self.row));
                }
            }
            ControlWord::Unknown(_) => {}
        }
    }

    fn push_run(&mut self, run: InlineRun) {
        if self.in_table {
            self.cell_runs.push(run);
        } else {
            self.para_runs.push(run);
        }
    }

    fn par(&mut self) {
        if self.in_table {
            if !self.cell_runs.is_empty() {
                // A paragraph break inside a cell stays inside the cell.
                self.cell_runs.push(InlineRun::line_break());
            } else {
                self.flush_table();
            }
        } else {
            self.flush_paragraph();
        }
    }

    fn flush_paragraph(&mut self) {
        let runs = merge_runs(std::mem::take(&mut self.para_runs));
        if !runs.is_empty() {
            self.blocks.push(Block::Paragraph { runs });
        }
    }

    fn flush_table(&mut self) {
        if !self.cell_runs.is_empty() {
            let runs = merge_runs(std::mem::take(&mut self.cell_runs));
            self.row.push(Cell {
                blocks: vec![Block::Paragraph { runs }],
            });
        }
        if !self.row.is_empty() {
            self.rows.push(std::mem::take(&mut self.row));
        }
        if !self.rows.is_empty() {
            let rows = std::mem::take(&mut self.rows);
            self.blocks.push(Block::Table { rows });
        }
        self.in_table = false;
    }

    fn finish(mut self) -> Document {
        if self.in_table {
            self.flush_table();
        }
        self.flush_paragraph();
        if self.depth != 0 || self.saw_underflow {
            log::warn!(
                "unbalanced RTF braces (final depth {}), returning partial document",
                self.depth
            );
        }
        Document::new(self.blocks)
    }
}
