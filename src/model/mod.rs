//! The canonical document model shared by every codec.

pub mod nodes;
pub mod runs;

pub use nodes::{Block, Cell, Document, InlineRun};
pub use runs::{clamp_heading_level, merge_runs, plain_text, RunStyle};
