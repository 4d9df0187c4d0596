//! HTML format tests
//!
//! Tests for bidirectional HTML ⇄ Document conversion.

mod export;
