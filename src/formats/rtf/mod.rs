//! RTF format support
//!
//! RTF is a brace-delimited control-word language, so decoding is split into
//! a lexer (braces, control words, escapes) and a group-aware parser that
//! keeps a formatting-state stack. Single-pass regex substitution cannot
//! handle nested groups and is deliberately not used here.

pub mod lexer;
pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::model::Document;
use std::collections::HashMap;

pub struct RtfFormat;

impl Format for RtfFormat {
    fn name(&self) -> &str {
        "rtf"
    }

    fn description(&self) -> &str {
        "Rich Text Format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rtf"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_from_rtf(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_rtf(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        if options.is_empty() {
            // RTF consumers expect application/rtf bytes.
            Ok(SerializedDocument::Binary(
                serializer::serialize_to_rtf(doc).into_bytes(),
            ))
        } else {
            Err(FormatError::NotSupported(
                "Format 'rtf' does not support extra parameters".to_string(),
            ))
        }
    }
}
