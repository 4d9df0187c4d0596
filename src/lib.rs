//! Format conversion for rich-text editor documents
//!
//!     This crate converts between a canonical in-memory document model and
//!     the external formats a rich-text editor deals with: HTML (the live
//!     editor surface), Markdown, RTF, a minimal WordprocessingML body, and
//!     legacy word-processor uploads.
//!
//! Architecture
//!
//!     Everything meets in the middle: decoders produce a Document, encoders
//!     consume one, and no format ever talks to another format directly.
//!     The model (./model/nodes.rs) is deliberately flat - blocks of styled
//!     inline runs - because that is the shape editors actually emit, and a
//!     flat run list makes run merging and idempotent re-encoding cheap.
//!
//!     This is a pure lib. Conversions are synchronous, side-effect-free
//!     functions over immutable input; the single async boundary is
//!     acquiring upload bytes (./intake.rs), which implements latest-wins
//!     cancellation so a stale read never clobbers a newer one.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── intake.rs               # async source-byte acquisition
//!     ├── model                   # Document, Block, InlineRun + run helpers
//!     └── formats
//!         ├── html                # decode (html5ever) + encode (RcDom)
//!         ├── markdown            # decode (comrak) + encode (hand-rolled)
//!         ├── rtf                 # lexer + group parser + encoder
//!         ├── ooxml               # encode only
//!         └── legacy              # .doc/.docx/plain-text normalizer
//!
//! Error handling
//!
//!     Decoders are total: malformed bytes degrade to a best-effort partial
//!     Document instead of an error, because an editor always needs
//!     something to display after an upload. FormatError exists for registry
//!     misuse (unknown name, unsupported direction) and encoder internals.
//!
//! Library Choices
//!
//!     Parsing real formats is offloaded to the format's libraries: html5ever
//!     for HTML (a real tree builder repairs misnested tags for free) and
//!     comrak for Markdown. RTF has no suitable crate for this subset, so it
//!     gets a small lexer and group parser here. Encoders that must produce
//!     byte-stable output (Markdown, RTF, OOXML) are written by hand.

pub mod error;
pub mod format;
pub mod formats;
pub mod intake;
pub mod model;
pub mod registry;

pub use error::FormatError;
pub use format::{Format, SerializedDocument};
pub use intake::{IntakeError, SourceIntake};
pub use model::{Block, Cell, Document, InlineRun};
pub use registry::FormatRegistry;

/// Decode editor HTML into a document. Total over malformed markup.
pub fn decode_html(markup: &str) -> Document {
    formats::html::parser::parse_from_html(markup)
}

/// Encode a document as an HTML fragment for the live editor.
pub fn encode_html(doc: &Document) -> Result<String, FormatError> {
    formats::html::serializer::serialize_to_html(doc)
}

/// Decode Markdown into a document. Total over malformed input.
pub fn decode_markdown(source: &str) -> Document {
    formats::markdown::parser::parse_from_markdown(source)
}

/// Encode a document as Markdown with byte-stable output.
pub fn encode_markdown(doc: &Document) -> String {
    formats::markdown::serializer::serialize_to_markdown(doc)
}

/// Decode RTF bytes into a document. Invalid UTF-8 is replaced, unbalanced
/// braces truncate gracefully.
pub fn decode_rtf(bytes: &[u8]) -> Document {
    formats::rtf::parser::parse_from_rtf(&String::from_utf8_lossy(bytes))
}

/// Encode a document as RTF bytes (application/rtf).
pub fn encode_rtf(doc: &Document) -> Vec<u8> {
    formats::rtf::serializer::serialize_to_rtf(doc).into_bytes()
}

/// Encode a document as a minimal WordprocessingML body.
pub fn encode_ooxml_body(doc: &Document) -> String {
    formats::ooxml::serializer::serialize_to_ooxml(doc)
}

/// Normalize a legacy upload (renamed HTML, near-plain-text) into a
/// document. `declared_extension` is the upload's claimed extension
/// without the dot, e.g. "doc" or "txt".
pub fn normalize_legacy(bytes: &[u8], declared_extension: &str) -> Document {
    formats::legacy::normalize_legacy(&String::from_utf8_lossy(bytes), declared_extension)
}
