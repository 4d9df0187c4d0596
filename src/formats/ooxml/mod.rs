//! OOXML-lite format support (encode only)
//!
//! Emits a minimal WordprocessingML body: one `w:p` per block with `w:r`
//! runs, `w:tbl` tables with a bordered grid style. This is a valid subset,
//! not full OOXML fidelity; word-processor uploads come back in through the
//! legacy normalizer rather than by parsing this output.

pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Document;

pub struct OoxmlFormat;

impl Format for OoxmlFormat {
    fn name(&self) -> &str {
        "ooxml"
    }

    fn description(&self) -> &str {
        "WordprocessingML body subset"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_ooxml(doc))
    }
}
