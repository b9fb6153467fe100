//! PDF text decoding backed by `pdf-extract`.

use std::path::Path;

use super::DocumentDecoder;
use crate::types::ExtractError;

/// Decodes PDF bytes into plain text. Encrypted or malformed files fail the
/// parse and take the caller's placeholder path.
pub struct PdfTextDecoder;

impl DocumentDecoder for PdfTextDecoder {
    fn decode(&self, _path: &Path, bytes: &[u8]) -> Result<String, ExtractError> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Decode(format!("pdf parse failed: {e}")))
    }
}
