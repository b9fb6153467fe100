//! Content extraction for intake files.
//!
//! Routes files by extension to the Word and PDF decoders and falls back to a
//! raw UTF-8 read for everything else. Decoders are modeled as capabilities:
//! a missing or failing backend degrades to a placeholder description of the
//! file instead of failing the pipeline.

pub mod pdf;
pub mod word;

use std::path::Path;
use tracing::debug;

use crate::types::{ExtractError, ExtractedDocument, FileCategory, PrintMode};

/// A format-specific text decoder.
pub trait DocumentDecoder: Send + Sync {
    /// Decode the raw file bytes into plain text.
    fn decode(&self, path: &Path, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Decoder capability. `Unavailable` keeps the pipeline functional when a
/// backend is missing; extraction degrades to placeholder text.
pub enum Decoder {
    Available(Box<dyn DocumentDecoder>),
    Unavailable,
}

impl Decoder {
    fn decode(&self, path: &Path, bytes: &[u8]) -> Result<String, ExtractError> {
        match self {
            Decoder::Available(decoder) => decoder.decode(path, bytes),
            Decoder::Unavailable => Err(ExtractError::Decode("no decoder backend".into())),
        }
    }
}

/// Extracts a textual representation of incoming files.
pub struct ContentExtractor {
    word: Decoder,
    pdf: Decoder,
}

impl ContentExtractor {
    /// Extractor with both decoder backends wired up.
    pub fn new() -> Self {
        Self {
            word: Decoder::Available(Box::new(word::DocxDecoder)),
            pdf: Decoder::Available(Box::new(pdf::PdfTextDecoder)),
        }
    }

    /// Extractor with explicit decoder capabilities.
    pub fn with_decoders(word: Decoder, pdf: Decoder) -> Self {
        Self { word, pdf }
    }

    /// Extract content from `path`.
    ///
    /// Only the initial read can fail; decode failures degrade to a
    /// placeholder description carrying the file size.
    pub async fn extract(&self, path: &Path) -> Result<ExtractedDocument, ExtractError> {
        let bytes = tokio::fs::read(path).await?;
        let byte_size = bytes.len() as u64;

        let category = FileCategory::from_path(path);
        debug!("Extracting {} as {}", path.display(), category.as_str());

        let document = match category {
            FileCategory::Word => match self.word.decode(path, &bytes) {
                Ok(text) => ExtractedDocument {
                    text,
                    byte_size,
                    print_mode: PrintMode::Text,
                },
                Err(e) => {
                    debug!("Word decode failed for {}: {e}", path.display());
                    ExtractedDocument {
                        text: format!("[Word document - {byte_size} bytes, text could not be extracted]"),
                        byte_size,
                        print_mode: PrintMode::Skip,
                    }
                }
            },
            FileCategory::Pdf => {
                let text = match self.pdf.decode(path, &bytes) {
                    Ok(text) => text,
                    Err(e) => {
                        debug!("PDF decode failed for {}: {e}", path.display());
                        format!("[PDF document - {byte_size} bytes, text could not be extracted]")
                    }
                };
                // PDFs go to the spooler as-is, whether or not text decoding
                // worked.
                ExtractedDocument {
                    text,
                    byte_size,
                    print_mode: PrintMode::OriginalDocument,
                }
            }
            FileCategory::Generic => match String::from_utf8(bytes) {
                Ok(text) => ExtractedDocument {
                    text,
                    byte_size,
                    print_mode: PrintMode::Text,
                },
                Err(_) => ExtractedDocument {
                    text: format!("[binary content - {byte_size} bytes]"),
                    byte_size,
                    print_mode: PrintMode::Skip,
                },
            },
        };

        Ok(document)
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}
