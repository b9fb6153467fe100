//! Core types used throughout the intake pipeline.

use std::path::Path;

/// File extensions routed to the Word decoder
const WORD_EXTENSIONS: &[&str] = &["docx", "doc"];
/// File extensions routed to the PDF decoder
const PDF_EXTENSIONS: &[&str] = &["pdf"];

/// Format category of an incoming file, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// Word documents (.docx, .doc)
    Word,
    /// PDF documents
    Pdf,
    /// Everything else, read as raw bytes
    Generic,
}

impl FileCategory {
    /// Categorize a file by its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Self {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_ascii_lowercase(),
            None => return FileCategory::Generic,
        };

        if WORD_EXTENSIONS.contains(&ext.as_str()) {
            FileCategory::Word
        } else if PDF_EXTENSIONS.contains(&ext.as_str()) {
            FileCategory::Pdf
        } else {
            FileCategory::Generic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Word => "word",
            FileCategory::Pdf => "pdf",
            FileCategory::Generic => "generic",
        }
    }
}

/// How a processed file should be handed to the print spooler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// Print the extracted text, rendered to a temp file
    Text,
    /// Print the source file itself (PDFs)
    OriginalDocument,
    /// Nothing printable (undecodable binary content)
    Skip,
}

/// Result of content extraction for a single file. Consumed immediately by
/// the display and print stages, never retained.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Extracted text, or a placeholder description when decoding failed
    pub text: String,
    /// Size of the source file in bytes
    pub byte_size: u64,
    /// How the print stage should treat this file
    pub print_mode: PrintMode,
}

/// Errors raised while extracting content from a file
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while submitting a print job
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("print command failed: {0}")]
    Spooler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
