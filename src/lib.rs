//! Hotfolder - intake directory daemon
//!
//! Watches a directory for newly created files, extracts and displays their
//! contents (format-specific handling for plain text, Word documents, and
//! PDFs), optionally routes them to a printer, and relocates them to an
//! archive folder with collision-safe renaming.
//!
//! # Architecture
//!
//! A single dispatch task consumes filesystem notifications and gates them
//! through an in-memory known-file registry; each accepted file is processed
//! by its own spawned task (settle, extract, display, print, archive), so
//! pipelines for different files may overlap while dispatch stays ordered.

pub mod archive;
pub mod config;
pub mod extract;
pub mod pipeline;
pub mod printer;
pub mod types;
pub mod watcher;

// Re-export commonly used types
pub use archive::Archiver;
pub use config::{CliOverrides, Config};
pub use extract::{ContentExtractor, Decoder, DocumentDecoder};
pub use printer::PrintService;
pub use types::{ExtractError, ExtractedDocument, FileCategory, PrintError, PrintMode};
pub use watcher::FolderWatcher;
