//! Per-file processing: settle, extract, display, print, archive.

use std::path::Path;

use tracing::{error, warn};

use crate::archive::Archiver;
use crate::config::Config;
use crate::extract::ContentExtractor;
use crate::printer::PrintService;
use crate::types::{ExtractedDocument, PrintMode};

/// Run the full pipeline for one newly arrived file.
///
/// Every failure is terminal for this file only and is handled here; the
/// dispatcher is never affected.
pub async fn process_file(
    config: &Config,
    extractor: &ContentExtractor,
    printer: &PrintService,
    archiver: &Archiver,
    path: &Path,
    file_name: &str,
) {
    // Give the writer a moment to finish before reading. Best effort only.
    tokio::time::sleep(config.timing.settle_delay()).await;

    let document = match extractor.extract(path).await {
        Ok(document) => document,
        Err(e) => {
            error!("Failed to read {}: {e}", path.display());
            return;
        }
    };

    display(file_name, path, &document);

    if config.printing.enabled {
        let result = match document.print_mode {
            PrintMode::Skip => Ok(()),
            PrintMode::OriginalDocument => printer.print_document(path).await,
            PrintMode::Text => printer.print_text(file_name, &document.text).await,
        };
        if let Err(e) = result {
            warn!("Print failed for {file_name}: {e}");
        }
    }

    if let Err(e) = archiver.archive(path, file_name) {
        error!("Failed to archive {file_name}: {e}");
    }
}

/// Operator-facing result block. This is the product output, printed to
/// stdout rather than the diagnostic log.
fn display(file_name: &str, path: &Path, document: &ExtractedDocument) {
    println!();
    println!("==============================================================");
    println!("File:  {file_name}");
    println!("Path:  {}", path.display());
    println!("Size:  {} bytes", document.byte_size);
    println!("--------------------------------------------------------------");
    println!("{}", document.text);
    println!("==============================================================");
}
