//! Word document decoding backed by `docx-rs`.

use std::path::Path;

use super::DocumentDecoder;
use crate::types::ExtractError;

/// Decodes Word documents by walking the document body and collecting
/// paragraph and table text. Legacy binary `.doc` payloads fail the parse and
/// take the caller's placeholder path.
pub struct DocxDecoder;

impl DocumentDecoder for DocxDecoder {
    fn decode(&self, _path: &Path, bytes: &[u8]) -> Result<String, ExtractError> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ExtractError::Decode(format!("docx parse failed: {e:?}")))?;

        let mut blocks = Vec::new();

        for child in docx.document.children {
            if let docx_rs::DocumentChild::Paragraph(para) = child {
                let text = paragraph_text(&para);
                if !text.is_empty() {
                    blocks.push(text);
                }
            } else if let docx_rs::DocumentChild::Table(table) = child {
                let text = table_text(&table);
                if !text.is_empty() {
                    blocks.push(text);
                }
            }
        }

        if blocks.is_empty() {
            return Err(ExtractError::Decode("document body is empty".into()));
        }

        Ok(blocks.join("\n"))
    }
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }

    text
}

/// Rows joined by newlines, cells by tabs.
fn table_text(table: &docx_rs::Table) -> String {
    let mut rows = Vec::new();

    for row in &table.rows {
        let docx_rs::TableChild::TableRow(tr) = row;
        let mut cells = Vec::new();
        for cell in &tr.cells {
            let docx_rs::TableRowChild::TableCell(tc) = cell;
            let mut cell_text = String::new();
            for child in &tc.children {
                if let docx_rs::TableCellContent::Paragraph(para) = child {
                    cell_text.push_str(&paragraph_text(para));
                }
            }
            cells.push(cell_text);
        }
        if cells.iter().any(|c| !c.is_empty()) {
            rows.push(cells.join("\t"));
        }
    }

    rows.join("\n")
}
