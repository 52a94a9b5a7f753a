use crate::error::{ChatError, Result};
use lopdf::Document;
use std::path::Path;
use tracing::{debug, warn};

/// Text pulled out of a PDF, ready to attach to a session.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub name: String,
    pub text: String,
    pub pages: usize,
}

/// Extract the text of every page, in page order.
///
/// Pages that fail to extract are skipped with a warning. Anything without
/// a `.pdf` extension is rejected before it is opened.
pub fn extract_pdf(path: &Path) -> Result<ExtractedDocument> {
    let name = pdf_file_name(path)?;

    let doc = Document::load(path)?;
    let pages = doc.get_pages();

    let text = pages
        .keys()
        .filter_map(|page_num| match doc.extract_text(&[*page_num]) {
            Ok(page_text) => Some(page_text.trim_end().to_string()),
            Err(e) => {
                warn!("Failed to extract text from page {}: {}", page_num, e);
                None
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    debug!("extracted {} chars from {} ({} pages)", text.len(), name, pages.len());

    Ok(ExtractedDocument {
        name,
        text,
        pages: pages.len(),
    })
}

fn pdf_file_name(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    let name = path.file_name().and_then(|n| n.to_str());
    match name {
        Some(name) if is_pdf => Ok(name.to_string()),
        _ => Err(ChatError::InvalidDocument(
            "Please upload a valid PDF file.".to_string(),
        )),
    }
}
