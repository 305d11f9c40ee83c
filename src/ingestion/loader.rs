//! PDF loading with page-level text extraction

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::PageRecord;

/// Loads PDF files into ordered page records
pub struct PdfLoader;

impl PdfLoader {
    /// Load a PDF from raw bytes, producing one record per page in order.
    ///
    /// Fails with [`Error::Load`] when the bytes are not a valid PDF or no
    /// text can be extracted at all.
    pub fn load(filename: &str, data: &[u8]) -> Result<Vec<PageRecord>> {
        // Validate the document structure first; pdf-extract's errors for
        // non-PDF input are less direct than lopdf's.
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::load(filename, format!("not a valid PDF: {}", e)))?;
        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(Error::load(filename, "PDF has no pages"));
        }

        let raw_pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| Error::load(filename, format!("text extraction failed: {}", e)))?;

        let pages: Vec<PageRecord> = raw_pages
            .into_iter()
            .enumerate()
            .map(|(i, content)| PageRecord {
                page_number: i as u32 + 1,
                content: normalize_page_text(&content),
            })
            .collect();

        if pages.iter().all(|p| p.content.is_empty()) {
            return Err(Error::load(
                filename,
                "no text content could be extracted (scanned or image-only PDF?)",
            ));
        }

        Ok(pages)
    }

    /// Load a PDF from disk.
    pub fn load_path(path: &Path) -> Result<Vec<PageRecord>> {
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let data = std::fs::read(path)
            .map_err(|e| Error::load(&filename, format!("cannot read file: {}", e)))?;

        Self::load(&filename, &data)
    }
}

/// Strip null bytes and collapse the whitespace noise PDF extraction leaves
/// behind, keeping one line per extracted text line.
fn normalize_page_text(text: &str) -> String {
    text.replace('\0', "")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_bytes() {
        let err = PdfLoader::load("notes.pdf", b"this is not a pdf").unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert!(err.to_string().contains("notes.pdf"));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = PdfLoader::load_path(Path::new("/nonexistent/dir/report.pdf")).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn normalization_drops_blank_lines_and_nulls() {
        let text = "  Total due: $450  \n\n\0\n  payment terms net-30  \n";
        assert_eq!(
            normalize_page_text(text),
            "Total due: $450\npayment terms net-30"
        );
    }
}
