//! Ingestion pipeline orchestration

use sha2::{Digest, Sha256};

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::{Chunk, Document, PageRecord};

use super::chunker::WindowChunker;
use super::loader::PdfLoader;

/// Parse + chunk pipeline. Embedding and store insertion happen at the
/// service boundary so this stage stays synchronous and side-effect free.
pub struct IngestPipeline {
    chunker: WindowChunker,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            chunker: WindowChunker::from_config(config),
        }
    }

    /// Full ingestion of one PDF: load pages, hash content, cut windows.
    pub fn ingest(&self, filename: &str, data: &[u8]) -> Result<(Document, Vec<Chunk>)> {
        let pages = PdfLoader::load(filename, data)?;
        self.ingest_pages(filename, data.len() as u64, pages)
    }

    /// Chunk pages that were already extracted.
    pub fn ingest_pages(
        &self,
        filename: &str,
        file_size: u64,
        pages: Vec<PageRecord>,
    ) -> Result<(Document, Vec<Chunk>)> {
        let content_hash = hash_pages(&pages);

        let mut doc = Document::new(
            filename.to_string(),
            content_hash,
            pages.len() as u32,
            file_size,
        );

        let chunks = self.chunker.chunk(&doc, &pages);
        doc.total_chunks = chunks.len() as u32;

        Ok((doc, chunks))
    }
}

/// Hash the extracted page text for deduplication.
fn hash_pages(pages: &[PageRecord]) -> String {
    let mut hasher = Sha256::new();
    for page in pages {
        hasher.update(page.content.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<PageRecord> {
        vec![
            PageRecord {
                page_number: 1,
                content: "Total due: $450, payment terms net-30.".to_string(),
            },
            PageRecord {
                page_number: 2,
                content: "Late payments accrue 1.5% monthly interest.".to_string(),
            },
        ]
    }

    #[test]
    fn ingest_pages_builds_document_and_chunks() {
        let pipeline = IngestPipeline::new(&ChunkingConfig::default());
        let (doc, chunks) = pipeline
            .ingest_pages("invoice.pdf", 1024, pages())
            .unwrap();

        assert_eq!(doc.filename, "invoice.pdf");
        assert_eq!(doc.total_pages, 2);
        assert_eq!(doc.total_chunks, chunks.len() as u32);
        assert!(chunks.iter().all(|c| c.document_id == doc.id));
    }

    #[test]
    fn content_hash_is_stable_and_page_sensitive() {
        let a = hash_pages(&pages());
        let b = hash_pages(&pages());
        assert_eq!(a, b);

        let mut moved = pages();
        moved[0].content.push('x');
        assert_ne!(a, hash_pages(&moved));
    }
}
