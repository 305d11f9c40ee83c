//! Document, page, and chunk types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A PDF document that has been ingested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Original filename as uploaded or found on disk
    pub filename: String,
    /// SHA-256 hex digest of the extracted text, for deduplication
    pub content_hash: String,
    /// Number of pages in the source PDF
    pub total_pages: u32,
    /// Number of chunks created from this document
    pub total_chunks: u32,
    /// File size in bytes
    pub file_size: u64,
    /// Ingestion timestamp
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document record
    pub fn new(filename: String, content_hash: String, total_pages: u32, file_size: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            content_hash,
            total_pages,
            total_chunks: 0,
            file_size,
            ingested_at: chrono::Utc::now(),
        }
    }
}

/// Text extracted from a single PDF page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Text content of the page
    pub content: String,
}

/// A contiguous text window cut from a document, the atomic unit of
/// embedding and retrieval. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Parent document ID
    pub document_id: Uuid,
    /// Source filename, kept on the chunk so results map back to their
    /// document without a registry lookup
    pub filename: String,
    /// Window text
    pub content: String,
    /// Embedding vector
    #[serde(default)]
    pub embedding: Vec<f32>,
    /// Page containing the first character of the window
    pub page_number: u32,
    /// Character offsets into the concatenated document text
    pub char_start: usize,
    pub char_end: usize,
    /// Window index within the document
    pub chunk_index: u32,
}

impl Chunk {
    /// Create a new chunk without an embedding
    pub fn new(
        document_id: Uuid,
        filename: String,
        content: String,
        page_number: u32,
        char_start: usize,
        char_end: usize,
        chunk_index: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            filename,
            content,
            embedding: Vec::new(),
            page_number,
            char_start,
            char_end,
            chunk_index,
        }
    }
}
