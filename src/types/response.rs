//! Response types for the HTTP API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::Document;

/// Response from `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The question as submitted
    pub question: String,
    /// Generated answer, or the fixed fallback when retrieval came up empty
    pub answer: String,
}

/// Response from `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Human-readable status line
    pub message: String,
}

/// One entry of `GET /documents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub filename: String,
    pub total_pages: u32,
    pub total_chunks: u32,
    pub file_size: u64,
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            total_pages: doc.total_pages,
            total_chunks: doc.total_chunks,
            file_size: doc.file_size,
            ingested_at: doc.ingested_at,
        }
    }
}
