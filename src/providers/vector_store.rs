//! Vector store provider trait

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::Chunk;

/// Search result from the vector store
#[derive(Debug, Clone)]
pub struct VectorSearchResult {
    /// The matched chunk
    pub chunk: Chunk,
    /// Cosine similarity (higher is more similar)
    pub similarity: f32,
}

/// Trait for vector storage and nearest-neighbor search
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Insert a chunk with its embedding
    async fn insert_chunk(&self, chunk: &Chunk) -> Result<()>;

    /// Insert multiple chunks (batch)
    async fn insert_chunks(&self, chunks: &[Chunk]) -> Result<()> {
        for chunk in chunks {
            self.insert_chunk(chunk).await?;
        }
        Ok(())
    }

    /// Search for the `top_k` chunks most similar to the query embedding,
    /// ordered by descending similarity. An empty store yields an empty list.
    async fn search(&self, query_embedding: &[f32], top_k: usize)
        -> Result<Vec<VectorSearchResult>>;

    /// Delete all chunks belonging to a document, returning how many went
    async fn delete_by_document(&self, document_id: &Uuid) -> Result<usize>;

    /// Total number of stored vectors
    async fn len(&self) -> Result<usize>;

    /// Whether the store holds no vectors
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Provider name for logging
    fn name(&self) -> &str;
}
