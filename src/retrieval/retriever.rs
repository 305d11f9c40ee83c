//! Fixed-policy retrieval: embed the question, take the top-k most similar

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{EmbeddingProvider, VectorSearchResult, VectorStoreProvider};

/// Wraps the vector store with the query policy: plain similarity search,
/// fixed `top_k`, no re-ranking, no filtering.
pub struct Retriever {
    store: Arc<dyn VectorStoreProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(
        store: Arc<dyn VectorStoreProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            store,
            embedder,
            top_k,
        }
    }

    /// Retrieve up to `top_k` chunks ranked by similarity to the question.
    ///
    /// An empty store yields `Ok(vec![])`, never an error — callers surface
    /// that as the "not enough context" case.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<VectorSearchResult>> {
        let query_embedding = self.embedder.embed(question).await?;
        let results = self.store.search(&query_embedding, self.top_k).await?;

        tracing::debug!(
            "Retrieved {} chunk(s) for question ({} chars)",
            results.len(),
            question.len()
        );

        Ok(results)
    }
}
