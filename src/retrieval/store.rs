//! On-disk vector store with exact cosine search
//!
//! A deliberately simple store: chunks and their embeddings live in memory,
//! queries are an exact scan over all stored vectors, and persistence is one
//! JSON file written atomically. The store is append-oriented — chunks are
//! only ever added or removed wholesale per document, never mutated.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::providers::vector_store::{VectorSearchResult, VectorStoreProvider};
use crate::types::{Chunk, Document};

/// Persisted file layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    documents: Vec<Document>,
    chunks: Vec<Chunk>,
}

/// Vector store over one JSON file
pub struct VectorStore {
    /// Persistence location
    path: PathBuf,
    inner: RwLock<StoreFile>,
}

impl VectorStore {
    /// Load a persisted store if one exists at `path`.
    ///
    /// Returns `Ok(None)` when no file is present; a present-but-unreadable
    /// file is a [`Error::Store`] since silently rebuilding would drop data.
    pub fn open(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::store(format!("cannot read '{}': {}", path.display(), e)))?;
        let inner: StoreFile = serde_json::from_str(&raw)
            .map_err(|e| Error::store(format!("corrupt store file '{}': {}", path.display(), e)))?;

        tracing::info!(
            "Loaded vector store from {} ({} documents, {} chunks)",
            path.display(),
            inner.documents.len(),
            inner.chunks.len()
        );

        Ok(Some(Self {
            path: path.to_path_buf(),
            inner: RwLock::new(inner),
        }))
    }

    /// Create a new empty store that will persist to `path`.
    pub fn create(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            inner: RwLock::new(StoreFile::default()),
        }
    }

    /// Register a document record.
    pub fn add_document(&self, doc: Document) {
        self.inner.write().documents.push(doc);
    }

    /// All registered documents.
    pub fn documents(&self) -> Vec<Document> {
        self.inner.read().documents.clone()
    }

    /// Look up a document by filename.
    pub fn find_document_by_filename(&self, filename: &str) -> Option<Document> {
        self.inner
            .read()
            .documents
            .iter()
            .find(|d| d.filename == filename)
            .cloned()
    }

    /// Look up a document by content hash.
    pub fn find_document_by_hash(&self, content_hash: &str) -> Option<Document> {
        self.inner
            .read()
            .documents
            .iter()
            .find(|d| d.content_hash == content_hash)
            .cloned()
    }

    /// Insert a chunk. The chunk must already carry its embedding.
    pub fn insert(&self, chunk: Chunk) -> Result<()> {
        if chunk.embedding.is_empty() {
            return Err(Error::store("chunk has no embedding"));
        }
        self.inner.write().chunks.push(chunk);
        Ok(())
    }

    /// Exact top-k cosine search over all stored vectors.
    pub fn query(&self, query_embedding: &[f32], top_k: usize) -> Vec<VectorSearchResult> {
        let inner = self.inner.read();

        let mut results: Vec<VectorSearchResult> = inner
            .chunks
            .iter()
            .map(|chunk| VectorSearchResult {
                similarity: cosine_similarity(query_embedding, &chunk.embedding),
                chunk: chunk.clone(),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }

    /// Remove a document and all of its chunks.
    pub fn remove_document(&self, document_id: &Uuid) -> usize {
        let mut inner = self.inner.write();
        let before = inner.chunks.len();
        inner.chunks.retain(|c| c.document_id != *document_id);
        inner.documents.retain(|d| d.id != *document_id);
        before - inner.chunks.len()
    }

    /// Number of stored chunks.
    pub fn chunk_count(&self) -> usize {
        self.inner.read().chunks.len()
    }

    /// Write the store to disk atomically (temp file + rename), so a crash
    /// mid-write never leaves a half-written store behind.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let serialized = {
            let inner = self.inner.read();
            serde_json::to_string(&*inner)?
        };

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, serialized)
            .map_err(|e| Error::store(format!("cannot write '{}': {}", tmp_path.display(), e)))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| Error::store(format!("cannot persist '{}': {}", self.path.display(), e)))?;

        tracing::debug!("Persisted vector store to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl VectorStoreProvider for VectorStore {
    async fn insert_chunk(&self, chunk: &Chunk) -> Result<()> {
        self.insert(chunk.clone())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<VectorSearchResult>> {
        Ok(self.query(query_embedding, top_k))
    }

    async fn delete_by_document(&self, document_id: &Uuid) -> Result<usize> {
        Ok(self.remove_document(document_id))
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.chunk_count())
    }

    fn name(&self) -> &str {
        "json-store"
    }
}

/// Cosine similarity between two vectors; zero vectors score 0.0.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
