//! Application state: the explicit context object shared by both front ends

use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use walkdir::WalkDir;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::generation::AnswerGenerator;
use crate::ingestion::IngestPipeline;
use crate::providers::{EmbeddingProvider, LlmProvider, OllamaClient, VectorStoreProvider};
use crate::retrieval::{Retriever, VectorStore};
use crate::types::{
    response::{AskResponse, DocumentSummary, UploadResponse},
    Chunk, Document,
};

/// Shared application state. Constructed once at startup; the vector store
/// is fully loaded or built before this constructor returns, so a state in
/// hand means the service is ready.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Vector store (concrete handle, for document bookkeeping + persistence)
    store: Arc<VectorStore>,
    /// Embedding provider
    embedder: Arc<dyn EmbeddingProvider>,
    /// Retriever with the fixed query policy
    retriever: Retriever,
    /// Answer generator
    generator: AnswerGenerator,
    /// Parse + chunk pipeline
    pipeline: IngestPipeline,
    /// Serializes store mutation + persistence across uploads
    upload_lock: Mutex<()>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create the application state with the default Ollama backend.
    pub async fn new(config: RagConfig) -> Result<Self> {
        let ollama = Arc::new(OllamaClient::new(&config.llm)?);

        if !ollama.health_check().await {
            tracing::warn!(
                "Ollama not reachable at {} - embedding and generation will fail until it is up",
                config.llm.base_url
            );
        }

        let embedder: Arc<dyn EmbeddingProvider> = ollama.clone();
        let llm: Arc<dyn LlmProvider> = ollama;
        Self::with_providers(config, embedder, llm).await
    }

    /// Create the application state with explicit providers. This is the
    /// injection seam used by tests and alternative backends.
    pub async fn with_providers(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        let pipeline = IngestPipeline::new(&config.chunking);

        // Store initialization policy: load the persisted store when one
        // exists, otherwise build it from the ingestion folder. Failures here
        // are fatal - there is no valid state to serve from.
        let store = match VectorStore::open(&config.storage.store_path)? {
            Some(store) => Arc::new(store),
            None => {
                tracing::info!(
                    "No persisted store at {}, building from {}",
                    config.storage.store_path.display(),
                    config.storage.pdf_dir.display()
                );
                Arc::new(build_store(&config, &pipeline, embedder.as_ref()).await?)
            }
        };

        let retriever = Retriever::new(
            Arc::clone(&store) as Arc<dyn VectorStoreProvider>,
            Arc::clone(&embedder),
            config.retrieval.top_k,
        );
        let generator = AnswerGenerator::new(llm);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                embedder,
                retriever,
                generator,
                pipeline,
                upload_lock: Mutex::new(()),
                ready: RwLock::new(true),
            }),
        })
    }

    /// Answer a question: retrieve top-k context, then generate.
    pub async fn ask(&self, question: &str) -> Result<AskResponse> {
        let results = self.inner.retriever.retrieve(question).await?;
        let answer = self.inner.generator.answer(question, &results).await?;

        Ok(AskResponse {
            question: question.to_string(),
            answer,
        })
    }

    /// Ingest one uploaded PDF: persist the file into the ingestion folder,
    /// chunk, embed, add to the store, and persist the store.
    ///
    /// Uploads are serialized against each other; `ask` requests keep
    /// running concurrently against the store.
    pub async fn upload(&self, filename: &str, data: &[u8]) -> Result<UploadResponse> {
        let filename = sanitize_filename(filename)?;
        let _guard = self.inner.upload_lock.lock().await;
        let store = &self.inner.store;

        let (doc, mut chunks) = self.inner.pipeline.ingest(&filename, data)?;

        // Identical content is skipped; same filename with different content
        // replaces the previous version (old chunks removed first).
        if let Some(existing) = store.find_document_by_hash(&doc.content_hash) {
            tracing::info!(
                "Skipping '{}': identical content already ingested as '{}'",
                filename,
                existing.filename
            );
            return Ok(UploadResponse {
                message: format!("{} is already in the database.", filename),
            });
        }
        if let Some(existing) = store.find_document_by_filename(&filename) {
            let removed = store.remove_document(&existing.id);
            tracing::info!("Replacing '{}', dropped {} old chunks", filename, removed);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.inner.embedder.embed_batch(&texts).await?;
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        std::fs::create_dir_all(&self.inner.config.storage.pdf_dir)?;
        std::fs::write(self.inner.config.storage.pdf_dir.join(&filename), data)?;

        let chunk_count = chunks.len();
        for chunk in chunks {
            store.insert(chunk)?;
        }
        store.add_document(doc);
        store.persist()?;

        tracing::info!("Ingested '{}': {} chunks", filename, chunk_count);

        Ok(UploadResponse {
            message: format!("{} uploaded and added to database successfully.", filename),
        })
    }

    /// Summaries of all ingested documents.
    pub fn list_documents(&self) -> Vec<DocumentSummary> {
        self.inner
            .store
            .documents()
            .iter()
            .map(DocumentSummary::from)
            .collect()
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Check if the service is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }
}

/// Build a fresh store by scanning the ingestion folder for PDFs.
async fn build_store(
    config: &RagConfig,
    pipeline: &IngestPipeline,
    embedder: &dyn EmbeddingProvider,
) -> Result<VectorStore> {
    std::fs::create_dir_all(&config.storage.pdf_dir)?;
    let store = VectorStore::create(&config.storage.store_path);

    for entry in WalkDir::new(&config.storage.pdf_dir)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !has_pdf_extension(path) {
            continue;
        }

        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        tracing::info!("Indexing {}", path.display());

        let data = std::fs::read(path)
            .map_err(|e| Error::load(&filename, format!("cannot read file: {}", e)))?;
        let (doc, chunks) = pipeline.ingest(&filename, &data)?;

        ingest_chunks(&store, doc, chunks, embedder).await?;
    }

    store.persist()?;
    tracing::info!(
        "Built vector store with {} chunks from {} document(s)",
        store.chunk_count(),
        store.documents().len()
    );

    Ok(store)
}

/// Embed and insert one document's chunks, then register the document.
async fn ingest_chunks(
    store: &VectorStore,
    doc: Document,
    mut chunks: Vec<Chunk>,
    embedder: &dyn EmbeddingProvider,
) -> Result<()> {
    let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    let embeddings = embedder.embed_batch(&texts).await?;
    for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
        chunk.embedding = embedding;
    }

    for chunk in chunks {
        store.insert(chunk)?;
    }
    store.add_document(doc);
    Ok(())
}

/// Keep only the final path component of an uploaded filename.
fn sanitize_filename(filename: &str) -> Result<String> {
    Path::new(filename)
        .file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::load(filename, "invalid filename"))
}

/// Case-insensitive `.pdf` extension check.
fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::NOT_ENOUGH_CONTEXT;
    use crate::types::PageRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic content-based embedding (ascii letter/digit frequency).
    struct CharFreqEmbedder;

    #[async_trait]
    impl EmbeddingProvider for CharFreqEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let mut v = vec![0.0f32; 27];
            for ch in text.to_lowercase().chars() {
                if ch.is_ascii_lowercase() {
                    v[(ch as u8 - b'a') as usize] += 1.0;
                } else if ch.is_ascii_digit() {
                    v[26] += 1.0;
                }
            }
            Ok(v)
        }

        fn name(&self) -> &str {
            "char-freq"
        }
    }

    /// Stub model echoing recognized keywords from its prompt.
    struct KeywordEchoLlm {
        keywords: Vec<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for KeywordEchoLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let found: Vec<&str> = self
                .keywords
                .iter()
                .copied()
                .filter(|k| prompt.contains(k))
                .collect();
            Ok(format!("Payment is due {}.", found.join(", ")))
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "keyword-echo"
        }
    }

    fn test_config(dir: &Path) -> RagConfig {
        let mut config = RagConfig::default();
        config.storage.store_path = dir.join("store/index.json");
        config.storage.pdf_dir = dir.join("data");
        config
    }

    async fn test_state(dir: &Path) -> (AppState, Arc<KeywordEchoLlm>) {
        let llm = Arc::new(KeywordEchoLlm {
            keywords: vec!["net-30", "net-60"],
            calls: AtomicUsize::new(0),
        });
        let state = AppState::with_providers(
            test_config(dir),
            Arc::new(CharFreqEmbedder),
            llm.clone() as Arc<dyn LlmProvider>,
        )
        .await
        .unwrap();
        (state, llm)
    }

    /// Feed extracted pages through the real pipeline, bypassing the PDF
    /// parser so tests do not depend on handcrafted PDF bytes.
    async fn ingest_text(state: &AppState, filename: &str, text: &str) {
        let pages = vec![PageRecord {
            page_number: 1,
            content: text.to_string(),
        }];
        let (doc, chunks) = state
            .inner
            .pipeline
            .ingest_pages(filename, text.len() as u64, pages)
            .unwrap();
        ingest_chunks(&state.inner.store, doc, chunks, state.inner.embedder.as_ref())
            .await
            .unwrap();
        state.inner.store.persist().unwrap();
    }

    #[tokio::test]
    async fn fresh_empty_store_falls_back_without_model_call() {
        let dir = tempfile::tempdir().unwrap();
        let (state, llm) = test_state(dir.path()).await;

        let response = state.ask("What are the payment terms?").await.unwrap();
        assert_eq!(response.answer, NOT_ENOUGH_CONTEXT);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);

        // empty question is still embedded and retrieved, not special-cased
        let response = state.ask("").await.unwrap();
        assert_eq!(response.question, "");
        assert_eq!(response.answer, NOT_ENOUGH_CONTEXT);
    }

    #[tokio::test]
    async fn ingest_then_ask_references_document_content() {
        let dir = tempfile::tempdir().unwrap();
        let (state, llm) = test_state(dir.path()).await;

        ingest_text(
            &state,
            "invoice.pdf",
            "Total due: $450, payment terms net-30.",
        )
        .await;

        let response = state.ask("What are the payment terms?").await.unwrap();
        assert!(response.answer.contains("net-30"));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.list_documents().len(), 1);
    }

    #[tokio::test]
    async fn restart_reloads_persisted_store_with_same_results() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _) = test_state(dir.path()).await;
        ingest_text(
            &state,
            "invoice.pdf",
            "Total due: $450, payment terms net-30.",
        )
        .await;
        let before = state.ask("What are the payment terms?").await.unwrap();
        drop(state);

        // second state loads the persisted store instead of rebuilding
        let (reloaded, _) = test_state(dir.path()).await;
        assert_eq!(reloaded.list_documents().len(), 1);
        let after = reloaded.ask("What are the payment terms?").await.unwrap();
        assert_eq!(before.answer, after.answer);
    }

    #[test]
    fn filenames_are_reduced_to_their_last_component() {
        assert_eq!(
            sanitize_filename("../../etc/passwd.pdf").unwrap(),
            "passwd.pdf"
        );
        assert_eq!(sanitize_filename("report.pdf").unwrap(), "report.pdf");
        assert!(sanitize_filename("").is_err());
    }
}
