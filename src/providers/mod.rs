//! Provider abstractions for embeddings, LLM, and vector storage
//!
//! The embedding model, language model, and vector index are external
//! collaborators reached through these narrow traits; everything behind them
//! is replaceable, including by test doubles.

pub mod embedding;
pub mod llm;
pub mod ollama;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::OllamaClient;
pub use vector_store::{VectorSearchResult, VectorStoreProvider};
