//! doc-rag: retrieval-augmented question answering over PDF documents
//!
//! This crate ingests PDF files, splits them into overlapping character
//! windows, embeds each window through an external embedding provider, and
//! stores the results in an on-disk vector store. Questions are answered by
//! retrieving the top-matching chunks and conditioning a language-model call
//! on them. Two front ends share the same core: an HTTP API and an
//! interactive console loop.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, Document, PageRecord},
    response::{AskResponse, DocumentSummary, UploadResponse},
};
