//! Shared data types

pub mod document;
pub mod response;

pub use document::{Chunk, Document, PageRecord};
pub use response::{AskResponse, DocumentSummary, UploadResponse};
