//! Vector storage and fixed-policy retrieval

mod retriever;
mod store;

pub use retriever::Retriever;
pub use store::VectorStore;
