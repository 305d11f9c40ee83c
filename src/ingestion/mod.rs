//! Document ingestion: PDF loading, chunking, pipeline orchestration

mod chunker;
mod loader;
mod pipeline;

pub use chunker::WindowChunker;
pub use loader::PdfLoader;
pub use pipeline::IngestPipeline;
