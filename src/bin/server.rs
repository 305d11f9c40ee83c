//! RAG HTTP server binary
//!
//! Run with: cargo run --bin doc-rag-server

use doc_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::load(None)?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - LLM model: {}", config.llm.generate_model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - PDF folder: {}", config.storage.pdf_dir.display());

    // Fatal on store load/build failure - there is no valid fallback state.
    let server = RagServer::new(config).await?;

    println!("RAG server listening on http://{}", server.address());
    println!("  POST /ask       - ask a question");
    println!("  POST /upload    - upload a PDF");
    println!("  GET  /documents - list ingested documents");

    server.start().await?;

    Ok(())
}
