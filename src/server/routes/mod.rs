//! HTTP routes

pub mod ask;
pub mod documents;
pub mod upload;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Json, Router};

use crate::server::state::AppState;

/// Build all routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/ask", post(ask::ask))
        .route(
            "/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/documents", get(documents::list_documents))
}

/// GET / - service banner
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "RAG API is running. Use POST /ask for queries or POST /upload to upload PDFs."
    }))
}
