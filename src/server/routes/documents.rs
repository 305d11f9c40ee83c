//! Document listing endpoint

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::DocumentSummary;

/// GET /documents - summaries of all ingested documents
pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<DocumentSummary>> {
    Json(state.list_documents())
}
