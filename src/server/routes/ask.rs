//! Question-answering endpoint

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::AskResponse;

/// Request body for `POST /ask`
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The question to answer
    pub query: String,
}

/// POST /ask - retrieve context and generate an answer
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    tracing::info!("Question: \"{}\"", request.query);

    let response = state.ask(&request.query).await?;

    Ok(Json(response))
}
