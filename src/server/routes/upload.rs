//! PDF upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::UploadResponse;

/// POST /upload - accept a multipart PDF and add it to the database
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Internal(format!("failed to read multipart field: {}", e)))?
    {
        // skip non-file fields
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Internal(format!("failed to read file body: {}", e)))?;

        tracing::info!("Upload: {} ({} bytes)", filename, data.len());

        let response = state.upload(&filename, &data).await?;
        return Ok(Json(response));
    }

    Err(Error::load("upload", "multipart request contained no file"))
}
