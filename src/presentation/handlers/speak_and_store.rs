use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::domain::mime_for_file;
use crate::presentation::handlers::read_audio_field;
use crate::presentation::{ApiError, AppState};

#[derive(Serialize)]
pub struct SpeakAndStoreResponse {
    pub transcript: String,
    pub message: String,
}

/// Capture pipeline: uploaded recording → transcript → embedding → memory.
#[tracing::instrument(skip(state, multipart))]
pub async fn speak_and_store_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SpeakAndStoreResponse>, ApiError> {
    let (file_name, data) = read_audio_field(&mut multipart).await?;

    tracing::debug!(file = %file_name, bytes = data.len(), "Audio upload received");

    let transcript = state
        .capture_service
        .capture(&data, &file_name, &mime_for_file(&file_name))
        .await?;

    Ok(Json(SpeakAndStoreResponse {
        transcript,
        message: "Transcript processed and stored successfully".to_string(),
    }))
}
