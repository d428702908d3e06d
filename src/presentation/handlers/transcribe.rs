use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::services::{Stage, StageExt};
use crate::domain::mime_for_file;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::handlers::audio_fetch_error;
use crate::presentation::{ApiError, AppState};

#[derive(Deserialize)]
pub struct TranscribeRequest {
    #[serde(default, rename = "fileName")]
    pub file_name: Option<String>,
}

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
}

/// Transcribes a recording already present in the audio directory.
#[tracing::instrument(skip(state, request))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    Json(request): Json<TranscribeRequest>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let file_name = request
        .file_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("File name is required".to_string()))?;

    let audio = state
        .audio_store
        .fetch(&file_name)
        .await
        .map_err(|e| audio_fetch_error(&file_name, e))?;

    tracing::debug!(file = %file_name, bytes = audio.len(), "Audio file loaded");

    let transcript = state
        .transcriber
        .transcribe(&audio, &mime_for_file(&file_name))
        .await
        .stage(Stage::Transcription)?;

    tracing::info!(transcript = %sanitize_prompt(&transcript), "Transcription succeeded");

    Ok(Json(TranscribeResponse { transcript }))
}
