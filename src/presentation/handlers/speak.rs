use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::services::{Stage, StageExt};
use crate::domain::generated_wav_name;
use crate::presentation::{ApiError, AppState};

const DEFAULT_TEXT: &str = "How are we doing today";

#[derive(Deserialize)]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakResponse {
    pub success: bool,
    pub audio_url: String,
    pub text: String,
}

/// Synthesizes the given text and writes the WAV under the audio directory.
#[tracing::instrument(skip(state, request))]
pub async fn speak_handler(
    State(state): State<AppState>,
    Json(request): Json<SpeakRequest>,
) -> Result<Json<SpeakResponse>, ApiError> {
    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEXT.to_string());

    let audio = state
        .synthesizer
        .synthesize(&text)
        .await
        .stage(Stage::Synthesis)?;

    let file_name = generated_wav_name();
    state
        .audio_store
        .store(&file_name, audio)
        .await
        .stage(Stage::Storage)?;

    tracing::info!(file = %file_name, "Synthesized audio written");

    Ok(Json(SpeakResponse {
        success: true,
        audio_url: format!("/audio/{file_name}"),
        text,
    }))
}
