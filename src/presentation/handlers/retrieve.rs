use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::services::{RecallOutcome, Stage, StageExt, REJECTION_MESSAGE};
use crate::domain::mime_for_file;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::handlers::audio_fetch_error;
use crate::presentation::{ApiError, AppState};

#[derive(Deserialize)]
pub struct RetrieveRequest {
    #[serde(default, rename = "inputAudioFileName")]
    pub input_audio_file_name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveResponse {
    pub transcript: String,
    pub classification: Option<String>,
    pub llm_response: String,
    pub output_audio_file_name: Option<String>,
}

/// Retrieve-and-respond pipeline: query by voice or text, get a spoken
/// answer conditioned on the classification of the query.
#[tracing::instrument(skip(state, request))]
pub async fn retrieve_handler(
    State(state): State<AppState>,
    Json(request): Json<RetrieveRequest>,
) -> Result<Json<RetrieveResponse>, ApiError> {
    let transcript = match (request.input_audio_file_name, request.text) {
        (Some(file_name), _) if !file_name.trim().is_empty() => {
            let audio = state
                .audio_store
                .fetch(&file_name)
                .await
                .map_err(|e| audio_fetch_error(&file_name, e))?;

            state
                .transcriber
                .transcribe(&audio, &mime_for_file(&file_name))
                .await
                .stage(Stage::Transcription)?
        }
        (_, Some(text)) if !text.trim().is_empty() => text,
        _ => {
            return Err(ApiError::Validation(
                "Either inputAudioFileName or text is required".to_string(),
            ))
        }
    };

    tracing::debug!(query = %sanitize_prompt(&transcript), "Processing retrieve request");

    match state.recall_service.respond(&transcript).await? {
        RecallOutcome::Rejected => Ok(Json(RetrieveResponse {
            transcript,
            classification: None,
            llm_response: REJECTION_MESSAGE.to_string(),
            output_audio_file_name: None,
        })),
        RecallOutcome::Answered {
            classification,
            response,
            audio_file_name,
        } => Ok(Json(RetrieveResponse {
            transcript,
            classification: Some(classification.to_string()),
            llm_response: response,
            output_audio_file_name: Some(audio_file_name),
        })),
    }
}
