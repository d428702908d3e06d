use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::domain::{mime_for_file, Embedding, MemoryRecord};
use crate::presentation::handlers::read_audio_field;
use crate::presentation::{ApiError, AppState};

/// 44-byte WAV containing only silence, used by the self-test route.
const SILENT_WAV: &[u8] = &[
    0x52, 0x49, 0x46, 0x46, 0x24, 0x00, 0x00, 0x00, 0x57, 0x41, 0x56, 0x45, 0x66, 0x6d, 0x74,
    0x20, 0x10, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x11, 0x2b, 0x00, 0x00, 0x30, 0x30,
    0x00, 0x00, 0x01, 0x00, 0x08, 0x00, 0x64, 0x61, 0x74, 0x61, 0x00, 0x00, 0x00, 0x00,
];

const SELF_TEST_TEXT: &str = "This is a test string.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainResponse {
    pub message: String,
    pub transcript: String,
    pub rag_result: String,
}

#[derive(Serialize)]
pub struct SelfTestResponse {
    pub message: String,
}

/// Full pipeline: transcribe, embed, store, then answer with the stored
/// memories as retrieval context. A memory upserted here is kept even if
/// the generation step fails afterwards.
#[tracing::instrument(skip(state, multipart))]
pub async fn main_pipeline_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MainResponse>, ApiError> {
    let (file_name, data) = read_audio_field(&mut multipart).await?;

    let transcript = state
        .capture_service
        .capture(&data, &file_name, &mime_for_file(&file_name))
        .await?;

    let rag_result = state.recall_service.answer(&transcript).await?;

    Ok(Json(MainResponse {
        message: "Audio processed successfully".to_string(),
        transcript,
        rag_result,
    }))
}

/// Exercises each adapter against fixed fixtures. Failures are logged, not
/// fatal: the route reports that the sequence ran.
#[tracing::instrument(skip(state))]
pub async fn self_test_handler(State(state): State<AppState>) -> Json<SelfTestResponse> {
    tracing::info!("Running service self-tests");

    match state.transcriber.transcribe(SILENT_WAV, "audio/wav").await {
        Ok(transcript) => tracing::info!(transcript = %transcript, "Transcriber self-test passed"),
        Err(e) => tracing::warn!(error = %e, "Transcriber self-test failed"),
    }

    let embedding: Option<Embedding> = match state.embedder.embed(SELF_TEST_TEXT).await {
        Ok(embedding) => {
            tracing::info!(dimensions = embedding.dimensions(), "Embedder self-test passed");
            Some(embedding)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Embedder self-test failed");
            None
        }
    };

    if let Some(embedding) = embedding {
        let memory = MemoryRecord::new(
            SELF_TEST_TEXT.to_string(),
            "self-test".to_string(),
            state.settings.openai.embedding_model.clone(),
        );

        match state.memory_store.upsert(&memory, &embedding).await {
            Ok(()) => match state.memory_store.search(&embedding, 1).await {
                Ok(recalled) => {
                    tracing::info!(hits = recalled.len(), "Memory store self-test passed")
                }
                Err(e) => tracing::warn!(error = %e, "Memory store search self-test failed"),
            },
            Err(e) => tracing::warn!(error = %e, "Memory store upsert self-test failed"),
        }
    }

    Json(SelfTestResponse {
        message: "Service tests executed".to_string(),
    })
}
