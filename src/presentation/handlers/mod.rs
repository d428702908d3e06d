mod health;
mod main_pipeline;
mod retrieve;
mod speak;
mod speak_and_store;
mod transcribe;

pub use health::health_handler;
pub use main_pipeline::{main_pipeline_handler, self_test_handler};
pub use retrieve::retrieve_handler;
pub use speak::speak_handler;
pub use speak_and_store::speak_and_store_handler;
pub use transcribe::transcribe_handler;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::application::ports::AudioStoreError;
use crate::application::services::{PipelineError, Stage};
use crate::presentation::ApiError;

/// Pulls the `audio` field out of a multipart body. Its absence is a
/// validation error before any adapter runs.
pub(crate) async fn read_audio_field(
    multipart: &mut Multipart,
) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read multipart body: {e}")))?
    {
        if field.name() != Some("audio") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("recording.wav").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read audio field: {e}")))?;

        return Ok((file_name, data));
    }

    Err(ApiError::Validation("Audio file is required".to_string()))
}

pub(crate) fn audio_fetch_error(file_name: &str, err: AudioStoreError) -> ApiError {
    match err {
        AudioStoreError::NotFound(_) => {
            ApiError::NotFound(format!("Audio file not found: {file_name}"))
        }
        other => ApiError::Pipeline(PipelineError::new(Stage::Storage, other)),
    }
}
