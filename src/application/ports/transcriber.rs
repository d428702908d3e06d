use async_trait::async_trait;

/// Converts recorded speech to text.
///
/// Callers pass the raw audio bytes together with the declared MIME type;
/// there is no retrying or chunking for long recordings.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid transcription response: {0}")]
    InvalidResponse(String),
    #[error("no transcript found in provider response")]
    NoTranscript,
}
