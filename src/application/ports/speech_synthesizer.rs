use async_trait::async_trait;
use bytes::Bytes;

/// Text-to-speech in a fixed encoding and container (linear16 WAV).
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("speech synthesis api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("audio stream read failed: {0}")]
    StreamFailed(String),
    #[error("no audio stream received")]
    NoAudio,
}
