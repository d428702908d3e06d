use async_trait::async_trait;
use bytes::Bytes;

/// Audio artifacts under the served public directory, addressed by file name.
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn fetch(&self, file_name: &str) -> Result<Vec<u8>, AudioStoreError>;

    async fn store(&self, file_name: &str, audio: Bytes) -> Result<(), AudioStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("audio file not found: {0}")]
    NotFound(String),
    #[error("audio read failed: {0}")]
    ReadFailed(String),
    #[error("audio write failed: {0}")]
    WriteFailed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
