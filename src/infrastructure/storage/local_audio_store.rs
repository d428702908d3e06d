use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{AudioStore, AudioStoreError};

/// Audio artifacts on the local filesystem under the served public directory.
pub struct LocalAudioStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalAudioStore {
    pub fn new(base_path: PathBuf) -> Result<Self, AudioStoreError> {
        std::fs::create_dir_all(&base_path).map_err(AudioStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

#[async_trait::async_trait]
impl AudioStore for LocalAudioStore {
    async fn fetch(&self, file_name: &str) -> Result<Vec<u8>, AudioStoreError> {
        let path = StorePath::from(file_name);

        let result = self.inner.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => {
                AudioStoreError::NotFound(file_name.to_string())
            }
            other => AudioStoreError::ReadFailed(other.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| AudioStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn store(&self, file_name: &str, audio: Bytes) -> Result<(), AudioStoreError> {
        let path = StorePath::from(file_name);

        self.inner
            .put(&path, PutPayload::from(audio))
            .await
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;

        tracing::debug!(file = %file_name, "Audio artifact written");
        Ok(())
    }
}
