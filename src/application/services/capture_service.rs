use std::sync::Arc;

use crate::application::ports::{Embedder, MemoryStore, Transcriber};
use crate::application::services::{PipelineError, Stage, StageExt};
use crate::domain::MemoryRecord;

/// Capture-and-store pipeline: audio bytes in, preserved memory out.
pub struct CaptureService {
    transcriber: Arc<dyn Transcriber>,
    embedder: Arc<dyn Embedder>,
    memory_store: Arc<dyn MemoryStore>,
    embedding_model: String,
}

impl CaptureService {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        embedder: Arc<dyn Embedder>,
        memory_store: Arc<dyn MemoryStore>,
        embedding_model: String,
    ) -> Self {
        Self {
            transcriber,
            embedder,
            memory_store,
            embedding_model,
        }
    }

    /// Transcribes the recording, embeds the transcript and upserts the
    /// memory record. Returns the transcript.
    pub async fn capture(
        &self,
        audio: &[u8],
        source: &str,
        mime_type: &str,
    ) -> Result<String, PipelineError> {
        let transcript = self
            .transcriber
            .transcribe(audio, mime_type)
            .await
            .stage(Stage::Transcription)?;

        let embedding = self
            .embedder
            .embed(&transcript)
            .await
            .stage(Stage::Embedding)?;

        let memory = MemoryRecord::new(
            transcript.clone(),
            source.to_string(),
            self.embedding_model.clone(),
        );

        self.memory_store
            .upsert(&memory, &embedding)
            .await
            .stage(Stage::Storage)?;

        tracing::info!(
            memory_id = %memory.id,
            source = %source,
            chars = transcript.len(),
            "Memory captured and stored"
        );

        Ok(transcript)
    }
}
