use std::sync::{Arc, Mutex};

use yaad::application::ports::{
    Embedder, EmbedderError, MemoryStore, MemoryStoreError, Transcriber, TranscriptionError,
};
use yaad::application::services::{CaptureService, Stage};
use yaad::domain::{Embedding, MemoryRecord, RecalledMemory};

const EMBEDDING_MODEL: &str = "text-embedding-ada-002";

struct FixedTranscriber {
    reply: Result<&'static str, TranscriptionError>,
}

#[async_trait::async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, _audio: &[u8], _mime: &str) -> Result<String, TranscriptionError> {
        match &self.reply {
            Ok(text) => Ok(text.to_string()),
            Err(TranscriptionError::NoTranscript) => Err(TranscriptionError::NoTranscript),
            Err(TranscriptionError::ApiRequestFailed(msg)) => {
                Err(TranscriptionError::ApiRequestFailed(msg.clone()))
            }
            Err(TranscriptionError::InvalidResponse(msg)) => {
                Err(TranscriptionError::InvalidResponse(msg.clone()))
            }
        }
    }
}

struct FixedEmbedder {
    fail: bool,
}

#[async_trait::async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        if self.fail {
            return Err(EmbedderError::ApiRequestFailed("boom".to_string()));
        }
        Ok(Embedding::new(vec![0.5; 4]))
    }
}

#[derive(Default)]
struct RecordingMemoryStore {
    upserted: Mutex<Vec<MemoryRecord>>,
    fail_upsert: bool,
}

#[async_trait::async_trait]
impl MemoryStore for RecordingMemoryStore {
    async fn ensure_collection(&self, _dimensions: u64) -> Result<bool, MemoryStoreError> {
        Ok(false)
    }

    async fn upsert(
        &self,
        memory: &MemoryRecord,
        _embedding: &Embedding,
    ) -> Result<(), MemoryStoreError> {
        if self.fail_upsert {
            return Err(MemoryStoreError::UpsertFailed("down".to_string()));
        }
        self.upserted.lock().unwrap().push(memory.clone());
        Ok(())
    }

    async fn search(
        &self,
        _embedding: &Embedding,
        _top_k: usize,
    ) -> Result<Vec<RecalledMemory>, MemoryStoreError> {
        Ok(Vec::new())
    }
}

fn service(
    transcriber: FixedTranscriber,
    embedder: FixedEmbedder,
    store: Arc<RecordingMemoryStore>,
) -> CaptureService {
    CaptureService::new(
        Arc::new(transcriber),
        Arc::new(embedder),
        store,
        EMBEDDING_MODEL.to_string(),
    )
}

#[tokio::test]
async fn given_audio_when_capturing_then_transcript_is_returned_and_record_upserted() {
    let store = Arc::new(RecordingMemoryStore::default());
    let service = service(
        FixedTranscriber {
            reply: Ok("Grandpa built the barn in 1952."),
        },
        FixedEmbedder { fail: false },
        Arc::clone(&store),
    );

    let transcript = service
        .capture(b"audio-bytes", "upload.wav", "audio/wav")
        .await
        .unwrap();

    assert_eq!(transcript, "Grandpa built the barn in 1952.");

    let upserted = store.upserted.lock().unwrap();
    assert_eq!(upserted.len(), 1);
    assert_eq!(upserted[0].text, transcript);
    assert_eq!(upserted[0].source, "upload.wav");
    assert_eq!(upserted[0].embedding_model, EMBEDDING_MODEL);
}

#[tokio::test]
async fn given_two_captures_when_storing_then_record_ids_differ() {
    let store = Arc::new(RecordingMemoryStore::default());
    let service = service(
        FixedTranscriber {
            reply: Ok("Same words"),
        },
        FixedEmbedder { fail: false },
        Arc::clone(&store),
    );

    service.capture(b"a", "one.wav", "audio/wav").await.unwrap();
    service.capture(b"b", "two.wav", "audio/wav").await.unwrap();

    let upserted = store.upserted.lock().unwrap();
    assert_ne!(upserted[0].id, upserted[1].id);
}

#[tokio::test]
async fn given_failing_transcriber_when_capturing_then_error_is_tagged_transcription() {
    let store = Arc::new(RecordingMemoryStore::default());
    let service = service(
        FixedTranscriber {
            reply: Err(TranscriptionError::ApiRequestFailed("503".to_string())),
        },
        FixedEmbedder { fail: false },
        Arc::clone(&store),
    );

    let err = service
        .capture(b"audio", "upload.wav", "audio/wav")
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Stage::Transcription);
    assert!(store.upserted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_failing_embedder_when_capturing_then_error_is_tagged_embedding() {
    let store = Arc::new(RecordingMemoryStore::default());
    let service = service(
        FixedTranscriber {
            reply: Ok("words"),
        },
        FixedEmbedder { fail: true },
        Arc::clone(&store),
    );

    let err = service
        .capture(b"audio", "upload.wav", "audio/wav")
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Stage::Embedding);
    assert!(store.upserted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_failing_store_when_capturing_then_error_is_tagged_storage() {
    let store = Arc::new(RecordingMemoryStore {
        upserted: Mutex::new(Vec::new()),
        fail_upsert: true,
    });
    let service = service(
        FixedTranscriber {
            reply: Ok("words"),
        },
        FixedEmbedder { fail: false },
        Arc::clone(&store),
    );

    let err = service
        .capture(b"audio", "upload.wav", "audio/wav")
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Stage::Storage);
}
