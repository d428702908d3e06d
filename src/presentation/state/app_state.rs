use std::sync::Arc;

use crate::application::ports::{
    AudioStore, Embedder, MemoryStore, SpeechSynthesizer, Transcriber,
};
use crate::application::services::{CaptureService, RecallService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub capture_service: Arc<CaptureService>,
    pub recall_service: Arc<RecallService>,
    pub transcriber: Arc<dyn Transcriber>,
    pub embedder: Arc<dyn Embedder>,
    pub memory_store: Arc<dyn MemoryStore>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub audio_store: Arc<dyn AudioStore>,
    pub settings: Settings,
}
