use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use yaad::application::ports::{
    AudioStore, Embedder, LanguageModel, MemoryStore, SpeechSynthesizer, Transcriber,
};
use yaad::application::services::{CaptureService, RecallService};
use yaad::infrastructure::audio::{DeepgramSynthesizer, DeepgramTranscriber};
use yaad::infrastructure::llm::{OpenAiClient, OpenAiEmbedder};
use yaad::infrastructure::observability::{init_tracing, TracingConfig};
use yaad::infrastructure::persistence::QdrantMemoryStore;
use yaad::infrastructure::storage::LocalAudioStore;
use yaad::presentation::{create_router, AppState};
use yaad::presentation::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Fail fast: every missing variable is reported before anything binds.
    let settings = Settings::from_env()?;

    init_tracing(
        TracingConfig::new(
            settings.logging.environment.as_str(),
            settings.logging.json_format,
        ),
        settings.server.port,
    );

    let transcriber: Arc<dyn Transcriber> = Arc::new(DeepgramTranscriber::new(
        settings.deepgram.api_key.clone(),
        settings.deepgram.base_url.clone(),
        settings.deepgram.transcription_model.clone(),
    ));

    let synthesizer: Arc<dyn SpeechSynthesizer> = Arc::new(DeepgramSynthesizer::new(
        settings.deepgram.api_key.clone(),
        settings.deepgram.base_url.clone(),
        settings.deepgram.voice_model.clone(),
    ));

    let embedder: Arc<dyn Embedder> = Arc::new(OpenAiEmbedder::new(
        settings.openai.api_key.clone(),
        settings.openai.base_url.clone(),
        settings.openai.embedding_model.clone(),
    ));

    let language_model: Arc<dyn LanguageModel> = Arc::new(OpenAiClient::new(
        settings.openai.api_key.clone(),
        settings.openai.base_url.clone(),
        settings.openai.chat_model.clone(),
        settings.openai.moderation_model.clone(),
    ));

    let memory_store: Arc<dyn MemoryStore> = Arc::new(QdrantMemoryStore::new(
        &settings.qdrant.url,
        settings.qdrant.collection_name.clone(),
    )?);

    memory_store
        .ensure_collection(settings.openai.embedding_dimensions)
        .await?;

    let audio_store: Arc<dyn AudioStore> =
        Arc::new(LocalAudioStore::new(settings.audio.directory.clone())?);

    let capture_service = Arc::new(CaptureService::new(
        Arc::clone(&transcriber),
        Arc::clone(&embedder),
        Arc::clone(&memory_store),
        settings.openai.embedding_model.clone(),
    ));

    let recall_service = Arc::new(RecallService::new(
        Arc::clone(&embedder),
        Arc::clone(&memory_store),
        Arc::clone(&language_model),
        Arc::clone(&synthesizer),
        Arc::clone(&audio_store),
        settings.retrieval.top_k,
    ));

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);

    let state = AppState {
        capture_service,
        recall_service,
        transcriber,
        embedder,
        memory_store,
        synthesizer,
        audio_store,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
