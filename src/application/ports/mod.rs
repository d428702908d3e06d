mod audio_store;
mod embedder;
mod language_model;
mod memory_store;
mod speech_synthesizer;
mod transcriber;

pub use audio_store::{AudioStore, AudioStoreError};
pub use embedder::{Embedder, EmbedderError};
pub use language_model::{ChatMessage, ChatRole, LanguageModel, LanguageModelError};
pub use memory_store::{MemoryStore, MemoryStoreError};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use transcriber::{Transcriber, TranscriptionError};
