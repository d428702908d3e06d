use std::sync::Arc;

use crate::application::ports::{
    AudioStore, ChatMessage, Embedder, LanguageModel, MemoryStore, SpeechSynthesizer,
};
use crate::application::services::{PipelineError, Stage, StageExt};
use crate::domain::{generated_wav_name, Classification};

/// Fixed reply for inputs flagged by moderation. Nothing else runs.
pub const REJECTION_MESSAGE: &str = "You entered something inappropriate. Please try again.";

const FALLBACK_ANSWER: &str = "No relevant memories found.";

#[derive(Debug)]
pub enum ClassificationOutcome {
    Rejected,
    Classified {
        label: Classification,
        examples: String,
    },
}

#[derive(Debug)]
pub enum RecallOutcome {
    Rejected,
    Answered {
        classification: Classification,
        response: String,
        audio_file_name: String,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("classification label not in the allowed set: {0:?}")]
struct InvalidLabel(String);

/// Retrieve-and-respond pipeline: moderation gate, similarity search,
/// classification, response generation and speech synthesis.
pub struct RecallService {
    embedder: Arc<dyn Embedder>,
    memory_store: Arc<dyn MemoryStore>,
    language_model: Arc<dyn LanguageModel>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    audio_store: Arc<dyn AudioStore>,
    top_k: usize,
}

impl RecallService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        memory_store: Arc<dyn MemoryStore>,
        language_model: Arc<dyn LanguageModel>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        audio_store: Arc<dyn AudioStore>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            memory_store,
            language_model,
            synthesizer,
            audio_store,
            top_k,
        }
    }

    /// Moderation-gated single-label classification.
    ///
    /// A flagged input short-circuits before any vector query or completion
    /// call. Otherwise the nearest stored memories are retrieved as examples
    /// and the model is asked for exactly one of the four labels, which is
    /// validated against the closed set.
    pub async fn classify(&self, text: &str) -> Result<ClassificationOutcome, PipelineError> {
        let flagged = self
            .language_model
            .moderate(text)
            .await
            .stage(Stage::Moderation)?;

        if flagged {
            tracing::warn!("Input flagged by moderation, rejecting");
            return Ok(ClassificationOutcome::Rejected);
        }

        let embedding = self.embedder.embed(text).await.stage(Stage::Embedding)?;

        let memories = self
            .memory_store
            .search(&embedding, self.top_k)
            .await
            .stage(Stage::Retrieval)?;

        let examples = memories
            .iter()
            .map(|recalled| recalled.memory.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Classify this text: {text}. Use these as examples: {examples}. \
             Respond with just the classification. Classify as Top Secret, \
             Secret, For Official Use Only, Unclassified"
        );

        let raw_label = self
            .language_model
            .complete(&[ChatMessage::user(prompt)])
            .await
            .stage(Stage::Classification)?;

        let label = Classification::parse(&raw_label)
            .ok_or_else(|| PipelineError::new(Stage::Classification, InvalidLabel(raw_label)))?;

        tracing::info!(label = %label, examples = memories.len(), "Query classified");

        Ok(ClassificationOutcome::Classified { label, examples })
    }

    /// Full retrieve flow: classify, generate a reply conditioned on the
    /// label, synthesize it and write the audio artifact.
    pub async fn respond(&self, transcript: &str) -> Result<RecallOutcome, PipelineError> {
        let label = match self.classify(transcript).await? {
            ClassificationOutcome::Rejected => return Ok(RecallOutcome::Rejected),
            ClassificationOutcome::Classified { label, .. } => label,
        };

        let messages = [
            ChatMessage::system(
                "You are a helpful assistant. Respond to the user's input \
                 based on the given classification.",
            ),
            ChatMessage::user(format!(
                "Classification: {label}\nUser input: {transcript}"
            )),
        ];

        let response = self
            .language_model
            .complete(&messages)
            .await
            .stage(Stage::Generation)?;

        let audio = self
            .synthesizer
            .synthesize(&response)
            .await
            .stage(Stage::Synthesis)?;

        let audio_file_name = generated_wav_name();
        self.audio_store
            .store(&audio_file_name, audio)
            .await
            .stage(Stage::Storage)?;

        tracing::info!(
            label = %label,
            output = %audio_file_name,
            "Recall response generated and synthesized"
        );

        Ok(RecallOutcome::Answered {
            classification: label,
            response,
            audio_file_name,
        })
    }

    /// Retrieval-augmented answer: nearest memories become the context for
    /// a single completion. No moderation gate, no synthesis.
    pub async fn answer(&self, text: &str) -> Result<String, PipelineError> {
        let embedding = self.embedder.embed(text).await.stage(Stage::Embedding)?;

        let memories = self
            .memory_store
            .search(&embedding, self.top_k)
            .await
            .stage(Stage::Retrieval)?;

        if memories.is_empty() {
            return Ok(FALLBACK_ANSWER.to_string());
        }

        let context = memories
            .iter()
            .map(|recalled| recalled.memory.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let messages = [
            ChatMessage::system(
                "You are a helpful assistant. Use the retrieved memories as \
                 context when answering.",
            ),
            ChatMessage::user(format!("Context:\n{context}\n\nUser input: {text}")),
        ];

        self.language_model
            .complete(&messages)
            .await
            .stage(Stage::Generation)
    }
}
