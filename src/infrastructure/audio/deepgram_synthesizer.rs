use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};
use crate::infrastructure::byte_stream;

const DEFAULT_BASE_URL: &str = "https://api.deepgram.com";
const DEFAULT_VOICE_MODEL: &str = "aura-asteria-en";

/// Deepgram `speak` text-to-speech adapter.
///
/// Requests linear16 WAV and drains the streamed response body into memory.
pub struct DeepgramSynthesizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    voice_model: String,
}

#[derive(Serialize)]
struct SpeakRequest<'a> {
    text: &'a str,
}

impl DeepgramSynthesizer {
    pub fn new(api_key: String, base_url: Option<String>, voice_model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            voice_model: voice_model.unwrap_or_else(|| DEFAULT_VOICE_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for DeepgramSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SynthesisError> {
        let url = format!("{}/v1/speak", self.base_url.trim_end_matches('/'));

        tracing::debug!(model = %self.voice_model, chars = text.len(), "Requesting speech synthesis");

        let response = self
            .client
            .post(&url)
            .query(&[
                ("model", self.voice_model.as_str()),
                ("encoding", "linear16"),
                ("container", "wav"),
            ])
            .header(AUTHORIZATION, format!("Token {}", self.api_key))
            .json(&SpeakRequest { text })
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {status}: {body}"
            )));
        }

        let audio = byte_stream::drain(response.bytes_stream())
            .await
            .map_err(|e| SynthesisError::StreamFailed(e.to_string()))?;

        if audio.is_empty() {
            return Err(SynthesisError::NoAudio);
        }

        tracing::info!(bytes = audio.len(), "Speech synthesis completed");

        Ok(audio)
    }
}
