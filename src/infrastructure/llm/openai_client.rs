use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ChatMessage, LanguageModel, LanguageModelError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI moderation and chat-completion adapter.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    moderation_model: String,
}

#[derive(Serialize)]
struct ModerationRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct ModerationResponse {
    results: Vec<ModerationResult>,
}

#[derive(Deserialize)]
struct ModerationResult {
    flagged: bool,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        chat_model: String,
        moderation_model: String,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            chat_model,
            moderation_model,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LanguageModelError> {
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LanguageModelError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LanguageModelError::ApiRequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn moderate(&self, input: &str) -> Result<bool, LanguageModelError> {
        let url = format!("{}/moderations", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ModerationRequest {
                model: &self.moderation_model,
                input,
            })
            .send()
            .await
            .map_err(|e| LanguageModelError::ApiRequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let parsed: ModerationResponse = response
            .json()
            .await
            .map_err(|e| LanguageModelError::InvalidResponse(e.to_string()))?;

        parsed
            .results
            .first()
            .map(|r| r.flagged)
            .ok_or_else(|| LanguageModelError::InvalidResponse("empty results".to_string()))
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LanguageModelError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let wire_messages = messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.chat_model,
                messages: wire_messages,
            })
            .send()
            .await
            .map_err(|e| LanguageModelError::ApiRequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LanguageModelError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LanguageModelError::InvalidResponse("no completion choice".to_string()))
    }
}
