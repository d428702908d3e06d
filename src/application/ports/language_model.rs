use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Moderation and chat-completion calls against the language-model provider.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns true when the input is flagged by the moderation model.
    async fn moderate(&self, input: &str) -> Result<bool, LanguageModelError>;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LanguageModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LanguageModelError {
    #[error("language model api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("language model rate limited")]
    RateLimited,
    #[error("invalid language model response: {0}")]
    InvalidResponse(String),
}
