use std::path::PathBuf;

use super::Environment;

/// All runtime configuration, built once at process start.
///
/// Missing required variables abort startup with the complete list of
/// missing names; no request is ever served partially configured.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub deepgram: DeepgramSettings,
    pub openai: OpenAiSettings,
    pub qdrant: QdrantSettings,
    pub audio: AudioSettings,
    pub retrieval: RetrievalSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DeepgramSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub transcription_model: Option<String>,
    pub voice_model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub embedding_model: String,
    pub embedding_dimensions: u64,
    pub chat_model: String,
    pub moderation_model: String,
}

#[derive(Debug, Clone)]
pub struct QdrantSettings {
    pub url: String,
    pub collection_name: String,
}

#[derive(Debug, Clone)]
pub struct AudioSettings {
    pub directory: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RetrievalSettings {
    pub top_k: usize,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub environment: Environment,
    pub json_format: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

const REQUIRED_VARS: [&str; 4] = [
    "DEEPGRAM_API_KEY",
    "OPENAI_API_KEY",
    "QDRANT_URL",
    "QDRANT_COLLECTION",
];

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable source. All missing
    /// required names are collected before failing, so the error lists
    /// exactly what needs fixing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|name| get(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        let parse_u16 = |name: &str, default: u16| -> Result<u16, ConfigError> {
            match get(name) {
                Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                    name: name.to_string(),
                    value,
                }),
                None => Ok(default),
            }
        };

        let parse_u64 = |name: &str, default: u64| -> Result<u64, ConfigError> {
            match get(name) {
                Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                    name: name.to_string(),
                    value,
                }),
                None => Ok(default),
            }
        };

        let parse_usize = |name: &str, default: usize| -> Result<usize, ConfigError> {
            match get(name) {
                Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                    name: name.to_string(),
                    value,
                }),
                None => Ok(default),
            }
        };

        let environment = match get("APP_ENVIRONMENT") {
            Some(value) => value
                .parse::<Environment>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "APP_ENVIRONMENT".to_string(),
                    value,
                })?,
            None => Environment::Local,
        };

        Ok(Self {
            server: ServerSettings {
                host: get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_u16("SERVER_PORT", 3000)?,
            },
            deepgram: DeepgramSettings {
                api_key: get("DEEPGRAM_API_KEY").unwrap_or_default(),
                base_url: get("DEEPGRAM_BASE_URL"),
                transcription_model: get("DEEPGRAM_TRANSCRIPTION_MODEL"),
                voice_model: get("DEEPGRAM_VOICE_MODEL"),
            },
            openai: OpenAiSettings {
                api_key: get("OPENAI_API_KEY").unwrap_or_default(),
                base_url: get("OPENAI_BASE_URL"),
                embedding_model: get("OPENAI_EMBEDDING_MODEL")
                    .unwrap_or_else(|| "text-embedding-ada-002".to_string()),
                embedding_dimensions: parse_u64("OPENAI_EMBEDDING_DIMENSIONS", 1536)?,
                chat_model: get("OPENAI_CHAT_MODEL").unwrap_or_else(|| "gpt-4".to_string()),
                moderation_model: get("OPENAI_MODERATION_MODEL")
                    .unwrap_or_else(|| "text-moderation-latest".to_string()),
            },
            qdrant: QdrantSettings {
                url: get("QDRANT_URL").unwrap_or_default(),
                collection_name: get("QDRANT_COLLECTION").unwrap_or_default(),
            },
            audio: AudioSettings {
                directory: PathBuf::from(
                    get("AUDIO_DIR").unwrap_or_else(|| "public/audio".to_string()),
                ),
            },
            retrieval: RetrievalSettings {
                top_k: parse_usize("RETRIEVAL_TOP_K", 5)?,
            },
            logging: LoggingSettings {
                environment,
                json_format: get("LOG_JSON")
                    .map(|v| v.to_lowercase() == "true")
                    .unwrap_or(false),
            },
        })
    }
}
