mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, ConfigError, DeepgramSettings, LoggingSettings, OpenAiSettings, QdrantSettings,
    RetrievalSettings, ServerSettings, Settings,
};
