use std::fmt;

/// The named steps of the capture and recall pipelines.
///
/// Every pipeline failure is tagged with the stage it happened in, so error
/// responses can say which step failed without each route wrapping every
/// call in its own error translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Transcription,
    Embedding,
    Storage,
    Moderation,
    Retrieval,
    Classification,
    Generation,
    Synthesis,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Transcription => "transcription",
            Stage::Embedding => "embedding",
            Stage::Storage => "storage",
            Stage::Moderation => "moderation",
            Stage::Retrieval => "retrieval",
            Stage::Classification => "classification",
            Stage::Generation => "generation",
            Stage::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    stage: Stage,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl PipelineError {
    pub fn new(
        stage: Stage,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

/// Tags a fallible step with the pipeline stage it belongs to.
pub trait StageExt<T> {
    fn stage(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T, E> StageExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn stage(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError::new(stage, source))
    }
}
