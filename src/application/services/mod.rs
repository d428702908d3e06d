mod capture_service;
mod recall_service;
mod stage;

pub use capture_service::CaptureService;
pub use recall_service::{
    ClassificationOutcome, RecallOutcome, RecallService, REJECTION_MESSAGE,
};
pub use stage::{PipelineError, Stage, StageExt};
