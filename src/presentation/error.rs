use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::services::PipelineError;

/// Terminal error for every route: each pipeline stage failure is caught
/// once here and converted into an HTTP response, instead of per-route
/// error translation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, stage, message) = match &self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, None, message.clone()),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, None, message.clone()),
            ApiError::Pipeline(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(err.stage().as_str()),
                err.to_string(),
            ),
        };

        tracing::error!(status = %status, error = %message, "Request failed");

        (status, Json(ErrorBody { error: message, stage })).into_response()
    }
}
