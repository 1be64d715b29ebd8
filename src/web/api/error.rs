use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::tour::ExportError;
use crate::track::LoadError;

pub enum ApiError {
    NotFound(String),
    Load(LoadError),
    Export(ExportError),
    Internal(String),
}

impl From<LoadError> for ApiError {
    fn from(e: LoadError) -> Self {
        ApiError::Load(e)
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Export(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(subject) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::with_message(
                    "subject_not_found",
                    &format!("no fixes for subject {}", subject),
                )),
            )
                .into_response(),
            ApiError::Load(e) => {
                log::warn!("Telemetry load failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse::with_message("source_unavailable", &e.to_string())),
                )
                    .into_response()
            }
            ApiError::Export(e) => {
                log::error!("Tour export failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::with_message("export_failed", &e.to_string())),
                )
                    .into_response()
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message("internal_error", &msg)),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
