use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::overhead::OverheadError;

#[derive(Debug)]
pub enum ApiError {
    InvalidCoordinate(String),
    PositionUnavailable,
    Internal(String),
}

impl From<OverheadError> for ApiError {
    fn from(e: OverheadError) -> Self {
        match e {
            OverheadError::InvalidCoordinate { .. } => ApiError::InvalidCoordinate(e.to_string()),
            OverheadError::InvalidOrbitalParameters { .. } => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidCoordinate(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("invalid_coordinate", &msg)),
            )
                .into_response(),
            ApiError::PositionUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("position_unavailable")),
            )
                .into_response(),
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
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
