use crate::store::StoreError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use metanord_editor::EditorError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by HTTP handlers, rendered as `{ "error": ... }`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Version conflict: expected {expected}, current is {actual}")]
    Conflict { expected: u64, actual: u64 },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(slug) => ApiError::NotFound(format!("Page not found: {}", slug)),
            StoreError::InvalidSlug(_) => ApiError::BadRequest(e.to_string()),
            StoreError::Invalid(_) => ApiError::Unprocessable(e.to_string()),
            StoreError::VersionConflict { expected, actual } => ApiError::Conflict { expected, actual },
            StoreError::Json(_) | StoreError::Io(_) => ApiError::Internal(e.to_string()),
        }
    }
}

/// Body that is not the expected JSON keeps the `{ "error": ... }` shape
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::Unprocessable(rejection.body_text()),
            _ => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<EditorError> for ApiError {
    fn from(e: EditorError) -> Self {
        match e {
            EditorError::Mutation(_) | EditorError::Invalid(_) => ApiError::Unprocessable(e.to_string()),
            EditorError::NotFound(_) => ApiError::NotFound(e.to_string()),
            EditorError::InvalidPayload(_) | EditorError::Json(_) => ApiError::BadRequest(e.to_string()),
            EditorError::Io(_) | EditorError::NotFileBacked => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = match &self {
            ApiError::Conflict { expected, actual } => json!({
                "error": self.to_string(),
                "expectedVersion": expected,
                "currentVersion": actual,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
