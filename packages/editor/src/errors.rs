//! Error types for the editor

use metanord_common::{CommonError, ValidationErrors};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Invalid page: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Invalid drag payload: {0}")]
    InvalidPayload(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Document is not file-backed")]
    NotFileBacked,
}

impl From<CommonError> for EditorError {
    fn from(e: CommonError) -> Self {
        match e {
            CommonError::Validation(errors) => EditorError::Invalid(errors),
            CommonError::Json(e) => EditorError::Json(e),
            CommonError::Io(e) => EditorError::Io(e),
        }
    }
}
