use crate::validate::ValidationErrors;
use thiserror::Error;

/// Common error type shared by the editor, store and CLI
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Invalid page: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
