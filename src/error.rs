use thiserror::Error;

use crate::form::editor::EditorError;

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("{0}")]
    Validation(String),
    #[error("Please fill in required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
    #[error("{0} not found.")]
    NotFound(String),
    #[error("Not signed in.")]
    Unauthorized,
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Api(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
