use std::path::PathBuf;

use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a model
#[derive(Error, Debug)]
pub enum Error {
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("Container error: {0}")]
    Container(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
