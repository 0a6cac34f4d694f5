use thiserror::Error;

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a viewer
#[derive(Error, Debug)]
pub enum Error {
    #[error("Model load failed for '{url}': {reason}")]
    Load { url: String, reason: String },

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Host channel closed")]
    HostGone,
}
