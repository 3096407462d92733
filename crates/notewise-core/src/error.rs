//! Error types for notewise.

use thiserror::Error;

/// Result type alias using notewise's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for notewise operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Inference call failed or returned an unusable body
    #[error("Inference error: {0}")]
    Inference(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An outbound call exceeded its deadline
    #[error("Timed out after {0} ms")]
    Timeout(u64),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
