//! Error types for evently.

use thiserror::Error;

/// Errors that can occur in evently operations.
#[derive(Error, Debug)]
pub enum EventlyError {
    /// The query engine was handed something that is not a sequence of events.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required field: {0}")]
    Validation(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    /// A request body could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for evently operations.
pub type EventlyResult<T> = Result<T, EventlyError>;
