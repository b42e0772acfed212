//! Error types for worldstate-sync

use thiserror::Error;

/// Result type alias for worldstate-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for worldstate-sync
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "repo.owner")
        key: Option<String>,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote endpoint returned a non-success HTTP status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// The status code returned by the server
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Convenience constructor for configuration errors
    pub(crate) fn config(message: impl Into<String>, key: &str) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}
