//! Error types for the JFlix player core.
//!
//! Provider and URL problems never surface here: the resolver and the
//! navigator degrade to a default instead. These errors cover the fallible
//! I/O around them (configuration, local state, TMDB).

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the player core.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY environment variable")]
    TmdbApiKeyMissing,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Input errors
    #[error("Unknown media kind: {0}")]
    UnknownMediaKind(String),

    #[error("Unknown site variant: {0}")]
    UnknownSiteVariant(String),

    // TMDB errors
    #[error("Media not found on TMDB: {0}")]
    MediaNotFound(String),

    #[error("TMDB request failed: {0}")]
    TmdbRequestError(String),

    // Local state errors
    #[error("Invalid state file: {0}")]
    InvalidStateFile(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // TOML errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
