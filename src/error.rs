//! Error types for the Aria gateway

use thiserror::Error;

/// Result type alias for Aria operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Aria gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unsupported settings, detected at engine construction
    #[error("configuration error: {0}")]
    Config(String),

    /// Capture/playback command missing, unlaunchable, or exited non-zero
    #[error("process failure: {0}")]
    Process(String),

    /// Non-success HTTP response from a remote STT/TTS endpoint
    #[error("{service} service error {status}: {body}")]
    RemoteService {
        /// Which remote engine failed ("STT" or "TTS")
        service: &'static str,
        status: u16,
        body: String,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
