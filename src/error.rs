//! Error types for the Cartesia client.
//!
//! All fallible operations in this crate return [`CartesiaResult`]. Failures
//! that occur on the background session task are never surfaced through this
//! type; they are delivered through the listener callbacks instead (see
//! [`crate::tts::TtsListener`] and [`crate::stt::SttListener`]).

use thiserror::Error;

/// Errors that can occur during Cartesia API operations.
#[derive(Debug, Error)]
pub enum CartesiaError {
    /// Connection to the service failed (DNS, TCP, TLS, or WebSocket upgrade)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocketError(String),

    /// Operation requires an open session but none exists
    #[error("Not connected")]
    NotConnected,

    /// A connect was attempted while a session is already running
    #[error("Already connected")]
    AlreadyConnected,

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The API returned a non-success status code
    #[error("API error (status {status}): {body}")]
    ApiError {
        /// HTTP status code returned by the API
        status: u16,
        /// Response body, usually a JSON error description
        body: String,
    },

    /// Payload (de)serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O error (e.g. reading an audio file for batch transcription)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Operation timed out
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

/// Result type for Cartesia operations.
pub type CartesiaResult<T> = Result<T, CartesiaError>;
