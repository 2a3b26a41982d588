//! Error types for codevoice

use std::io;
use thiserror::Error;

/// Main error type for codevoice
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for codevoice operations
pub type Result<T> = std::result::Result<T, VoiceError>;

impl From<String> for VoiceError {
    fn from(s: String) -> Self {
        VoiceError::Other(s)
    }
}

impl From<&str> for VoiceError {
    fn from(s: &str) -> Self {
        VoiceError::Other(s.to_string())
    }
}
