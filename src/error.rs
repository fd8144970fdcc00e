//! Error types for dsynth

use std::io;
use thiserror::Error;

/// Main error type for dsynth
#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Diphone library error: {0}")]
    Library(String),

    #[error("Audio format error: {0}")]
    Format(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Dictionary error: {0}")]
    Dictionary(String),

    #[error("No pronunciation for '{0}' in the dictionary")]
    UnknownWord(String),

    #[error("Invalid volume '{0}': expected an integer between 0 and 100")]
    InvalidVolume(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for dsynth operations
pub type Result<T> = std::result::Result<T, SynthError>;

impl From<String> for SynthError {
    fn from(s: String) -> Self {
        SynthError::Other(s)
    }
}

impl From<&str> for SynthError {
    fn from(s: &str) -> Self {
        SynthError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for SynthError {
    fn from(e: serde_json::Error) -> Self {
        SynthError::Dictionary(format!("JSON error: {}", e))
    }
}
