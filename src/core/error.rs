//! Error types for the switcher

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed catalog for '{lang}': {reason}")]
    Catalog { lang: String, reason: String },

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Navigation container not found: {0}")]
    NavigationMissing(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
