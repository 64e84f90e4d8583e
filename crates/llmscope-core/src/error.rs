//! Error types for llmscope

use thiserror::Error;

/// Result type alias using llmscope's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for llmscope operations
#[derive(Error, Debug)]
pub enum Error {
    /// Data source could not produce entries
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration sources could not be read or merged
    #[error("Configuration error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
