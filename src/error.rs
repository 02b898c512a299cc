//! Error types for modlog
//!
//! The record path (`write_log`, `FileLogger::write`) never returns these:
//! logging must not fail the host. They surface only from configuration
//! loading, explicit opens and process-wide initialization.

use thiserror::Error;

/// Main error type for modlog operations
#[derive(Error, Debug)]
pub enum ModLogError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    ConfigFileMissing(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Invalid file path or module name
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The process-wide registry was already installed
    #[error("modlog has already been initialized")]
    AlreadyInitialized,

    /// I/O errors (directory creation, file open)
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlError {
        #[from]
        source: toml::de::Error,
    },
}

/// Result type alias for modlog operations
pub type Result<T> = std::result::Result<T, ModLogError>;

impl ModLogError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a new invalid path error
    pub fn invalid_path<S: Into<String>>(msg: S) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Get the error category for logging purposes
    pub fn category(&self) -> &'static str {
        match self {
            Self::ConfigError(_)
            | Self::ConfigFileMissing(_)
            | Self::InvalidLogLevel(_)
            | Self::InvalidPath(_) => "config",
            Self::AlreadyInitialized => "initialization",
            Self::IoError { .. } => "io",
            Self::TomlError { .. } => "toml",
        }
    }
}
