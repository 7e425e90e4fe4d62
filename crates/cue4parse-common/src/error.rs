//! Error types for the CUE4Parse toolkit
//!
//! This module defines the common error type shared by the provider and the CLI.

use thiserror::Error;

/// Common result type for CUE4Parse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for CUE4Parse operations
#[derive(Debug, Error)]
pub enum Error {
    // Local I/O and decoding
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("configuration error: {0}")]
    Configuration(String),

    // CLI tool invocation
    #[error("process execution failed: {0}")]
    ProcessFailed(String),

    #[error("CUE4Parse executable not found: {0}")]
    ExecutableNotFound(String),

    // Caller input
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("invalid AES key: {0}")]
    InvalidKey(String),

    #[error("unknown game version: {0}")]
    UnknownGameVersion(String),

    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    /// Create an invalid key error
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Check if this is a not found error
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::ExecutableNotFound(_))
    }

    /// Check if the error was caused by caller input rather than the tool
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::ConfigParse(_)
                | Self::InvalidPath(_)
                | Self::FileNotFound(_)
                | Self::InvalidKey(_)
                | Self::UnknownGameVersion(_)
                | Self::UnsupportedFormat(_)
        )
    }

    /// Get the process exit code the CLI reports for this error
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            // 2: bad invocation or configuration
            Self::Configuration(_)
            | Self::ConfigParse(_)
            | Self::InvalidPath(_)
            | Self::FileNotFound(_)
            | Self::InvalidKey(_)
            | Self::UnknownGameVersion(_)
            | Self::UnsupportedFormat(_) => 2,

            // 3: the CUE4Parse tool is missing
            Self::ExecutableNotFound(_) => 3,

            // 4: the CUE4Parse tool ran and failed
            Self::ProcessFailed(_) => 4,

            // 5: the tool's output could not be understood
            Self::Json(_) => 5,

            Self::Io(_) => 1,
        }
    }
}
