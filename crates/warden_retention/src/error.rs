//! # Retention Error Types
//!
//! Only configuration loading can fail. Deciding what to keep never does.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading retention configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetentionError {
    /// The configuration file exists but could not be read.
    #[error("failed to read config {path}: {reason}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error text.
        reason: String,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {reason}")]
    Parse {
        /// File that failed (empty for in-memory sources).
        path: PathBuf,
        /// Underlying error text.
        reason: String,
    },

    /// Unknown ethereal mode.
    #[error("invalid eth mode {0:?}: expected \"eth\", \"noneth\" or empty")]
    InvalidEthMode(String),

    /// Unknown quality mode.
    #[error("invalid quality mode {0:?}: expected \"normal\", \"superior\" or empty")]
    InvalidQualityMode(String),

    /// Unknown base tier.
    #[error("invalid base tier {0:?}: expected \"normal\", \"exceptional\", \"elite\" or empty")]
    InvalidBaseTier(String),

    /// Any other semantic problem in the configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for retention configuration operations.
pub type RetentionResult<T> = Result<T, RetentionError>;
