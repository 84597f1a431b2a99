//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`QuickOpenError`] which covers every failure the
//! library surfaces to its caller. It uses `thiserror` for ergonomic error
//! definitions and includes constructors for the errors that carry context.
//!
//! # Public API
//! - [`QuickOpenError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, QuickOpenError>`
//!
//! # Error Categories
//! - **Settings**: Settings file missing, unreadable or malformed
//! - **Selection channel**: Channel setup failures that cannot be retried
//! - **Host protocol**: Unreadable or unwritable host messages
//!
//! Malformed selection records are never errors: they are dropped where they
//! are parsed, since a dismissed selector looks exactly like a bad record.

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for fzf-quick-open
#[derive(Error, Debug)]
pub enum QuickOpenError {
    // Settings errors
    #[error("Could not find configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Settings file does not exist: {path}")]
    SettingsNotFound { path: PathBuf },

    #[error("Failed to read settings file '{path}': {source}")]
    SettingsReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file '{path}': {source}")]
    SettingsParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Selection channel errors
    #[error("Failed to set up selection channel '{address}': {source}")]
    ChannelSetup {
        address: String,
        source: std::io::Error,
    },

    #[error("Failed to write selection to '{address}': {source}")]
    ChannelWrite {
        address: String,
        source: std::io::Error,
    },

    #[error("Unknown selection tag: '{tag}'. Expected one of: open, add, rg")]
    InvalidTag { tag: String },

    // Host protocol errors
    #[error("Failed to write host action: {source}")]
    HostWrite { source: std::io::Error },

    #[error("Invalid host message: {source}")]
    HostProtocol { source: serde_json::Error },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using QuickOpenError
pub type Result<T> = std::result::Result<T, QuickOpenError>;

impl QuickOpenError {
    /// Create a settings not found error
    pub fn settings_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SettingsNotFound { path: path.into() }
    }

    /// Create a settings read failed error
    pub fn settings_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SettingsReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a settings parse failed error
    pub fn settings_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::SettingsParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a channel setup error for the given address
    pub fn channel_setup(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::ChannelSetup {
            address: address.into(),
            source,
        }
    }

    pub fn channel_write(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::ChannelWrite {
            address: address.into(),
            source,
        }
    }

    /// Create an invalid tag error
    pub fn invalid_tag(tag: impl Into<String>) -> Self {
        Self::InvalidTag { tag: tag.into() }
    }

    pub fn host_write(source: std::io::Error) -> Self {
        Self::HostWrite { source }
    }

    pub fn host_protocol(source: serde_json::Error) -> Self {
        Self::HostProtocol { source }
    }
}
