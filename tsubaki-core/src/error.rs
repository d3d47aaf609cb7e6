//! Host-facing errors
//!
//! Only lookup and discovery produce errors. "Nothing matched" and "the
//! addon declined" are ordinary `ExecutedResult` values, never errors.

use std::path::PathBuf;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const MANIFEST_ERROR: &str = "MANIFEST_ERROR";
    pub const UNKNOWN_KIND: &str = "UNKNOWN_KIND";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

#[derive(Debug, Error)]
pub enum AddonError {
    /// Caller supplied an unusable argument, detected before any scan
    #[error("Invalid argument '{param}': {reason}")]
    InvalidArgument { param: &'static str, reason: String },

    /// No registry entry matched the requested name
    #[error("Addon not found: {name}")]
    NotFound { name: String },

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed manifest '{}': {source}", path.display())]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Manifest '{}' names unknown addon kind '{kind}'", path.display())]
    UnknownKind { path: PathBuf, kind: String },

    #[error("Invalid value '{value}' for {key}")]
    Config { key: &'static str, value: String },
}

impl AddonError {
    pub fn invalid_argument(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument { param, reason: reason.into() }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn manifest(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Manifest { path: path.into(), source }
    }

    pub fn unknown_kind(path: impl Into<PathBuf>, kind: impl Into<String>) -> Self {
        Self::UnknownKind { path: path.into(), kind: kind.into() }
    }

    pub fn config(key: &'static str, value: impl Into<String>) -> Self {
        Self::Config { key, value: value.into() }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => codes::INVALID_ARGUMENT,
            Self::NotFound { .. } => codes::NOT_FOUND,
            Self::Io { .. } => codes::IO_ERROR,
            Self::Manifest { .. } => codes::MANIFEST_ERROR,
            Self::UnknownKind { .. } => codes::UNKNOWN_KIND,
            Self::Config { .. } => codes::CONFIG_ERROR,
        }
    }
}
