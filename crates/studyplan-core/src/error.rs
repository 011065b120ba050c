//! Core error types for studyplan-core.
//!
//! Every fallible operation in the library returns [`CoreError`] (or one of
//! the narrower enums it wraps), so callers can tell a rejected value from a
//! missing record or a broken data file.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A field value was rejected on construction or mutation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A name is already taken
    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: RecordKind, name: String },

    /// A referenced record does not exist
    #[error("{kind} '{name}' not found")]
    NotFound { kind: RecordKind, name: String },

    /// The data file exists but could not be turned into subjects
    #[error("Corrupt data file {path}: {message}")]
    CorruptData { path: PathBuf, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn duplicate(kind: RecordKind, name: impl Into<String>) -> Self {
        CoreError::Duplicate {
            kind,
            name: name.into(),
        }
    }

    pub fn not_found(kind: RecordKind, name: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// True for errors that leave the data file unreadable.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, CoreError::CorruptData { .. })
    }
}

/// Which kind of record a [`CoreError::Duplicate`] or
/// [`CoreError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Subject,
    Topic,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Subject => f.write_str("Subject"),
            RecordKind::Topic => f.write_str("Topic"),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Key does not name a configuration value
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text was empty or whitespace
    #[error("'{field}' must not be empty")]
    Empty { field: &'static str },

    /// Integer rating outside its allowed range
    #[error("'{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: u8,
        max: u8,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
