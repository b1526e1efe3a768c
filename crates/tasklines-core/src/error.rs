//! Core error types for tasklines-core.
//!
//! The transition and completion engines are total and never fail. Errors
//! only come from the collaborators around them: configuration, document
//! persistence, recurrence rule parsing and postponement.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tasklines-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document read/write errors
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Postponement errors
    #[error("{0}")]
    Postpone(#[from] PostponeError),

    /// Query instruction errors
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Errors raised while reading, matching or writing a Markdown document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The addressed line exists but is not a checklist item
    #[error("Line {0} is not a task")]
    NoTaskAtLine(usize),

    #[error("Line {line} is out of range (document has {len} lines)")]
    LineOutOfRange { line: usize, len: usize },

    /// The document changed between reading the task and writing it back
    #[error("Line {line} no longer matches the task being updated")]
    LineChanged { line: usize },
}

/// Errors raised by the postponement helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostponeError {
    #[error("⚠️ Postponement requires a date: due, scheduled or start.")]
    NoDate,
}

/// Errors raised when a recurrence rule cannot be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("unrecognised recurrence rule: {0}")]
    Unrecognised(String),

    #[error("recurrence interval must be at least 1")]
    ZeroInterval,
}

/// Errors raised while reading query instructions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("do not understand query instruction: {0}")]
    UnknownInstruction(String),

    #[error("field '{0}' does not support sorting")]
    SortingNotSupported(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postpone_error_message_is_user_facing() {
        let err = CoreError::from(PostponeError::NoDate);
        assert_eq!(
            err.to_string(),
            "⚠️ Postponement requires a date: due, scheduled or start."
        );
    }

    fn lift(step: u8) -> Result<()> {
        match step {
            0 => Err(ConfigError::UnknownKey("nope".into()))?,
            1 => Err(DocumentError::NoTaskAtLine(3))?,
            2 => Err(PostponeError::NoDate)?,
            3 => Err(QueryError::UnknownInstruction("x".into()))?,
            _ => {
                serde_json::from_str::<serde_json::Value>("{")?;
            }
        }
        Ok(())
    }

    #[test]
    fn question_mark_lifts_each_concern() {
        assert!(matches!(lift(0), Err(CoreError::Config(_))));
        assert!(matches!(lift(1), Err(CoreError::Document(_))));
        assert!(matches!(lift(2), Err(CoreError::Postpone(_))));
        assert!(matches!(lift(3), Err(CoreError::Query(_))));
        assert!(matches!(lift(4), Err(CoreError::Json(_))));
    }

    #[test]
    fn document_errors_name_the_line() {
        let err = DocumentError::LineChanged { line: 7 };
        assert!(err.to_string().contains("Line 7"));

        let err = DocumentError::LineOutOfRange { line: 12, len: 3 };
        assert!(err.to_string().contains("3 lines"));
    }
}
