//! Error types for the stagex library
//!
//! Every ingestion failure is represented here so that the pipeline can convert
//! it to "absent" at the smallest enclosing scope while tests can still assert
//! on the exact kind of failure.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum StagexError {
    /// JSON parsing or serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A logical path could not be fetched from the content source
    #[error("Failed to fetch {path}: {reason}")]
    Transport { path: String, reason: String },

    /// The document does not start with a terminated front matter block
    #[error("No front matter block in {path}")]
    MissingFrontMatter { path: String },

    /// An array-valued field could not be parsed
    #[error("Malformed array in field '{key}': {reason}")]
    MalformedArray { key: String, reason: String },

    /// Manifest or precomputed aggregate payload has the wrong shape
    #[error("Invalid {what} at {path}: {reason}")]
    InvalidPayload {
        what: &'static str,
        path: String,
        reason: String,
    },

    /// No record with this id exists in the catalog
    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    /// The manifest generator could not write its output
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, StagexError>;

impl StagexError {
    /// Create a new transport error
    pub fn transport(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Transport {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new missing front matter error
    pub fn missing_front_matter(path: impl Into<String>) -> Self {
        Self::MissingFrontMatter { path: path.into() }
    }

    /// Create a new malformed array error
    pub fn malformed_array(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedArray {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid payload error
    pub fn invalid_payload(
        what: &'static str,
        path: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        Self::InvalidPayload {
            what,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new record not found error
    pub fn record_not_found(id: impl Into<String>) -> Self {
        Self::RecordNotFound { id: id.into() }
    }

    /// Create a new write failure error
    pub fn write_failed(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::WriteFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Check if the pipeline may degrade around this error instead of stopping.
    ///
    /// Only a generator write failure terminates a run.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::WriteFailed { .. })
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::WriteFailed { .. } => ErrorSeverity::Critical,
            Self::MalformedArray { .. }
            | Self::InvalidPayload { .. }
            | Self::Json(_)
            | Self::Yaml(_) => ErrorSeverity::High,
            Self::Transport { .. } => ErrorSeverity::Medium,
            Self::MissingFrontMatter { .. }
            | Self::RecordNotFound { .. }
            | Self::Validation { .. } => ErrorSeverity::Low,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
