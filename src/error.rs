//! Error types for GSIT.
//!
//! Uses `thiserror` for ergonomic error definitions. Collection errors
//! (`FetchError`, `SourceError`) never escape the collector; the rest
//! surface through the command-line layer.

use crate::sources::SourceId;
use crate::types::DomainError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single outbound HTTP request.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// The URL the failed request was aimed at, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Request { url, .. }
            | Self::Body { url, .. } => Some(url),
            Self::Client(_) => None,
        }
    }
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Failure of one source adapter as a whole.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed {source_id} payload: {reason}")]
    MalformedPayload { source_id: SourceId, reason: String },

    #[error("unexpected {source_id} payload: expected {expected}")]
    UnexpectedStructure {
        source_id: SourceId,
        expected: &'static str,
    },
}

/// Result type alias for source adapter queries.
pub type SourceResult<T> = Result<T, SourceError>;

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Report rendering and writing errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report to {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Top-level error for command handlers.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for command handlers.
pub type CliResult<T> = Result<T, CliError>;
