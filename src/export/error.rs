//! Error types for export runs
//!
//! Only run-level failures surface as [`ExportError`]. Entity-level failures
//! (a rejected category, product or variant) are logged and counted in
//! [`RunStats`](super::RunStats) instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::source::SourceError;

/// Errors that end an export run
#[derive(Error, Debug)]
pub enum ExportError {
    /// Exporter configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The remote endpoint did not answer the connectivity check
    #[error("Connection to the remote platform failed: {0}")]
    ConnectionFailed(String),

    /// The category parent graph contains a cycle
    #[error("Category hierarchy contains a cycle through category {category_id}")]
    CategoryCycle { category_id: i64 },

    /// Reading the legacy catalog failed during a stage
    #[error("Stage '{stage}' failed reading the catalog: {source}")]
    StageError {
        stage: &'static str,
        #[source]
        source: SourceError,
    },

    /// IO error with path context
    #[error("IO error with {path}: {message}")]
    IoErrorWithPath {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

impl ExportError {
    /// Wrap a catalog error with the stage that hit it
    pub fn stage(stage: &'static str, source: SourceError) -> Self {
        Self::StageError { stage, source }
    }

    /// Create an IO error with path context
    pub fn io_with_path(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::IoErrorWithPath {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Get the stage name if this is a stage error
    pub fn stage_name(&self) -> Option<&'static str> {
        match self {
            ExportError::StageError { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ExportError::ConfigError(msg) => {
                format!("Configuration error: {msg}\n\nHint: Check the exporter settings and flags.")
            }
            ExportError::ConnectionFailed(msg) => {
                format!(
                    "Cannot reach the remote platform: {msg}\n\nHint: Check the endpoint URL and that the token is valid."
                )
            }
            ExportError::CategoryCycle { category_id } => {
                format!(
                    "Category {category_id} is its own ancestor.\n\nHint: Fix the parent_id chain in the source catalog."
                )
            }
            ExportError::StageError { stage, source } => {
                format!(
                    "The {stage} stage could not read the catalog: {source}\n\nHint: Check that the catalog snapshot is complete and readable."
                )
            }
            _ => self.to_string(),
        }
    }
}
