//! CLI error types

use std::path::PathBuf;

use crate::export::ExportError;
use crate::remote::RemoteError;
use crate::source::SourceError;

/// Errors reported by the command line front-end
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Invalid config file {0}: {1}")]
    ConfigParseError(PathBuf, String),

    #[error("Cannot open log file {0}: {1}")]
    LogFileError(PathBuf, String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CliError::Export(e) => e.user_message(),
            CliError::Source(SourceError::FileNotFound(path)) => {
                format!(
                    "Catalog file not found: {}\n\nHint: Check the --catalog path.",
                    path.display()
                )
            }
            CliError::InvalidArgument(msg) => {
                format!("Invalid argument: {msg}\n\nHint: Run with --help to see the available flags.")
            }
            _ => self.to_string(),
        }
    }
}
