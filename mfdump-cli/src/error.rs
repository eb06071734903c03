use thiserror::Error;

use mfdump_core::DumpError;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The input file could not be opened
    #[error("Error opening the input file {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    /// The dump could not be decoded
    #[error("{0}")]
    Dump(#[from] DumpError),

    /// Settings file could not be parsed
    #[error("Settings error: {0}")]
    Settings(String),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logger setup failed
    #[error("Logger error: {0}")]
    Logger(String),
}

impl CliError {
    pub(crate) fn open(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    pub(crate) fn logger(msg: impl Into<String>) -> Self {
        Self::Logger(msg.into())
    }
}
