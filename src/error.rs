//! Error types for the upload pipeline
//!
//! The `Display` text of each variant is exactly what the calling agent sees,
//! so messages here are part of the tool contract.

use thiserror::Error;

use crate::svg::SvgError;

/// Message returned when any required configuration value is absent.
pub const MISSING_CONFIG_MESSAGE: &str =
    "Missing required environment variables: UPLOAD_URL, FILE_KEY, FILE_NAME";

/// Failure of a single tool invocation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UploadError {
    /// `UPLOAD_URL`, `FILE_KEY` or `FILE_NAME` is unset or empty
    #[error("{}", MISSING_CONFIG_MESSAGE)]
    MissingConfig,

    /// Local source does not exist; `path` is the resolved path, not the raw source
    #[error("File not found at path: {path}")]
    FileNotFound { path: String },

    /// Local source exists but could not be read
    #[error("Failed to read file at path: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote source could not be fetched
    #[error("Failed to fetch file from URL: {0}")]
    Fetch(#[source] reqwest::Error),

    /// SVG markup could not be rasterized
    #[error("Failed to convert SVG to PNG: {0}")]
    SvgConversion(#[from] SvgError),

    /// The upload POST itself failed at the transport level
    #[error("Upload request failed: {0}")]
    Upload(#[source] reqwest::Error),
}

/// Custom result type
pub type UploadResult<T> = Result<T, UploadError>;

impl UploadError {
    pub fn file_not_found(path: &str) -> Self {
        Self::FileNotFound { path: path.to_string() }
    }

    /// Whether this failure is returned to the caller as ordinary tool text.
    ///
    /// Only a failed upload POST escapes as a protocol-level error; every other
    /// failure is a normal response whose text carries the diagnostic.
    pub fn is_reported(&self) -> bool {
        !matches!(self, UploadError::Upload(_))
    }
}
