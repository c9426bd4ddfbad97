//! Error types surfaced to the UI.

use thiserror::Error;

/// Failure of a user-visible operation. The display string is exactly what
/// the page shows inline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Rejected locally, no request was made.
    #[error("{0}")]
    Validation(String),
    /// Network, HTTP status or decode failure, already normalized.
    #[error("{0}")]
    Remote(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::Remote(m) => m,
        }
    }
}

/// Browser storage could not be read or written.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("storage unavailable: {0}")]
pub struct StorageError(pub String);

/// PDF report could not be serialized.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no prediction to report")]
    NoResult,
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Chart could not be drawn.
#[derive(Debug, Error)]
#[error("chart rendering failed: {0}")]
pub struct ChartError(pub String);
