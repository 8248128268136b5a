//! Export error types.

use ledgerly_shared::AppError;
use thiserror::Error;

/// Errors writing a statement document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed.
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output failed.
    #[error("Export I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Csv(_) => "EXPORT_CSV",
            Self::Json(_) => "EXPORT_JSON",
            Self::Io(_) => "EXPORT_IO",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        500
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts_to_app_error() {
        let err = ExportError::from(std::io::Error::other("disk full"));
        assert_eq!(err.error_code(), "EXPORT_IO");
        assert_eq!(err.http_status_code(), 500);
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Export(msg) if msg.contains("disk full")));
    }
}
