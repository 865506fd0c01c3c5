//! Error types for the PDF2DOCX server
//!
//! Every error renders as a plain-text body; the front-end shows the text
//! to the user as-is.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::convert::ConvertError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Please upload a .pdf file")]
    InvalidFileType(Option<String>),

    #[error("File too large (max {})", format_limit(.max_bytes))]
    FileTooLarge { max_bytes: u64 },

    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to read upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConvertError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// `100MB` for whole mebibytes, raw bytes otherwise
fn format_limit(bytes: &u64) -> String {
    let bytes = *bytes;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NoFile | AppError::InvalidFileType(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Multipart(e) => e.status(),
            AppError::Conversion(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            AppError::InvalidFileType(name) => {
                tracing::debug!("Rejected upload with file name {:?}", name);
                self.to_string()
            }
            AppError::Multipart(e) => {
                tracing::warn!("Multipart error: {}", e);
                self.to_string()
            }
            AppError::Conversion(e) => {
                tracing::error!("Conversion error: {}", e);
                self.to_string()
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                "IO error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}
