//! Error type for start-up, terminal and output failures.
//!
//! The task store itself never fails; these errors come from the layers
//! around it.

use qrcode::types::QrError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal setup, drawing or event polling failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    /// The QR-code payload could not be encoded.
    #[error("failed to encode QR code: {0}")]
    Qr(#[from] QrError),
    /// Writing the task dump failed.
    #[error("failed to serialize tasks: {0}")]
    Json(#[from] serde_json::Error),
    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
