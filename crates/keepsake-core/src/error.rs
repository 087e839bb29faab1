//! Error types for the core pipeline.

use thiserror::Error;

/// Errors returned while loading or decoding an image payload.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Reading the image file failed.
    #[error("failed to read image: {0}")]
    Read(#[from] std::io::Error),
    /// The stored payload is not a data URL.
    #[error("invalid image payload: {0}")]
    InvalidDataUrl(String),
    /// Decoding the base64 payload failed.
    #[error("failed to decode image payload: {0}")]
    Decode(#[from] base64::DecodeError),
}
