//! Image errors

use thiserror::Error;

/// Image loading errors
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image: {0}")]
    FileLoad(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Invalid base64 data: {0}")]
    Base64(String),

    #[error("Failed to start background loader: {0}")]
    Worker(#[from] std::io::Error),
}

impl From<image::ImageError> for ImageError {
    fn from(e: image::ImageError) -> Self {
        ImageError::Decode(e.to_string())
    }
}

impl From<base64::DecodeError> for ImageError {
    fn from(e: base64::DecodeError) -> Self {
        ImageError::Base64(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImageError>;
