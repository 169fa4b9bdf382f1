//! Error types for glyphsketch_app

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in a glyphsketch session
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to read a config file
    #[error("Failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a config file
    #[error("Failed to parse {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Failed to serialize a config
    #[error("Failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Canvas creation failed
    #[error(transparent)]
    Paint(#[from] glyphsketch_paint::PaintError),

    /// Font loading failed
    #[error(transparent)]
    Text(#[from] glyphsketch_text::TextError),

    /// Background loading failed
    #[error(transparent)]
    Image(#[from] glyphsketch_image::ImageError),

    /// Failed to write frames
    #[error("Export failed: {0}")]
    Export(String),
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Export(err.to_string())
    }
}

/// Result type for glyphsketch_app operations
pub type Result<T> = std::result::Result<T, AppError>;
