//! glyphsketch Image
//!
//! Background images for the canvas: decoding (PNG, JPEG, GIF, WebP, BMP,
//! files or base64 data URIs), the cyclic background selection, and a
//! worker thread that decodes a batch without stalling the frame loop.

pub mod backgrounds;
pub mod error;
pub mod loader;

pub use backgrounds::{BackgroundBatch, BackgroundLoader, BackgroundSet};
pub use error::{ImageError, Result};
pub use loader::{ImageData, ImageSource};
