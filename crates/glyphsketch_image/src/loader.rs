//! Image loading and decoded pixel data

use std::path::{Path, PathBuf};

use base64::Engine;
use glyphsketch_core::ImageView;
use image::{DynamicImage, GenericImageView};

use crate::error::{ImageError, Result};

/// Where an image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk
    File(PathBuf),
    /// Base64 data, plain or as a `data:` URI
    Base64(String),
}

impl From<&str> for ImageSource {
    /// `data:` URIs become base64 sources, anything else a file path
    fn from(s: &str) -> Self {
        if s.starts_with("data:") {
            ImageSource::Base64(s.to_string())
        } else {
            ImageSource::File(PathBuf::from(s))
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::File(path)
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSource::File(path) => write!(f, "{}", path.display()),
            ImageSource::Base64(_) => f.write_str("<base64 image>"),
        }
    }
}

/// Decoded straight-alpha RGBA image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageData {
    /// Create ImageData from raw RGBA pixels
    pub fn from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected_len = width as usize * height as usize * 4;
        if pixels.len() != expected_len {
            return Err(ImageError::Decode(format!(
                "Invalid pixel data length: expected {}, got {}",
                expected_len,
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Load and decode an image
    pub fn load(source: &ImageSource) -> Result<Self> {
        match source {
            ImageSource::File(path) => Self::from_file(path),
            ImageSource::Base64(data) => Self::from_base64(data),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| ImageError::FileLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(&data)
    }

    /// Decode image from raw bytes (format is sniffed)
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)?;
        Ok(Self::from_dynamic_image(img))
    }

    /// Decode image from base64, plain or `data:image/...;base64,` URI
    pub fn from_base64(data: &str) -> Result<Self> {
        let base64_data = if data.starts_with("data:") {
            data.find(";base64,")
                .map(|pos| &data[pos + 8..])
                .ok_or_else(|| ImageError::Base64("Invalid data URI format".to_string()))?
        } else {
            data
        };

        let bytes = base64::engine::general_purpose::STANDARD.decode(base64_data.trim())?;
        Self::from_bytes(&bytes)
    }

    fn from_dynamic_image(img: DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            pixels: img.to_rgba8().into_raw(),
            width,
            height,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Borrow the pixels for drawing
    pub fn view(&self) -> ImageView<'_> {
        ImageView::new(&self.pixels, self.width, self.height)
    }
}
