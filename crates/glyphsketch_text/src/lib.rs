//! Text handling for glyphsketch
//!
//! This crate provides:
//! - Font loading and parsing (TTF/OTF via ttf-parser) and the font set
//! - Default font discovery (fontdb)
//! - Glyph rasterization (swash)
//! - Glyph masks: letters rendered into square alpha bitmaps
//! - Letter layout: text to positioned, styled glyph descriptors

pub mod font;
pub mod layout;
pub mod mask;
pub mod rasterizer;
pub mod registry;

pub use font::{FontFace, FontMetrics, FontSet};
pub use layout::{
    calculate_layout, parse_lines, Alignment, GlyphDescriptor, LayoutEngine, LayoutParameters,
    STYLE_COUNT,
};
pub use mask::{sample_glyph, GlyphMask, GlyphSampler};
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
pub use registry::{load_default_face, SystemFonts};

use thiserror::Error;

/// Text errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to load font: {0}")]
    FontLoadError(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Glyph not found for codepoint: {0:?}")]
    GlyphNotFound(char),

    #[error("Invalid font data")]
    InvalidFontData,

    #[error("No sans-serif system font found")]
    NoDefaultFont,

    #[error("Mask data has {actual} bytes, expected {expected}")]
    InvalidMask { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, TextError>;
