//! glyphsketch Core
//!
//! Foundational types shared by every glyphsketch crate:
//!
//! - **Geometry**: points, sizes, rects and affine transforms
//! - **Color**: straight-alpha RGBA with hex parsing
//! - **Draw Context**: the drawing trait generators paint through, plus a
//!   recording implementation
//! - **Seeded Random**: an explicit, reproducible pseudo-random stream
//! - **Noise**: coherent 3D Perlin noise for organic jitter
//!
//! # Example
//!
//! ```rust
//! use glyphsketch_core::{NoiseField, SeededRandom};
//!
//! let mut rng = SeededRandom::new(12345);
//! let style = rng.index(9);
//! assert!(style < 9);
//!
//! let noise = NoiseField::new(12345);
//! let n = noise.sample(0.2, 0.4, 0.01);
//! assert!((0.0..=1.0).contains(&n));
//! ```

pub mod color;
pub mod draw;
pub mod geometry;
pub mod noise;
pub mod random;

use thiserror::Error;

pub use color::Color;
pub use draw::{
    DrawCommand, DrawContext, DrawContextExt, ImageView, LineCap, LineJoin, Path, PathCommand,
    RecordingContext, Stroke,
};
pub use geometry::{Point, Rect, Size, Transform};
pub use noise::NoiseField;
pub use random::SeededRandom;

/// Core errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
