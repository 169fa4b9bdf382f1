//! glyphsketch Paint/Canvas API
//!
//! A small 2D drawing API, similar to HTML Canvas, used by the texture
//! generators to put marks on a surface.
//!
//! # Features
//!
//! - Transform stack (translate, rotate, scale)
//! - Straight-segment paths, polylines and triangles
//! - Stroked and filled shapes, filled ellipses
//! - Image blits stretched into a rect
//! - A raster context whose pixels can be read back for export
//!
//! Core types are re-exported from glyphsketch_core.
//!
//! # Example
//!
//! ```ignore
//! use glyphsketch_paint::{Color, DrawContext, DrawContextExt, PaintContext, Point};
//!
//! let mut ctx = PaintContext::new(800, 600)?;
//! ctx.clear(Color::WHITE);
//! ctx.translate(50.0, 50.0);
//! ctx.fill_circle(Point::ZERO, 10.0, Color::BLACK);
//! ctx.pop_transform();
//!
//! let pixels = ctx.to_rgba();
//! ```

pub mod context;
mod path;

use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Core type re-exports from glyphsketch_core (unified type system)
// ─────────────────────────────────────────────────────────────────────────────

pub use glyphsketch_core::{
    Color, DrawCommand, DrawContext, DrawContextExt, ImageView, LineCap, LineJoin, Path,
    PathCommand, Point, RecordingContext, Rect, Size, Stroke, Transform,
};

// ─────────────────────────────────────────────────────────────────────────────
// glyphsketch_paint specific exports
// ─────────────────────────────────────────────────────────────────────────────

pub use context::PaintContext;

/// Paint errors
#[derive(Error, Debug)]
pub enum PaintError {
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, PaintError>;
