//! The nine texture generators
//!
//! Every generator draws in glyph-local coordinates: the surface is already
//! translated to the letter's center, and the mask is probed with
//! [`GlyphContext::filled`](crate::GlyphContext::filled).

mod brush;
mod hatching;
mod outline;
mod pattern;
mod scribble;

pub use brush::{BoldBrush, Watercolor};
pub use hatching::{DenseDiagonal, DiagonalLines, VerticalLines};
pub use outline::HanddrawnOutline;
pub use pattern::{Dotted, TrianglePattern};
pub use scribble::Scribble;
