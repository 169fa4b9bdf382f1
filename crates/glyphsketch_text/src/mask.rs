//! Glyph masks
//!
//! A glyph mask is a square 8-bit alpha bitmap with the letter drawn centered
//! in it. Texture generators never draw the letter itself; they query the
//! mask to decide where their marks go.
//!
//! Two coordinate systems are supported:
//!
//! - mask pixels, origin at the top-left corner (`alpha`, `is_filled`)
//! - glyph-local, origin at the mask center (`alpha_local`, `contains_local`),
//!   which is where the glyph's canvas position maps to

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::font::{FontFace, FontSet};
use crate::rasterizer::GlyphRasterizer;
use crate::{Result, TextError};

/// Alpha a pixel must exceed to count as inside the letter
pub const FILL_THRESHOLD: u8 = 128;

/// Mask side relative to the font size
pub const MASK_SCALE: f32 = 1.2;

/// Square alpha bitmap of a single letter
#[derive(Clone, PartialEq, Eq)]
pub struct GlyphMask {
    side: u32,
    alpha: Vec<u8>,
}

impl GlyphMask {
    /// A fully transparent mask
    pub fn empty(side: u32) -> Self {
        Self {
            side,
            alpha: vec![0; side as usize * side as usize],
        }
    }

    /// Build a mask from raw row-major alpha values
    pub fn from_alpha(side: u32, alpha: Vec<u8>) -> Result<Self> {
        let expected = side as usize * side as usize;
        if alpha.len() != expected {
            return Err(TextError::InvalidMask {
                expected,
                actual: alpha.len(),
            });
        }
        Ok(Self { side, alpha })
    }

    /// Mask side for a font size: `floor(1.2 * size)`
    ///
    /// The side is floored, so `half()` can sit up to half a pixel below
    /// `0.6 * size` when `1.2 * size` is fractional.
    pub fn side_for(font_size: f32) -> u32 {
        (font_size * MASK_SCALE).floor().max(0.0) as u32
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Side length as a float, the extent generators iterate over
    pub fn bounds(&self) -> f32 {
        self.side as f32
    }

    pub fn half(&self) -> f32 {
        self.side as f32 / 2.0
    }

    /// Alpha at mask coordinates (floored); 0 outside the mask
    pub fn alpha(&self, px: f32, py: f32) -> u8 {
        // Negated comparisons also reject NaN
        if !(px >= 0.0 && py >= 0.0) {
            return 0;
        }
        let (x, y) = (px.floor() as u32, py.floor() as u32);
        if x >= self.side || y >= self.side {
            return 0;
        }
        self.alpha[(y * self.side + x) as usize]
    }

    /// Whether alpha at mask coordinates is strictly above `threshold`
    pub fn exceeds(&self, px: f32, py: f32, threshold: u8) -> bool {
        self.alpha(px, py) > threshold
    }

    /// Whether the mask pixel is inside the letter
    pub fn is_filled(&self, px: f32, py: f32) -> bool {
        self.exceeds(px, py, FILL_THRESHOLD)
    }

    /// Alpha at glyph-local coordinates
    pub fn alpha_local(&self, x: f32, y: f32) -> u8 {
        let half = self.half();
        self.alpha(x + half, y + half)
    }

    /// Whether the glyph-local point is inside the letter
    pub fn contains_local(&self, x: f32, y: f32) -> bool {
        self.alpha_local(x, y) > FILL_THRESHOLD
    }

    /// Number of filled pixels
    pub fn filled_count(&self) -> usize {
        self.alpha.iter().filter(|&&a| a > FILL_THRESHOLD).count()
    }

    /// True when no pixel is filled
    pub fn is_blank(&self) -> bool {
        self.filled_count() == 0
    }
}

impl std::fmt::Debug for GlyphMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphMask")
            .field("side", &self.side)
            .field("filled", &self.filled_count())
            .finish()
    }
}

/// Render `character` centered into a fresh mask
///
/// The advance box is centered horizontally and the em box vertically,
/// the way a canvas draws text with center/middle alignment.
pub fn sample_glyph(
    rasterizer: &mut GlyphRasterizer,
    character: char,
    font: &FontFace,
    font_size: f32,
) -> Result<GlyphMask> {
    let side = GlyphMask::side_for(font_size);
    let mut mask = GlyphMask::empty(side);
    if side == 0 {
        return Ok(mask);
    }

    let glyph_id = font
        .glyph_id(character)
        .ok_or(TextError::GlyphNotFound(character))?;
    let glyph = rasterizer.rasterize(font, glyph_id, font_size)?;

    let metrics = font.metrics();
    let center = side as f32 / 2.0;
    let origin_x = center - glyph.advance / 2.0;
    let baseline =
        center + (metrics.ascender_px(font_size) + metrics.descender_px(font_size)) / 2.0;

    let left = (origin_x + glyph.bearing_x as f32).round() as i64;
    let top = (baseline - glyph.bearing_y as f32).round() as i64;

    for row in 0..glyph.height as i64 {
        let y = top + row;
        if y < 0 || y >= side as i64 {
            continue;
        }
        for col in 0..glyph.width as i64 {
            let x = left + col;
            if x < 0 || x >= side as i64 {
                continue;
            }
            let src = (row * glyph.width as i64 + col) as usize;
            let dst = (y * side as i64 + x) as usize;
            if let Some(&a) = glyph.bitmap.get(src) {
                mask.alpha[dst] = mask.alpha[dst].max(a);
            }
        }
    }

    Ok(mask)
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct MaskKey {
    character: char,
    font: Option<usize>,
    size_bits: u32,
}

/// Produces masks for laid-out letters
///
/// Owns the swash scale context and caches masks per (letter, font, size);
/// the same letters are re-sampled on every redraw.
pub struct GlyphSampler {
    rasterizer: GlyphRasterizer,
    cache: FxHashMap<MaskKey, Arc<GlyphMask>>,
}

impl GlyphSampler {
    pub fn new() -> Self {
        Self {
            rasterizer: GlyphRasterizer::new(),
            cache: FxHashMap::default(),
        }
    }

    /// Mask for a letter drawn with its assigned font (or the default)
    ///
    /// Never fails: when no face is available, or the face cannot render
    /// the letter, the result is a blank mask and the letter draws nothing.
    pub fn sample(
        &mut self,
        character: char,
        font: Option<usize>,
        fonts: &FontSet,
        font_size: f32,
    ) -> Arc<GlyphMask> {
        let key = MaskKey {
            character,
            font,
            size_bits: font_size.to_bits(),
        };
        if let Some(mask) = self.cache.get(&key) {
            return Arc::clone(mask);
        }

        let side = GlyphMask::side_for(font_size);
        let mask = match fonts.resolve(font) {
            Some(face) => match sample_glyph(&mut self.rasterizer, character, face, font_size) {
                Ok(mask) => mask,
                Err(e) => {
                    tracing::warn!("Cannot sample {:?} with {}: {}", character, face.family_name(), e);
                    GlyphMask::empty(side)
                }
            },
            None => {
                tracing::warn!("No font available for {:?}; skipping glyph", character);
                GlyphMask::empty(side)
            }
        };

        let mask = Arc::new(mask);
        self.cache.insert(key, Arc::clone(&mask));
        mask
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}

impl Default for GlyphSampler {
    fn default() -> Self {
        Self::new()
    }
}
