//! Per-glyph generator input

use std::cell::RefCell;

use glyphsketch_core::{Color, NoiseField, SeededRandom};
use glyphsketch_text::GlyphMask;

/// Noise time advance per frame
pub const NOISE_TIME_STEP: f32 = 0.01;

/// Seed for one letter's texture on one frame
///
/// Depends on the letter, its style and the frame, so identical letters in
/// the same style still differ from frame to frame but repeat exactly for
/// the same inputs.
pub fn local_seed(seed: i64, character: char, style_index: u8, frame: u64) -> i64 {
    seed.wrapping_add(character as i64)
        .wrapping_add(style_index as i64 * 1000)
        .wrapping_add(frame as i64)
}

/// Everything a texture generator reads while drawing one letter
pub struct GlyphContext<'a> {
    pub mask: &'a GlyphMask,
    pub color: Color,
    pub noise: &'a NoiseField,
    pub frame: u64,
    rng: RefCell<SeededRandom>,
}

impl<'a> GlyphContext<'a> {
    pub fn new(
        mask: &'a GlyphMask,
        color: Color,
        noise: &'a NoiseField,
        frame: u64,
        seed: i64,
    ) -> Self {
        Self {
            mask,
            color,
            noise,
            frame,
            rng: RefCell::new(SeededRandom::new(seed)),
        }
    }

    /// Noise time coordinate for this frame
    pub fn time(&self) -> f32 {
        self.frame as f32 * NOISE_TIME_STEP
    }

    /// Noise in [0, 1] at (x, y) for this frame
    pub fn noise(&self, x: f32, y: f32) -> f32 {
        self.noise.sample(x, y, self.time())
    }

    /// Noise in [0, 1] at an explicit time coordinate
    pub fn noise_at(&self, x: f32, y: f32, z: f32) -> f32 {
        self.noise.sample(x, y, z)
    }

    /// Uniform value between `low` and `high`
    pub fn random(&self, low: f32, high: f32) -> f32 {
        self.rng.borrow_mut().range(low, high)
    }

    /// Uniform value in [0, high)
    pub fn random_up_to(&self, high: f32) -> f32 {
        self.rng.borrow_mut().up_to(high)
    }

    pub fn chance(&self, p: f32) -> bool {
        self.rng.borrow_mut().chance(p)
    }

    /// Whether the glyph-local point is inside the letter
    pub fn filled(&self, x: f32, y: f32) -> bool {
        self.mask.contains_local(x, y)
    }
}

/// Values `start, start + step, ...` strictly below `end`
pub(crate) fn stepped(start: f32, end: f32, step: f32) -> impl Iterator<Item = f32> {
    (0u32..)
        .map(move |k| start + k as f32 * step)
        .take_while(move |v| *v < end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_seed_formula() {
        assert_eq!(local_seed(12345, 'A', 2, 7), 12345 + 65 + 2000 + 7);
        assert_ne!(local_seed(1, 'A', 0, 1), local_seed(1, 'A', 0, 2));
        assert_eq!(local_seed(i64::MAX, 'A', 0, 0), i64::MAX.wrapping_add(65));
    }

    #[test]
    fn test_stepped() {
        let values: Vec<f32> = stepped(-3.0, 3.0, 2.0).collect();
        assert_eq!(values, vec![-3.0, -1.0, 1.0]);
        assert_eq!(stepped(0.0, 0.0, 1.0).count(), 0);
    }

    #[test]
    fn test_context_stream_is_reproducible() {
        let mask = GlyphMask::empty(4);
        let noise = NoiseField::new(1);
        let a = GlyphContext::new(&mask, Color::BLACK, &noise, 3, 99);
        let b = GlyphContext::new(&mask, Color::BLACK, &noise, 3, 99);
        for _ in 0..10 {
            assert_eq!(a.random(-1.0, 1.0), b.random(-1.0, 1.0));
        }
        assert!((a.time() - 0.03).abs() < 1e-6);
    }
}
