//! Ellipse-stamp textures: watercolor and bold brush

use std::f32::consts::TAU;

use glyphsketch_core::{DrawContext, Point};

use crate::context::{stepped, GlyphContext};
use crate::StyleGenerator;

/// Alpha a watercolor sample must exceed
const WATERCOLOR_THRESHOLD: u8 = 228;
const WATERCOLOR_LAYERS: usize = 4;
const WATERCOLOR_SAMPLES: usize = 200;

/// Translucent blots scattered over the letter's core
pub struct Watercolor;

impl StyleGenerator for Watercolor {
    fn render(&self, ctx: &mut dyn DrawContext, glyph: &GlyphContext<'_>) {
        let half = glyph.mask.half();

        for _ in 0..WATERCOLOR_LAYERS {
            for _ in 0..WATERCOLOR_SAMPLES {
                let x = glyph.random(-half, half);
                let y = glyph.random(-half, half);
                if !glyph
                    .mask
                    .exceeds(x + half, y + half, WATERCOLOR_THRESHOLD)
                {
                    continue;
                }
                let alpha = (215.0 + glyph.random_up_to(20.0)) / 255.0;
                let size = glyph.random(3.0, 15.0);
                let offset_x = glyph.random(-3.0, 3.0);
                let offset_y = glyph.random(-3.0, 3.0);
                let radius = size / 2.0;
                ctx.fill_ellipse(
                    Point::new(x + offset_x, y + offset_y),
                    radius,
                    radius,
                    glyph.color.with_alpha(alpha),
                );
            }
        }
    }
}

/// Flattened dabs laid along rays from the letter's center
pub struct BoldBrush;

impl StyleGenerator for BoldBrush {
    fn render(&self, ctx: &mut dyn DrawContext, glyph: &GlyphContext<'_>) {
        let half = glyph.mask.half();

        for angle in stepped(0.0, TAU, 0.08) {
            let (sin, cos) = angle.sin_cos();
            for r in stepped(0.0, half, 2.0) {
                let x = cos * r;
                let y = sin * r;
                if !glyph.filled(x, y) {
                    continue;
                }
                let size = 5.0 + glyph.noise(angle * 5.0, r * 0.05) * 2.0;
                let offset_x = glyph.noise(angle * 10.0, r * 0.1) * 3.0 - 1.5;
                let offset_y = glyph.noise(angle * 10.0 + 100.0, r * 0.1) * 3.0 - 1.5;
                ctx.fill_ellipse(
                    Point::new(x + offset_x, y + offset_y),
                    size / 2.0,
                    size * 0.35,
                    glyph.color,
                );
            }
        }
    }
}
