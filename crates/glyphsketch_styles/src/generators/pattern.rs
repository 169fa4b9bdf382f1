//! Grid-based fill patterns: triangles and dots

use std::f32::consts::PI;

use glyphsketch_core::{DrawContext, DrawContextExt, Point};

use crate::context::{stepped, GlyphContext};
use crate::StyleGenerator;

const TRIANGLE_GRID: f32 = 12.0;
const DOT_GRID: f32 = 3.0;

/// Noise-rotated triangles on a coarse grid
pub struct TrianglePattern;

impl StyleGenerator for TrianglePattern {
    fn render(&self, ctx: &mut dyn DrawContext, glyph: &GlyphContext<'_>) {
        let half = glyph.mask.half();

        for x in stepped(-half, half, TRIANGLE_GRID) {
            for y in stepped(-half, half, TRIANGLE_GRID) {
                if !glyph.filled(x, y) {
                    continue;
                }
                let angle = glyph.noise(x * 0.02, y * 0.02) * PI;
                let s = TRIANGLE_GRID * (0.7 + glyph.noise(x * 0.1, y * 0.1) * 0.6);
                let h = s / 2.0;

                ctx.translate(x, y);
                ctx.rotate(angle);
                ctx.fill_triangle(
                    Point::new(0.0, -h),
                    Point::new(-h, h),
                    Point::new(h, h),
                    glyph.color,
                );
                ctx.pop_transform();
                ctx.pop_transform();
            }
        }
    }
}

/// Jittered dots whose size follows the noise field
pub struct Dotted;

impl StyleGenerator for Dotted {
    fn render(&self, ctx: &mut dyn DrawContext, glyph: &GlyphContext<'_>) {
        let half = glyph.mask.half();

        for x in stepped(-half, half, DOT_GRID) {
            for y in stepped(-half, half, DOT_GRID) {
                if !glyph.filled(x, y) {
                    continue;
                }
                let size = 1.2 + glyph.noise(x * 0.05, y * 0.05) * 5.0;
                let offset_x = glyph.random(-4.8, 4.8);
                let offset_y = glyph.random(-12.8, 12.8);
                ctx.fill_circle(
                    Point::new(x + offset_x, y + offset_y),
                    size / 2.0,
                    glyph.color,
                );
            }
        }
    }
}
