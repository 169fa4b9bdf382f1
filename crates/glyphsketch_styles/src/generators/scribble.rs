//! Scribble texture

use glyphsketch_core::{DrawContext, DrawContextExt, Point, Stroke};

use crate::context::GlyphContext;
use crate::StyleGenerator;

const WALKS: usize = 66;
const STEPS: usize = 110;
const STEP_X: f32 = 18.0;
const STEP_Y: f32 = 10.0;

/// Random walks whose vertices are kept only inside the letter
pub struct Scribble;

impl StyleGenerator for Scribble {
    fn render(&self, ctx: &mut dyn DrawContext, glyph: &GlyphContext<'_>) {
        let half = glyph.mask.half();
        let stroke = Stroke::new(1.0);

        for _ in 0..WALKS {
            let mut x = glyph.random(-half, half);
            let mut y = glyph.random(-half, half);
            let mut vertices = Vec::new();

            for _ in 0..STEPS {
                if glyph.filled(x, y) {
                    vertices.push(Point::new(x, y));
                }
                x = (x + glyph.random(-STEP_X, STEP_X)).clamp(-half, half);
                y = (y + glyph.random(-STEP_Y, STEP_Y)).clamp(-half, half);
            }

            ctx.stroke_polyline(&vertices, &stroke, glyph.color);
        }
    }
}
