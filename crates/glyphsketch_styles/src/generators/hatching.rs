//! Line-field textures: diagonal hatching, vertical strokes, dense diagonals

use glyphsketch_core::{DrawContext, DrawContextExt, Point, Stroke};

use crate::context::{stepped, GlyphContext};
use crate::StyleGenerator;

/// Noise time advance per frame for the dense diagonal wobble
const DENSE_TIME_STEP: f32 = 0.005;

/// Short slanted dashes on a sheared grid
pub struct DiagonalLines;

impl StyleGenerator for DiagonalLines {
    fn render(&self, ctx: &mut dyn DrawContext, glyph: &GlyphContext<'_>) {
        let half = glyph.mask.half();
        let stroke = Stroke::new(2.0);

        for i in stepped(-half, half, 6.0) {
            for j in stepped(-half, half, 1.0) {
                let x = i + j * 0.5;
                let y = j;
                if !glyph.filled(x, y) {
                    continue;
                }
                let offset = glyph.noise(i * 0.02, j * 0.02) * 3.0 - 1.5;
                let len = 6.0 + glyph.random(-1.0, 1.0);
                ctx.stroke_line(
                    Point::new(x + offset, y),
                    Point::new(x + len + offset, y + len),
                    &stroke,
                    glyph.color,
                );
            }
        }
    }
}

/// One wavering vertical stroke per filled column
pub struct VerticalLines;

impl StyleGenerator for VerticalLines {
    fn render(&self, ctx: &mut dyn DrawContext, glyph: &GlyphContext<'_>) {
        let half = glyph.mask.half();

        for x in stepped(-half, half, 4.0) {
            let column: Vec<Point> = stepped(-half, half, 2.0)
                .filter(|&y| glyph.filled(x, y))
                .map(|y| Point::new(x, y))
                .collect();
            if column.is_empty() {
                continue;
            }

            let stroke = Stroke::new(1.5 + glyph.random(-0.3, 0.8));
            let points: Vec<Point> = column
                .iter()
                .map(|p| {
                    let offset = glyph.noise(p.x * 0.02, p.y * 0.02) * 2.0 - 1.0;
                    Point::new(p.x + offset, p.y)
                })
                .collect();
            ctx.stroke_polyline(&points, &stroke, glyph.color);
        }
    }
}

/// Tight 45° polylines displaced by high-frequency noise
pub struct DenseDiagonal;

impl StyleGenerator for DenseDiagonal {
    fn render(&self, ctx: &mut dyn DrawContext, glyph: &GlyphContext<'_>) {
        let bounds = glyph.mask.bounds();
        let half = glyph.mask.half();
        let stroke = Stroke::new(1.0);
        let time = glyph.frame as f32 * DENSE_TIME_STEP;

        for i in stepped(-bounds, bounds, 2.0) {
            let run: Vec<Point> = stepped(-half, half, 1.0)
                .map(|j| Point::new(i + j, j))
                .filter(|p| glyph.filled(p.x, p.y))
                .collect();
            if run.len() <= 2 {
                continue;
            }

            let points: Vec<Point> = run
                .iter()
                .map(|p| {
                    let offset = glyph.noise_at(p.x * 2.21, p.y * 2.21, time) * 11.5 - 1.75;
                    Point::new(p.x + offset, p.y + offset)
                })
                .collect();
            ctx.stroke_polyline(&points, &stroke, glyph.color);
        }
    }
}
