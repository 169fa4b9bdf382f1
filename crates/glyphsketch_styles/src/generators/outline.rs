//! Hand-drawn outline texture

use glyphsketch_core::{DrawContext, DrawContextExt, Point, Stroke};
use glyphsketch_text::mask::FILL_THRESHOLD;

use crate::context::{stepped, GlyphContext};
use crate::StyleGenerator;

const GRID_STEP: f32 = 3.0;
const MAX_SEGMENT: f32 = 80.0;
const SEGMENT_CHANCE: f32 = 0.2;

/// Broken, doubled contour traced along the letter's edge
pub struct HanddrawnOutline;

impl HanddrawnOutline {
    /// Filled grid cells with at least one clear neighbour, in glyph-local
    /// coordinates and scan order (column by column)
    pub fn edge_points(glyph: &GlyphContext<'_>) -> Vec<Point> {
        let mask = glyph.mask;
        let bounds = mask.bounds();
        let half = mask.half();
        let in_range = |v: f32| v >= 0.0 && v < bounds;

        let mut edges = Vec::new();
        for x in stepped(0.0, bounds, GRID_STEP) {
            for y in stepped(0.0, bounds, GRID_STEP) {
                if !mask.is_filled(x, y) {
                    continue;
                }
                let is_edge = [-GRID_STEP, 0.0, GRID_STEP].iter().any(|&dx| {
                    [-GRID_STEP, 0.0, GRID_STEP].iter().any(|&dy| {
                        let (nx, ny) = (x + dx, y + dy);
                        !(dx == 0.0 && dy == 0.0)
                            && in_range(nx)
                            && in_range(ny)
                            && mask.alpha(nx, ny) < FILL_THRESHOLD
                    })
                });
                if is_edge {
                    edges.push(Point::new(x - half, y - half));
                }
            }
        }
        edges
    }
}

impl StyleGenerator for HanddrawnOutline {
    fn render(&self, ctx: &mut dyn DrawContext, glyph: &GlyphContext<'_>) {
        let edges = Self::edge_points(glyph);

        for layer in 0..2 {
            let stroke = Stroke::new(5.0 - layer as f32 * 2.5);
            let lane = layer as f32 * 10.0;
            let jitter = |i: usize, shift: f32| glyph.noise(i as f32 * 0.1 + shift, lane) * 2.0 - 1.0;

            for (i, pair) in edges.windows(2).enumerate() {
                if !glyph.chance(SEGMENT_CHANCE) {
                    continue;
                }
                let (p1, p2) = (pair[0], pair[1]);
                if p1.distance(p2) >= MAX_SEGMENT {
                    continue;
                }
                ctx.stroke_line(
                    Point::new(p1.x + jitter(i, 0.0), p1.y + jitter(i, 100.0)),
                    Point::new(p2.x + jitter(i + 1, 0.0), p2.y + jitter(i + 1, 100.0)),
                    &stroke,
                    glyph.color,
                );
            }
        }
    }
}
