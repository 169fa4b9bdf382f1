//! glyphsketch Styles
//!
//! Procedural textures that fill a letter's silhouette. Each letter carries a
//! style index from layout; the mapping picks a generator, which probes the
//! letter's [`GlyphMask`] and puts strokes, triangles or ellipses wherever
//! the letter is filled.
//!
//! Generators are deterministic: the random stream is reseeded per letter
//! from (seed, letter, style, frame) and the noise field is keyed by the
//! global seed.
//!
//! # Example
//!
//! ```ignore
//! use glyphsketch_styles::{render_glyph, GlyphJob, StyleMapping};
//!
//! render_glyph(&mut ctx, &GlyphJob {
//!     descriptor: &descriptor,
//!     mask: &mask,
//!     color,
//!     noise: &noise,
//!     seed: 12345,
//!     frame: 20,
//! }, &StyleMapping::default());
//! ```

pub mod context;
pub mod generators;
pub mod style;

use glyphsketch_core::{Color, DrawContext, DrawContextExt, NoiseField};
use glyphsketch_text::{GlyphDescriptor, GlyphMask};

pub use context::{local_seed, GlyphContext};
pub use style::{style_name, Style, StyleMapping};

/// A letter texture generator
///
/// The surface is translated to the letter's center before `render` is
/// called; draw in glyph-local coordinates.
pub trait StyleGenerator: Sync {
    fn render(&self, ctx: &mut dyn DrawContext, glyph: &GlyphContext<'_>);
}

/// One letter to draw
pub struct GlyphJob<'a> {
    pub descriptor: &'a GlyphDescriptor,
    pub mask: &'a GlyphMask,
    pub color: Color,
    pub noise: &'a NoiseField,
    /// Global seed
    pub seed: i64,
    pub frame: u64,
}

/// Draw one letter with its assigned texture
///
/// Returns the style actually drawn, or `None` when the style index is out
/// of range or the mask is blank.
pub fn render_glyph(
    ctx: &mut dyn DrawContext,
    job: &GlyphJob<'_>,
    mapping: &StyleMapping,
) -> Option<Style> {
    let descriptor = job.descriptor;
    let Some(style) = mapping.resolve(descriptor.style_index) else {
        tracing::warn!(
            "Glyph {:?} has unknown style index {}",
            descriptor.character,
            descriptor.style_index
        );
        return None;
    };
    if job.mask.is_blank() {
        return None;
    }

    let seed = local_seed(
        job.seed,
        descriptor.character,
        descriptor.style_index,
        job.frame,
    );
    let glyph = GlyphContext::new(job.mask, job.color, job.noise, job.frame, seed);

    ctx.translate(descriptor.x, descriptor.y);
    style.generator().render(ctx, &glyph);
    ctx.pop_transform();

    Some(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphsketch_core::{DrawCommand, Point, RecordingContext, Size, Transform};

    /// Filled disk of radius `side / 3` centered in the mask
    fn disk_mask(side: u32) -> GlyphMask {
        let c = side as f32 / 2.0;
        let r = side as f32 / 3.0;
        let mut alpha = Vec::with_capacity((side * side) as usize);
        for y in 0..side {
            for x in 0..side {
                let d = Point::new(x as f32 + 0.5, y as f32 + 0.5).distance(Point::new(c, c));
                alpha.push(if d <= r { 255 } else { 0 });
            }
        }
        GlyphMask::from_alpha(side, alpha).unwrap()
    }

    fn draw(style: Style, mask: &GlyphMask, seed: i64, frame: u64) -> Vec<DrawCommand> {
        let noise = NoiseField::new(seed as u64);
        let glyph = GlyphContext::new(
            mask,
            Color::BLACK,
            &noise,
            frame,
            local_seed(seed, 'A', style.index(), frame),
        );
        let mut ctx = RecordingContext::new(Size::new(200.0, 200.0));
        style.generator().render(&mut ctx, &glyph);
        ctx.take_commands()
    }

    /// Points each mark touches, mapped through the transform in effect
    fn mark_points(commands: &[DrawCommand]) -> Vec<Point> {
        let mut stack = vec![Transform::identity()];
        let mut points = Vec::new();
        for command in commands {
            let current = *stack.last().unwrap();
            match command {
                DrawCommand::PushTransform(t) => stack.push(current.then(t)),
                DrawCommand::PopTransform => {
                    stack.pop();
                }
                DrawCommand::StrokePath { path, .. } | DrawCommand::FillPath { path, .. } => {
                    points.extend(path.points().map(|p| current.transform_point(p)));
                }
                DrawCommand::FillEllipse { center, .. } => {
                    points.push(current.transform_point(*center));
                }
                _ => {}
            }
        }
        points
    }

    #[test]
    fn test_every_style_draws_inside_bounds() {
        let mask = disk_mask(120);
        let limit = mask.half() + 16.0;
        for style in Style::ALL {
            let commands = draw(style, &mask, 12345, 20);
            let points = mark_points(&commands);
            assert!(!points.is_empty(), "{} drew nothing", style.name());
            for p in points {
                assert!(
                    p.x.abs() <= limit && p.y.abs() <= limit,
                    "{} drew at {:?}",
                    style.name(),
                    p
                );
            }
        }
    }

    #[test]
    fn test_generators_are_deterministic() {
        let mask = disk_mask(90);
        for style in Style::ALL {
            assert_eq!(draw(style, &mask, 7, 40), draw(style, &mask, 7, 40));
        }
    }

    #[test]
    fn test_frames_vary_texture() {
        let mask = disk_mask(90);
        assert_ne!(
            draw(Style::Scribble, &mask, 7, 20),
            draw(Style::Scribble, &mask, 7, 40)
        );
        assert_ne!(
            draw(Style::Watercolor, &mask, 7, 20),
            draw(Style::Watercolor, &mask, 7, 40)
        );
        assert_ne!(
            draw(Style::DenseDiagonal, &mask, 7, 20),
            draw(Style::DenseDiagonal, &mask, 7, 40)
        );
    }

    #[test]
    fn test_blank_mask_draws_nothing() {
        let mask = GlyphMask::empty(60);
        for style in Style::ALL {
            let commands = draw(style, &mask, 1, 1);
            assert!(commands.iter().all(|c| !c.is_mark()), "{}", style.name());
        }
    }

    #[test]
    fn test_outline_edges_hug_the_rim() {
        let mask = disk_mask(90);
        let noise = NoiseField::new(1);
        let glyph = GlyphContext::new(&mask, Color::BLACK, &noise, 0, 1);
        let edges = generators::HanddrawnOutline::edge_points(&glyph);
        assert!(!edges.is_empty());
        for p in edges {
            let r = p.distance(Point::ZERO);
            assert!(r > 30.0 - 6.0 && r <= 30.0 + 1.0, "edge at radius {}", r);
        }
    }

    #[test]
    fn test_render_glyph_translates_and_restores() {
        let mask = disk_mask(60);
        let noise = NoiseField::new(3);
        let descriptor = GlyphDescriptor {
            character: 'O',
            x: 100.0,
            y: 80.0,
            style_index: 7,
            font: None,
            line_index: 0,
            char_index: 0,
        };
        let job = GlyphJob {
            descriptor: &descriptor,
            mask: &mask,
            color: Color::RED,
            noise: &noise,
            seed: 3,
            frame: 1,
        };

        let mut ctx = RecordingContext::new(Size::new(200.0, 200.0));
        let drawn = render_glyph(&mut ctx, &job, &StyleMapping::default());
        assert_eq!(drawn, Some(Style::Dotted));
        assert_eq!(ctx.current_transform(), Transform::identity());
        assert_eq!(
            ctx.commands().first(),
            Some(&DrawCommand::PushTransform(Transform::translate(100.0, 80.0)))
        );
        assert!(ctx.mark_count() > 0);

        let canvas_points = mark_points(ctx.commands());
        assert!(canvas_points
            .iter()
            .all(|p| (p.x - 100.0).abs() < 50.0 && (p.y - 80.0).abs() < 50.0));
    }

    #[test]
    fn test_render_glyph_skips_bad_input() {
        let noise = NoiseField::new(3);
        let descriptor = |style_index| GlyphDescriptor {
            character: 'X',
            x: 0.0,
            y: 0.0,
            style_index,
            font: None,
            line_index: 0,
            char_index: 0,
        };
        let unknown_style = descriptor(12);
        let plain = descriptor(0);
        let mask = disk_mask(30);
        let blank = GlyphMask::empty(30);
        fn job<'a>(
            descriptor: &'a GlyphDescriptor,
            mask: &'a GlyphMask,
            noise: &'a NoiseField,
        ) -> GlyphJob<'a> {
            GlyphJob {
                descriptor,
                mask,
                color: Color::BLACK,
                noise,
                seed: 1,
                frame: 1,
            }
        }

        let mut ctx = RecordingContext::default();
        let mapping = StyleMapping::default();
        assert_eq!(render_glyph(&mut ctx, &job(&unknown_style, &mask, &noise), &mapping), None);
        assert_eq!(render_glyph(&mut ctx, &job(&plain, &blank, &noise), &mapping), None);
        assert!(ctx.commands().is_empty());
    }
}
