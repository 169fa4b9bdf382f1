//! Paint context - Canvas-like drawing API backed by a CPU pixmap
//!
//! PaintContext implements the DrawContext trait by rasterizing every call
//! straight into a tiny-skia pixmap, so a finished frame can be read back
//! as RGBA pixels for export.

use tiny_skia::{FillRule, IntSize, Paint, Pixmap, PixmapPaint};

use glyphsketch_core::{
    Color, DrawContext, ImageView, LineCap, LineJoin, Path, Point, Rect, Size, Stroke, Transform,
};

use crate::path::to_skia_path;
use crate::{PaintError, Result};

/// Raster drawing surface
pub struct PaintContext {
    pixmap: Pixmap,
    transform_stack: Vec<Transform>,
}

impl PaintContext {
    /// Create a new paint context with the given pixel size, cleared to transparent
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(PaintError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            transform_stack: vec![Transform::identity()],
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Read a single pixel as straight-alpha RGBA8
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Copy the surface out as straight-alpha RGBA8 rows
    pub fn to_rgba(&self) -> Vec<u8> {
        unpremultiply_alpha(self.pixmap.data())
    }

    fn paint_for(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = true;
        paint
    }

    fn current_skia_transform(&self) -> tiny_skia::Transform {
        skia_transform(self.current_transform())
    }
}

impl DrawContext for PaintContext {
    fn push_transform(&mut self, transform: Transform) {
        let composed = self.current_transform().then(&transform);
        self.transform_stack.push(composed);
    }

    fn pop_transform(&mut self) {
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn clear(&mut self, color: Color) {
        self.pixmap.fill(skia_color(color));
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let Some(skia_path) = to_skia_path(path) else {
            return;
        };
        let transform = self.current_skia_transform();
        self.pixmap.fill_path(
            &skia_path,
            &Self::paint_for(color),
            FillRule::Winding,
            transform,
            None,
        );
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color) {
        let Some(skia_path) = to_skia_path(path) else {
            return;
        };
        let skia_stroke = tiny_skia::Stroke {
            width: stroke.width.max(0.0),
            line_cap: match stroke.cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match stroke.join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..Default::default()
        };
        let transform = self.current_skia_transform();
        self.pixmap.stroke_path(
            &skia_path,
            &Self::paint_for(color),
            &skia_stroke,
            transform,
            None,
        );
    }

    fn fill_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, color: Color) {
        let Some(oval) = tiny_skia::Rect::from_xywh(
            center.x - radius_x,
            center.y - radius_y,
            radius_x * 2.0,
            radius_y * 2.0,
        ) else {
            return;
        };
        let Some(skia_path) = tiny_skia::PathBuilder::from_oval(oval) else {
            return;
        };
        let transform = self.current_skia_transform();
        self.pixmap.fill_path(
            &skia_path,
            &Self::paint_for(color),
            FillRule::Winding,
            transform,
            None,
        );
    }

    fn draw_image(&mut self, image: ImageView<'_>, rect: Rect) {
        if image.width == 0 || image.height == 0 {
            return;
        }
        let expected = image.width as usize * image.height as usize * 4;
        if image.pixels.len() != expected {
            tracing::warn!(
                "Skipping image blit: expected {} bytes, got {}",
                expected,
                image.pixels.len()
            );
            return;
        }
        let Some(size) = IntSize::from_wh(image.width, image.height) else {
            return;
        };
        let Some(source) = Pixmap::from_vec(premultiply_alpha(image.pixels), size) else {
            return;
        };

        let fit = Transform::translate(rect.x(), rect.y()).then(&Transform::scale(
            rect.width() / image.width as f32,
            rect.height() / image.height as f32,
        ));
        let transform = skia_transform(self.current_transform().then(&fit));

        let paint = PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..Default::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    fn viewport_size(&self) -> Size {
        Size::new(self.pixmap.width() as f32, self.pixmap.height() as f32)
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        color.r.clamp(0.0, 1.0),
        color.g.clamp(0.0, 1.0),
        color.b.clamp(0.0, 1.0),
        color.a.clamp(0.0, 1.0),
    )
    .unwrap_or(tiny_skia::Color::BLACK)
}

fn skia_transform(transform: Transform) -> tiny_skia::Transform {
    let [a, b, c, d, tx, ty] = transform.elements;
    tiny_skia::Transform::from_row(a, b, c, d, tx, ty)
}

/// Convert straight alpha to premultiplied alpha (tiny-skia's storage format)
fn premultiply_alpha(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());
    for chunk in data.chunks_exact(4) {
        let a = chunk[3] as u16;
        let mul = |c: u8| ((c as u16 * a + 127) / 255) as u8;
        result.extend_from_slice(&[mul(chunk[0]), mul(chunk[1]), mul(chunk[2]), chunk[3]]);
    }
    result
}

/// Convert premultiplied alpha to straight alpha
fn unpremultiply_alpha(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());

    for chunk in data.chunks_exact(4) {
        let a = chunk[3] as f32 / 255.0;
        if a > 0.0 {
            let r = ((chunk[0] as f32 / a).min(255.0)) as u8;
            let g = ((chunk[1] as f32 / a).min(255.0)) as u8;
            let b = ((chunk[2] as f32 / a).min(255.0)) as u8;
            result.extend_from_slice(&[r, g, b, chunk[3]]);
        } else {
            result.extend_from_slice(&[0, 0, 0, 0]);
        }
    }

    result
}
