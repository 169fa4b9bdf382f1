//! Draw Context - the drawing API every texture generator paints through
//!
//! The `DrawContext` trait provides a single interface for the 2D operations
//! the renderer needs: a transform stack, path fills and strokes, ellipses and
//! image blits. Two implementations exist:
//!
//! - [`RecordingContext`] records commands (used by tests and dry runs)
//! - [`PaintContext`](crate::PaintContext) rasterizes into a pixel buffer
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     ctx.push_transform(Transform::translate(10.0, 20.0));
//!     ctx.fill_ellipse(Point::ZERO, 4.0, 3.0, Color::BLACK);
//!     ctx.pop_transform();
//! }
//! ```

use smallvec::SmallVec;

use crate::color::Color;
use crate::geometry::{Point, Rect, Size, Transform};

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the endpoint
    Butt,
    /// Rounded cap extending past the endpoint
    #[default]
    Round,
    /// Square cap extending past the endpoint
    Square,
}

/// Line join style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    /// Miter join (sharp corner)
    #[default]
    Miter,
    /// Round join
    Round,
    /// Bevel join (flat corner)
    Bevel,
}

/// Stroke style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Line join style
    pub join: LineJoin,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Round,
            join: LineJoin::Miter,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Types
// ─────────────────────────────────────────────────────────────────────────────

/// Path command for building vector paths
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Move to a point
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Close the current subpath
    Close,
}

/// A vector path made of straight segments
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 4]>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: SmallVec::new(),
        }
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Create a line path
    pub fn line(from: Point, to: Point) -> Self {
        Self::new().move_to(from.x, from.y).line_to(to.x, to.y)
    }

    /// Create an open polyline through the given points
    pub fn polyline(points: &[Point]) -> Self {
        let mut commands = SmallVec::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                commands.push(PathCommand::MoveTo(*p));
            } else {
                commands.push(PathCommand::LineTo(*p));
            }
        }
        Self { commands }
    }

    /// Create a closed triangle path
    pub fn triangle(a: Point, b: Point, c: Point) -> Self {
        Self::new()
            .move_to(a.x, a.y)
            .line_to(b.x, b.y)
            .line_to(c.x, c.y)
            .close()
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over every point the path visits
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|c| match c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            PathCommand::Close => None,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Images
// ─────────────────────────────────────────────────────────────────────────────

/// Borrowed straight-alpha RGBA8 pixels
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a> {
    pub pixels: &'a [u8],
    pub width: u32,
    pub height: u32,
}

impl<'a> ImageView<'a> {
    pub fn new(pixels: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Drawing surface with a transform stack
///
/// Transforms pushed onto the stack compose with the current one; `pop_transform`
/// restores the previous state. The base (identity) transform is never popped.
pub trait DrawContext {
    /// Push a transform, composed with the current transform
    fn push_transform(&mut self, transform: Transform);

    /// Restore the transform in effect before the last push
    fn pop_transform(&mut self);

    /// The fully composed current transform
    fn current_transform(&self) -> Transform;

    /// Fill the whole surface with a color, ignoring the transform
    fn clear(&mut self, color: Color);

    fn fill_path(&mut self, path: &Path, color: Color);

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color);

    /// Fill an axis-aligned ellipse (in local coordinates)
    fn fill_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, color: Color);

    /// Draw an image stretched into `rect`
    fn draw_image(&mut self, image: ImageView<'_>, rect: Rect);

    fn viewport_size(&self) -> Size;
}

/// Extension trait for DrawContext with canvas-style conveniences
pub trait DrawContextExt: DrawContext {
    /// Push a translation transform
    fn translate(&mut self, x: f32, y: f32) {
        self.push_transform(Transform::translate(x, y));
    }

    /// Push a rotation transform (angle in radians)
    fn rotate(&mut self, angle: f32) {
        self.push_transform(Transform::rotate(angle));
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, color: Color) {
        self.stroke_path(&Path::line(from, to), stroke, color);
    }

    /// Stroke an open polyline; fewer than two points draws nothing
    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.stroke_path(&Path::polyline(points), stroke, color);
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, color: Color) {
        self.fill_path(&Path::triangle(a, b, c), color);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.fill_ellipse(center, radius, radius, color);
    }
}

// Blanket implementation for all DrawContext implementers
impl<T: DrawContext + ?Sized> DrawContextExt for T {}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    PushTransform(Transform),
    PopTransform,
    Clear(Color),
    FillPath {
        path: Path,
        color: Color,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
        color: Color,
    },
    FillEllipse {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        color: Color,
    },
    DrawImage {
        size: Size,
        rect: Rect,
    },
}

impl DrawCommand {
    /// Whether this command puts marks on the surface
    pub fn is_mark(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillPath { .. }
                | DrawCommand::StrokePath { .. }
                | DrawCommand::FillEllipse { .. }
        )
    }
}

/// A draw context that records commands for later inspection
#[derive(Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Transform>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![Transform::identity()],
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded commands that draw something
    pub fn mark_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_mark()).count()
    }
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let composed = self.current_transform().then(&transform);
        self.transform_stack.push(composed);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            color,
        });
    }

    fn fill_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, color: Color) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radius_x,
            radius_y,
            color,
        });
    }

    fn draw_image(&mut self, image: ImageView<'_>, rect: Rect) {
        self.commands.push(DrawCommand::DrawImage {
            size: image.size(),
            rect,
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_transform_stack_composes() {
        let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
        ctx.translate(10.0, 0.0);
        ctx.translate(0.0, 5.0);
        assert_eq!(
            ctx.current_transform().transform_point(Point::ZERO),
            Point::new(10.0, 5.0)
        );
        ctx.pop_transform();
        ctx.pop_transform();
        ctx.pop_transform();
        assert_eq!(ctx.current_transform(), Transform::identity());
    }

    #[test]
    fn test_polyline_needs_two_points() {
        let mut ctx = RecordingContext::default();
        ctx.stroke_polyline(&[Point::ZERO], &Stroke::new(1.0), Color::BLACK);
        assert_eq!(ctx.mark_count(), 0);
        ctx.stroke_polyline(
            &[Point::ZERO, Point::new(1.0, 1.0)],
            &Stroke::new(1.0),
            Color::BLACK,
        );
        assert_eq!(ctx.mark_count(), 1);
    }

    #[test]
    fn test_rotated_triangle_fill() {
        let mut ctx = RecordingContext::default();
        ctx.translate(10.0, 10.0);
        ctx.rotate(std::f32::consts::FRAC_PI_2);
        let p = ctx.current_transform().transform_point(Point::new(1.0, 0.0));
        assert!((p.x - 10.0).abs() < 1e-5 && (p.y - 11.0).abs() < 1e-5);

        let (a, b, c) = (Point::new(0.0, -2.0), Point::new(-2.0, 2.0), Point::new(2.0, 2.0));
        ctx.fill_triangle(a, b, c, Color::BLACK);
        assert_eq!(ctx.mark_count(), 1);
        assert_eq!(
            ctx.commands().last(),
            Some(&DrawCommand::FillPath {
                path: Path::triangle(a, b, c),
                color: Color::BLACK,
            })
        );
    }

    #[test]
    fn test_path_points_skip_close() {
        let path = Path::triangle(Point::ZERO, Point::new(1.0, 0.0), Point::new(0.0, 1.0));
        assert_eq!(path.points().count(), 3);
        assert_eq!(path.commands().len(), 4);
    }

    #[test]
    fn test_implements_draw_context() {
        fn use_draw_context(ctx: &mut dyn DrawContext) {
            ctx.fill_ellipse(Point::ZERO, 2.0, 1.0, Color::BLACK);
        }

        let mut ctx = RecordingContext::default();
        use_draw_context(&mut ctx);
        assert_eq!(ctx.commands().len(), 1);
    }
}
