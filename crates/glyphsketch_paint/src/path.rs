//! Path conversion to the raster backend

use glyphsketch_core::{Path, PathCommand};

/// Convert a path into a tiny-skia path (None for empty or degenerate paths)
pub(crate) fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
            PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
            PathCommand::Close => builder.close(),
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphsketch_core::Point;

    #[test]
    fn test_empty_path_has_no_skia_path() {
        assert!(to_skia_path(&Path::new()).is_none());
        assert!(to_skia_path(&Path::line(Point::ZERO, Point::new(5.0, 5.0))).is_some());
    }

    #[test]
    fn test_triangle_bounds() {
        let triangle = Path::triangle(
            Point::new(0.0, -4.0),
            Point::new(-4.0, 4.0),
            Point::new(4.0, 4.0),
        );
        let bounds = to_skia_path(&triangle).unwrap().bounds();
        assert_eq!((bounds.left(), bounds.top()), (-4.0, -4.0));
        assert_eq!((bounds.right(), bounds.bottom()), (4.0, 4.0));
    }
}
