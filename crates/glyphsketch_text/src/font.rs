//! Font loading and the font set used for per-letter font selection

use std::path::Path;
use std::sync::Arc;

use crate::{Result, TextError};

/// Font metrics in font units
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMetrics {
    /// Units per em (typically 1000 or 2048)
    pub units_per_em: u16,
    /// Ascender (positive, above baseline)
    pub ascender: i16,
    /// Descender (negative, below baseline)
    pub descender: i16,
    /// Line gap
    pub line_gap: i16,
}

impl FontMetrics {
    /// Scale a value from font units to pixels
    pub fn scale(&self, value: i16, font_size: f32) -> f32 {
        if self.units_per_em == 0 {
            return 0.0;
        }
        value as f32 * font_size / self.units_per_em as f32
    }

    /// Ascender in pixels
    pub fn ascender_px(&self, font_size: f32) -> f32 {
        self.scale(self.ascender, font_size)
    }

    /// Descender in pixels (negative)
    pub fn descender_px(&self, font_size: f32) -> f32 {
        self.scale(self.descender, font_size)
    }
}

/// A parsed font face
pub struct FontFace {
    /// Raw font data (kept alive for ttf-parser and swash)
    data: Arc<Vec<u8>>,
    /// Face index within the font file (for TTC files)
    face_index: u32,
    metrics: FontMetrics,
    family_name: String,
}

impl FontFace {
    /// Load a font from raw TTF/OTF data (uses face index 0)
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_with_index(data, 0)
    }

    /// Load a font from raw TTF/OTF data with a specific face index
    pub fn from_data_with_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let data = Arc::new(data);

        let face = ttf_parser::Face::parse(&data, face_index)
            .map_err(|e| TextError::FontParseError(format!("{:?}", e)))?;

        let metrics = FontMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
        };

        let family_name = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::FAMILY)
            .and_then(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Self {
            data,
            face_index,
            metrics,
            family_name,
        })
    }

    /// Load a font from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            TextError::FontLoadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_data(data)
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Raw font data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Face index within the font file
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    fn as_ttf_face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.face_index).ok()
    }

    /// Glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.as_ttf_face()
            .and_then(|face| face.glyph_index(c))
            .map(|id| id.0)
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family_name", &self.family_name)
            .field("face_index", &self.face_index)
            .finish()
    }
}

/// The fonts letters may be drawn with
///
/// Layout assigns each letter an optional index into `faces`; `None` (or an
/// index past the end) resolves to the default face. Faces are loaded once
/// and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    faces: Vec<Arc<FontFace>>,
    default: Option<Arc<FontFace>>,
}

impl FontSet {
    /// An empty set with no default face
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every readable font in `paths`
    ///
    /// Files that fail to load are skipped with a warning so one bad path
    /// does not take the others down.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut set = Self::new();
        for path in paths {
            let path = path.as_ref();
            match FontFace::from_file(path) {
                Ok(face) => {
                    tracing::debug!("Loaded font {} ({})", path.display(), face.family_name());
                    set.faces.push(Arc::new(face));
                }
                Err(e) => tracing::warn!("Skipping font: {}", e),
            }
        }
        set
    }

    /// Set the face used for letters without an assigned font
    pub fn with_default(mut self, face: FontFace) -> Self {
        self.default = Some(Arc::new(face));
        self
    }

    /// Number of selectable faces (excludes the default)
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FontFace> {
        self.faces.get(index).map(|f| f.as_ref())
    }

    pub fn default_face(&self) -> Option<&FontFace> {
        self.default.as_deref()
    }

    /// Face to draw with for an assigned font index
    pub fn resolve(&self, font: Option<usize>) -> Option<&FontFace> {
        font.and_then(|i| self.get(i)).or_else(|| self.default_face())
    }

    /// Display label for an assigned font index ("Font 2", "Default font")
    pub fn label(font: Option<usize>) -> String {
        match font {
            Some(i) => format!("Font {}", i + 1),
            None => "Default font".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_scale() {
        let metrics = FontMetrics {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            line_gap: 0,
        };
        assert_eq!(metrics.ascender_px(100.0), 80.0);
        assert_eq!(metrics.descender_px(100.0), -20.0);
        assert_eq!(FontMetrics::default().ascender_px(100.0), 0.0);
    }

    #[test]
    fn test_invalid_font_data() {
        assert!(FontFace::from_data(vec![0, 1, 2, 3]).is_err());
        assert!(FontFace::from_file(Path::new("/nonexistent/font.ttf")).is_err());
    }

    #[test]
    fn test_load_skips_missing_files() {
        let set = FontSet::load(&["/nonexistent/a.ttf", "/nonexistent/b.otf"]);
        assert!(set.is_empty());
        assert!(set.resolve(Some(0)).is_none());
        assert!(set.resolve(None).is_none());
    }

    #[test]
    fn test_font_labels() {
        assert_eq!(FontSet::label(Some(0)), "Font 1");
        assert_eq!(FontSet::label(Some(2)), "Font 3");
        assert_eq!(FontSet::label(None), "Default font");
    }
}
