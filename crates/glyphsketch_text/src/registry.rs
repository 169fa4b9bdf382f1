//! System font discovery for the default face
//!
//! Letters without an assigned font are drawn with a sans-serif system face.
//! Known font paths are tried first; a full system scan only happens when
//! none of them yields a sans-serif face.

use std::path::Path;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};

use crate::font::FontFace;
use crate::{Result, TextError};

/// Known system font paths, loaded directly without scanning
#[cfg(target_os = "macos")]
const KNOWN_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
];

#[cfg(target_os = "windows")]
const KNOWN_FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const KNOWN_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

/// Font database used to find the default face
pub struct SystemFonts {
    db: Database,
    system_fonts_loaded: bool,
}

impl SystemFonts {
    /// Create a database holding only the known font paths
    pub fn new() -> Self {
        let mut db = Database::new();
        let mut loaded_count = 0;
        for path in KNOWN_FONT_PATHS {
            if Path::new(path).exists() && db.load_font_file(path).is_ok() {
                loaded_count += 1;
            }
        }
        tracing::debug!("Loaded {} known system fonts", loaded_count);

        Self {
            db,
            system_fonts_loaded: false,
        }
    }

    fn ensure_system_fonts_loaded(&mut self) {
        if self.system_fonts_loaded {
            return;
        }
        tracing::debug!("Loading all system fonts (lazy scan)...");
        self.db.load_system_fonts();
        self.system_fonts_loaded = true;
        tracing::debug!("System fonts loaded: {} faces", self.db.faces().count());
    }

    fn find_sans_serif(&self) -> Option<fontdb::ID> {
        self.db.query(&Query {
            families: &[Family::SansSerif],
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })
    }

    /// Load the regular sans-serif face
    pub fn default_face(&mut self) -> Result<FontFace> {
        let id = match self.find_sans_serif() {
            Some(id) => id,
            None => {
                self.ensure_system_fonts_loaded();
                self.find_sans_serif().ok_or(TextError::NoDefaultFont)?
            }
        };

        let (data, face_index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| TextError::FontLoadError("Font source not found".to_string()))?;

        let face = FontFace::from_data_with_index(data, face_index)?;
        tracing::info!("Default font: {}", face.family_name());
        Ok(face)
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the default face: an explicit file wins, otherwise the system sans-serif
pub fn load_default_face(explicit: Option<&Path>) -> Result<FontFace> {
    match explicit {
        Some(path) => FontFace::from_file(path),
        None => SystemFonts::new().default_face(),
    }
}
