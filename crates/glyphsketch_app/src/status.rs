//! Status text describing the current layout

use glyphsketch_styles::style_name;
use glyphsketch_text::{FontSet, GlyphDescriptor, LayoutParameters};

/// Letters listed individually before the summary is truncated
pub const MAX_LISTED_GLYPHS: usize = 10;

/// Two-line layout summary
pub struct StatusReport;

impl StatusReport {
    /// Settings line, then up to ten `Letter(Style, Font)` entries
    pub fn render(
        line_count: usize,
        params: &LayoutParameters,
        descriptors: &[GlyphDescriptor],
    ) -> String {
        let mut info = format!(
            "Lines: {} | Font size: {} | Line spacing: {} | Letter spacing: {} | Align: {} | X offset: {} | Y offset: {}\n",
            line_count,
            params.font_size,
            params.line_spacing,
            params.letter_spacing,
            params.alignment,
            params.offset_x,
            params.offset_y,
        );

        info.push_str("Glyphs: ");
        let entries: Vec<String> = descriptors
            .iter()
            .take(MAX_LISTED_GLYPHS)
            .map(|d| {
                format!(
                    "{}({}, {})",
                    d.character,
                    style_name(d.style_index),
                    FontSet::label(d.font)
                )
            })
            .collect();
        info.push_str(&entries.join(" | "));

        if descriptors.len() > MAX_LISTED_GLYPHS {
            info.push_str(&format!(" ... ({} glyphs total)", descriptors.len()));
        }
        info
    }
}
