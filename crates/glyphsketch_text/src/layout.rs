//! Letter layout
//!
//! Turns multi-line text into one positioned record per visible letter.
//! Letters sit on a fixed-pitch grid (advance = 0.6 × font size × letter
//! spacing) so the layout is independent of the fonts drawn later. Each
//! letter also draws its texture style, and optionally a font, from a
//! seeded random stream, so the same inputs always produce the same page.

use std::fmt;
use std::str::FromStr;

use glyphsketch_core::{SeededRandom, Size};
use serde::{Deserialize, Serialize};

/// Number of texture styles a letter can be assigned
pub const STYLE_COUNT: usize = 9;

/// Horizontal page margin used by left/right alignment
pub const PAGE_MARGIN: f32 = 50.0;

/// Letter pitch relative to the font size
pub const ADVANCE_RATIO: f32 = 0.6;

/// Horizontal alignment of each line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    /// Parse an alignment name; anything unrecognized centers
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(format!("unknown alignment: {other}")),
        }
    }
}

/// Layout settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
    /// Letter size in pixels
    pub font_size: f32,
    /// Line pitch as a multiple of the font size
    pub line_spacing: f32,
    /// Letter pitch multiplier
    pub letter_spacing: f32,
    pub alignment: Alignment,
    /// Shift applied to every letter, in pixels
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            font_size: 200.0,
            line_spacing: 1.2,
            letter_spacing: 1.0,
            alignment: Alignment::Center,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl LayoutParameters {
    /// Distance between neighbouring letter centers
    pub fn advance(&self) -> f32 {
        self.font_size * ADVANCE_RATIO * self.letter_spacing
    }

    /// Distance between neighbouring line centers
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }

    /// X of the first letter's center for a line of `char_count` characters,
    /// before the global X offset
    pub fn line_start_x(&self, canvas_width: f32, char_count: usize) -> f32 {
        let line_width = char_count as f32 * self.advance();
        let half = self.font_size / 2.0;
        match self.alignment {
            Alignment::Left => PAGE_MARGIN + half,
            Alignment::Right => canvas_width - line_width - PAGE_MARGIN + half,
            Alignment::Center => (canvas_width - line_width) / 2.0 + half,
        }
    }
}

/// One visible letter on the page
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GlyphDescriptor {
    /// Uppercased letter
    pub character: char,
    /// Center x in canvas pixels, offsets applied
    pub x: f32,
    /// Center y in canvas pixels, offsets applied
    pub y: f32,
    /// Texture style in `0..STYLE_COUNT`
    pub style_index: u8,
    /// Index into the font set; `None` draws with the default face
    pub font: Option<usize>,
    pub line_index: usize,
    pub char_index: usize,
}

/// Split text into lines, dropping lines with no visible characters
///
/// Kept lines are not trimmed: leading spaces still take up letter slots.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn to_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// Lay out already-split lines
///
/// The random stream is seeded once per pass; letters draw from it in line
/// then character order, style first and then font (only when fonts are
/// randomized and at least one is available).
pub fn layout_lines(
    lines: &[String],
    canvas: Size,
    seed: i64,
    use_random_fonts: bool,
    font_count: usize,
    params: &LayoutParameters,
) -> Vec<GlyphDescriptor> {
    let mut rng = SeededRandom::new(seed);
    let mut descriptors = Vec::new();
    if lines.is_empty() {
        return descriptors;
    }

    let total_height = lines.len() as f32 * params.line_height();
    let start_y = (canvas.height - total_height) / 2.0 + params.font_size / 2.0;
    let advance = params.advance();

    for (line_index, line) in lines.iter().enumerate() {
        let line_y = start_y + line_index as f32 * params.line_height();
        let start_x = params.line_start_x(canvas.width, line.chars().count());

        for (char_index, c) in line.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }

            let style_index = rng.index(STYLE_COUNT) as u8;
            let font = (use_random_fonts && font_count > 0).then(|| rng.index(font_count));

            descriptors.push(GlyphDescriptor {
                character: to_upper(c),
                x: start_x + char_index as f32 * advance + params.offset_x,
                y: line_y + params.offset_y,
                style_index,
                font,
                line_index,
                char_index,
            });
        }
    }

    tracing::debug!(
        "Laid out {} glyphs on {} lines (seed {})",
        descriptors.len(),
        lines.len(),
        seed
    );
    descriptors
}

/// Lay out raw text on a canvas
pub fn calculate_layout(
    text: &str,
    canvas: Size,
    seed: i64,
    use_random_fonts: bool,
    font_count: usize,
    params: &LayoutParameters,
) -> Vec<GlyphDescriptor> {
    layout_lines(
        &parse_lines(text),
        canvas,
        seed,
        use_random_fonts,
        font_count,
        params,
    )
}

/// Stateful layout holder
///
/// Keeps the current parameters, the last parsed lines and the last computed
/// descriptors between passes.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    params: LayoutParameters,
    lines: Vec<String>,
    descriptors: Vec<GlyphDescriptor>,
}

impl LayoutEngine {
    pub fn new(params: LayoutParameters) -> Self {
        Self {
            params,
            lines: vec!["HELLO".to_string(), "WORLD".to_string()],
            descriptors: Vec::new(),
        }
    }

    /// Replace the current lines with those parsed from `text`
    pub fn parse_text(&mut self, text: &str) -> &[String] {
        self.lines = parse_lines(text);
        &self.lines
    }

    /// Change size, spacing and alignment (offsets are kept)
    pub fn update_settings(
        &mut self,
        font_size: f32,
        line_spacing: f32,
        letter_spacing: f32,
        alignment: Alignment,
    ) {
        self.params.font_size = font_size;
        self.params.line_spacing = line_spacing;
        self.params.letter_spacing = letter_spacing;
        self.params.alignment = alignment;
    }

    pub fn update_offsets(&mut self, offset_x: f32, offset_y: f32) {
        self.params.offset_x = offset_x;
        self.params.offset_y = offset_y;
    }

    pub fn set_parameters(&mut self, params: LayoutParameters) {
        self.params = params;
    }

    /// Recompute descriptors for the current lines
    pub fn calculate(
        &mut self,
        canvas: Size,
        seed: i64,
        use_random_fonts: bool,
        font_count: usize,
    ) -> &[GlyphDescriptor] {
        self.descriptors = layout_lines(
            &self.lines,
            canvas,
            seed,
            use_random_fonts,
            font_count,
            &self.params,
        );
        &self.descriptors
    }

    pub fn parameters(&self) -> &LayoutParameters {
        &self.params
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn descriptors(&self) -> &[GlyphDescriptor] {
        &self.descriptors
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size {
        width: 1080.0,
        height: 1440.0,
    };

    #[test]
    fn test_layout_is_deterministic() {
        let params = LayoutParameters::default();
        let a = calculate_layout("HELLO\nWORLD", CANVAS, 42, true, 3, &params);
        let b = calculate_layout("HELLO\nWORLD", CANVAS, 42, true, 3, &params);
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn test_whitespace_is_skipped() {
        let params = LayoutParameters::default();
        let descriptors = calculate_layout("A B\t C\n   \n", CANVAS, 7, false, 0, &params);
        let letters: String = descriptors.iter().map(|d| d.character).collect();
        assert_eq!(letters, "ABC");
        assert_eq!(descriptors.len(), 3);
        assert!(descriptors.iter().all(|d| !d.character.is_whitespace()));
        // Spaces still take up slots
        assert_eq!(descriptors[1].char_index, 2);
        assert_eq!(descriptors[2].char_index, 5);
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        assert_eq!(parse_lines("A\n\n  \nB"), vec!["A", "B"]);
        assert_eq!(parse_lines(" A "), vec![" A "]);
        assert!(parse_lines("").is_empty());
    }

    #[test]
    fn test_left_alignment_starts_at_margin() {
        let params = LayoutParameters {
            alignment: Alignment::Left,
            offset_x: 15.0,
            ..Default::default()
        };
        let descriptors = calculate_layout("AB\nC", CANVAS, 1, false, 0, &params);
        let expected = PAGE_MARGIN + params.font_size / 2.0 + 15.0;
        for d in descriptors.iter().filter(|d| d.char_index == 0) {
            assert_eq!(d.x, expected);
        }
    }

    #[test]
    fn test_right_alignment_ends_at_margin() {
        let params = LayoutParameters {
            alignment: Alignment::Right,
            offset_x: -20.0,
            ..Default::default()
        };
        let text = "ABCD";
        let descriptors = calculate_layout(text, CANVAS, 1, false, 0, &params);
        let first = &descriptors[0];
        let right_edge = first.x + text.len() as f32 * params.advance();
        let expected = CANVAS.width - PAGE_MARGIN + params.font_size / 2.0 + params.offset_x;
        assert!((right_edge - expected).abs() < 1e-3);
    }

    #[test]
    fn test_style_index_in_range() {
        let params = LayoutParameters::default();
        let text = "THE QUICK BROWN FOX\nJUMPS OVER THE LAZY DOG";
        for seed in [0, 1, 12345, -9] {
            for d in calculate_layout(text, CANVAS, seed, false, 0, &params) {
                assert!((d.style_index as usize) < STYLE_COUNT);
            }
        }
    }

    #[test]
    fn test_font_assignment() {
        let params = LayoutParameters::default();
        let text = "GENERATIVE\nTYPE";

        let randomized = calculate_layout(text, CANVAS, 3, true, 3, &params);
        assert!(randomized.iter().all(|d| matches!(d.font, Some(i) if i < 3)));

        let no_fonts = calculate_layout(text, CANVAS, 3, true, 0, &params);
        assert!(no_fonts.iter().all(|d| d.font.is_none()));

        let disabled = calculate_layout(text, CANVAS, 3, false, 3, &params);
        assert!(disabled.iter().all(|d| d.font.is_none()));
    }

    #[test]
    fn test_two_letter_scenario() {
        let params = LayoutParameters::default();
        let descriptors = calculate_layout("HI", CANVAS, 1, false, 0, &params);
        assert_eq!(descriptors.len(), 2);

        let (h, i) = (&descriptors[0], &descriptors[1]);
        assert_eq!(h.character, 'H');
        assert_eq!(i.character, 'I');
        assert_eq!(h.y, i.y);
        assert!((i.x - h.x - 120.0).abs() < 1e-3);
        assert!((h.x - 520.0).abs() < 1e-3);
        assert!((h.y - 700.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_text() {
        let params = LayoutParameters::default();
        assert!(calculate_layout("", CANVAS, 1, true, 3, &params).is_empty());
        assert!(calculate_layout("\n \n", CANVAS, 1, true, 3, &params).is_empty());
    }

    #[test]
    fn test_seed_changes_styles() {
        let params = LayoutParameters::default();
        let text = "GENERATIVE\nTYPOGRAPHY";
        let a: Vec<u8> = calculate_layout(text, CANVAS, 1, false, 0, &params)
            .iter()
            .map(|d| d.style_index)
            .collect();
        let b: Vec<u8> = calculate_layout(text, CANVAS, 2, false, 0, &params)
            .iter()
            .map(|d| d.style_index)
            .collect();
        assert_eq!(a.len(), b.len());
        assert_ne!(a, b);
    }

    #[test]
    fn test_letters_are_uppercased() {
        let params = LayoutParameters::default();
        let descriptors = calculate_layout("aß", CANVAS, 1, false, 0, &params);
        assert_eq!(descriptors[0].character, 'A');
        assert_eq!(descriptors[1].character, 'S');
    }

    #[test]
    fn test_alignment_parsing() {
        assert_eq!("LEFT".parse::<Alignment>(), Ok(Alignment::Left));
        assert_eq!(Alignment::parse_lenient("right"), Alignment::Right);
        assert_eq!(Alignment::parse_lenient("justify"), Alignment::Center);
        assert_eq!(Alignment::Right.to_string(), "right");
    }

    #[test]
    fn test_engine_keeps_state() {
        let mut engine = LayoutEngine::default();
        assert_eq!(engine.lines(), ["HELLO", "WORLD"]);

        engine.parse_text("HI");
        engine.update_settings(100.0, 1.5, 2.0, Alignment::Left);
        engine.update_offsets(5.0, -5.0);
        let count = engine.calculate(CANVAS, 1, false, 0).len();
        assert_eq!(count, 2);
        assert_eq!(engine.descriptors().len(), 2);
        assert_eq!(engine.parameters().letter_spacing, 2.0);
        assert_eq!(engine.descriptors()[0].x, PAGE_MARGIN + 50.0 + 5.0);
        let step = engine.descriptors()[1].x - engine.descriptors()[0].x;
        assert!((step - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_descriptor_serializes() {
        let params = LayoutParameters::default();
        let descriptors = calculate_layout("A", CANVAS, 1, false, 0, &params);
        let json = serde_json::to_value(&descriptors[0]).unwrap();
        assert_eq!(json["character"], "A");
        assert!(json["font"].is_null());

        let params: LayoutParameters =
            serde_json::from_str(r#"{"font_size": 120, "alignment": "right"}"#).unwrap();
        assert_eq!(params.font_size, 120.0);
        assert_eq!(params.alignment, Alignment::Right);
        assert_eq!(params.line_spacing, 1.2);
    }
}
