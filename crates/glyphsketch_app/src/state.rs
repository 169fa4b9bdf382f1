//! Render state
//!
//! Every user-facing setting lives in one immutable value. Changing a
//! setting produces a new state through a `with_*` builder; the session
//! swaps it in and re-runs layout.

use glyphsketch_core::Color;
use glyphsketch_text::LayoutParameters;

/// Seed used when the seed input is not a usable number
pub const DEFAULT_SEED: i64 = 12345;

/// Text shown before anything is typed
pub const DEFAULT_TEXT: &str = "HELLO\nWORLD";

/// Settings that determine what is drawn
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    pub text: String,
    pub seed: i64,
    pub layout: LayoutParameters,
    pub color: Color,
    pub use_random_fonts: bool,
    pub auto_refresh: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            seed: DEFAULT_SEED,
            layout: LayoutParameters::default(),
            color: Color::BLACK,
            use_random_fonts: false,
            auto_refresh: true,
        }
    }
}

impl RenderState {
    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self
        }
    }

    pub fn with_seed(self, seed: i64) -> Self {
        Self { seed, ..self }
    }

    pub fn with_layout(self, layout: LayoutParameters) -> Self {
        Self { layout, ..self }
    }

    pub fn with_offsets(mut self, offset_x: f32, offset_y: f32) -> Self {
        self.layout.offset_x = offset_x;
        self.layout.offset_y = offset_y;
        self
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn with_random_fonts(self, use_random_fonts: bool) -> Self {
        Self {
            use_random_fonts,
            ..self
        }
    }

    pub fn with_auto_refresh(self, auto_refresh: bool) -> Self {
        Self {
            auto_refresh,
            ..self
        }
    }
}

/// Read a seed from free-form input
///
/// Takes the leading integer (`"42abc"` is 42). Input with no leading
/// integer, a zero seed, or a value out of range all fall back to
/// [`DEFAULT_SEED`].
pub fn parse_seed(input: &str) -> i64 {
    let s = input.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len() - sign_len, |(i, _)| i);

    match s[..sign_len + digits].parse::<i64>() {
        Ok(0) | Err(_) => DEFAULT_SEED,
        Ok(seed) => seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_leave_other_fields() {
        let state = RenderState::default()
            .with_text("HI")
            .with_seed(7)
            .with_offsets(10.0, -4.0)
            .with_random_fonts(true);
        assert_eq!(state.text, "HI");
        assert_eq!(state.seed, 7);
        assert_eq!(state.layout.offset_x, 10.0);
        assert_eq!(state.layout.offset_y, -4.0);
        assert_eq!(state.layout.font_size, 200.0);
        assert!(state.use_random_fonts);
        assert!(state.auto_refresh);
        assert_eq!(state.color, Color::BLACK);
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("42"), 42);
        assert_eq!(parse_seed("  -17"), -17);
        assert_eq!(parse_seed("+5"), 5);
        assert_eq!(parse_seed("99 bottles"), 99);
        assert_eq!(parse_seed("abc"), DEFAULT_SEED);
        assert_eq!(parse_seed(""), DEFAULT_SEED);
        assert_eq!(parse_seed("-"), DEFAULT_SEED);
        assert_eq!(parse_seed("0"), DEFAULT_SEED);
        assert_eq!(parse_seed("99999999999999999999999"), DEFAULT_SEED);
    }
}
