//! glyphsketch configuration file handling
//!
//! Settings are read from `glyphsketch.toml`. Every section and field is
//! optional; missing values take their defaults.
//!
//! ```toml
//! [canvas]
//! width = 1080
//! height = 1440
//!
//! [render]
//! text = "HELLO\nWORLD"
//! seed = 12345
//! color = "#000000"
//!
//! [layout]
//! font_size = 200
//! alignment = "center"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glyphsketch_core::Color;
use glyphsketch_styles::StyleMapping;
use glyphsketch_text::LayoutParameters;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::{RenderState, DEFAULT_SEED, DEFAULT_TEXT};

/// Config file name looked up by [`Config::load_from_dir`]
pub const CONFIG_FILE: &str = "glyphsketch.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub render: RenderConfig,
    pub layout: LayoutParameters,
    pub fonts: FontsConfig,
    pub styles: StyleMapping,
    pub backgrounds: BackgroundsConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1440,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    pub text: String,
    pub seed: i64,
    /// Letter color as `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub color: String,
    pub random_fonts: bool,
    pub auto_refresh: bool,
    /// Frames between automatic refreshes
    pub refresh_interval: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            seed: DEFAULT_SEED,
            color: "#000000".to_string(),
            random_fonts: false,
            auto_refresh: true,
            refresh_interval: glyphsketch_animation::DEFAULT_REFRESH_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FontsConfig {
    /// Fonts letters may be randomly assigned
    pub paths: Vec<PathBuf>,
    /// Face for letters without an assigned font; system sans-serif when unset
    pub default: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BackgroundsConfig {
    /// Image files or `data:` URIs
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Frames ticked when recording an animation
    pub frames: u64,
    /// Frame rate the animation is played back at
    pub fps: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        // Two seconds at 60 fps
        Self {
            frames: 120,
            fps: 60,
        }
    }
}

impl ExportConfig {
    /// Display time of one redraw when redraws happen every `interval` frames
    pub fn frame_delay_ms(&self, interval: u64) -> u32 {
        let fps = u64::from(self.fps.max(1));
        (interval.max(1) * 1000 / fps).min(u64::from(u32::MAX)) as u32
    }
}

impl Config {
    /// Load `glyphsketch.toml` from a directory, or defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, dir.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Initial render state described by this config
    ///
    /// An unparsable color falls back to black.
    pub fn render_state(&self) -> RenderState {
        let color = Color::parse_hex(&self.render.color).unwrap_or_else(|e| {
            tracing::warn!("{}; using black", e);
            Color::BLACK
        });
        RenderState {
            text: self.render.text.clone(),
            seed: self.render.seed,
            layout: self.layout,
            color,
            use_random_fonts: self.render.random_fonts,
            auto_refresh: self.render.auto_refresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphsketch_text::Alignment;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.canvas.width, 1080);
        assert_eq!(config.render.seed, 12345);
        assert_eq!(config.render.refresh_interval, 20);
        assert!(!config.styles.dense_diagonal_for_style3);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r##"
[render]
text = "TYPE"
color = "#ff0000"

[layout]
font_size = 120
alignment = "left"

[styles]
dense_diagonal_for_style3 = true
"##,
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.render.text, "TYPE");
        assert_eq!(config.render.seed, 12345);
        assert_eq!(config.layout.font_size, 120.0);
        assert_eq!(config.layout.alignment, Alignment::Left);
        assert_eq!(config.layout.line_spacing, 1.2);
        assert!(config.styles.dense_diagonal_for_style3);

        let state = config.render_state();
        assert_eq!(state.color, Color::RED);
        assert_eq!(state.layout.font_size, 120.0);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[canvas]\nwidth = \"wide\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.fonts.paths = vec![PathBuf::from("fonts/a.ttf")];
        config.backgrounds.paths = vec!["bg.png".to_string()];
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_bad_color_falls_back_to_black() {
        let mut config = Config::default();
        config.render.color = "purple".to_string();
        assert_eq!(config.render_state().color, Color::BLACK);
    }

    #[test]
    fn test_frame_delay() {
        let export = ExportConfig::default();
        assert_eq!(export.frame_delay_ms(20), 333);
        assert_eq!(export.frame_delay_ms(0), 16);
    }
}
