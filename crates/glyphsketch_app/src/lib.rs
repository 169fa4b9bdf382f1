//! glyphsketch Application
//!
//! Ties the pieces together into a running sketch: settings, the redraw
//! pipeline, the config file and frame export.
//!
//! # Example
//!
//! ```ignore
//! use glyphsketch_app::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = Config::load_from_dir(Path::new("."))?;
//!     let mut session = Session::from_config(&config)?;
//!     session.set_text("TYPE\nFACE");
//!     session.wait_for_backgrounds();
//!
//!     session.tick();
//!     write_png(&session.snapshot(), Path::new("sketch.png"))?;
//!     println!("{}", session.status());
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod export;
mod session;
mod state;
mod status;

pub use config::Config;
pub use error::{AppError, Result};
pub use export::{write_gif, write_png, Frame};
pub use session::Session;
pub use state::{parse_seed, RenderState, DEFAULT_SEED, DEFAULT_TEXT};
pub use status::{StatusReport, MAX_LISTED_GLYPHS};

// Re-export the types a caller needs to drive a session
pub use glyphsketch_core::Color;
pub use glyphsketch_image::ImageSource;
pub use glyphsketch_styles::{Style, StyleMapping};
pub use glyphsketch_text::{Alignment, GlyphDescriptor, LayoutParameters};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{AppError, Result};
    pub use crate::export::{write_gif, write_png, Frame};
    pub use crate::session::Session;
    pub use crate::state::RenderState;

    pub use glyphsketch_core::Color;
    pub use glyphsketch_image::ImageSource;
    pub use glyphsketch_text::{Alignment, LayoutParameters};

    pub use std::path::Path;
}
