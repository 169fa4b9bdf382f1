//! Frame export
//!
//! Finished canvases are copied into [`Frame`]s and written with the
//! `image` crate's encoders: a single PNG, or an animated GIF that loops
//! forever.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, RgbaImage};

use crate::error::{AppError, Result};

/// A snapshot of the canvas as straight-alpha RGBA8 rows
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Frame {
    fn to_image(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.rgba.clone()).ok_or_else(|| {
            AppError::Export(format!(
                "Frame buffer does not match {}x{}",
                self.width, self.height
            ))
        })
    }
}

/// Write one frame as PNG
pub fn write_png(frame: &Frame, path: &Path) -> Result<()> {
    frame.to_image()?.save_with_format(path, image::ImageFormat::Png)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Write frames as a looping GIF, each shown for `delay_ms`
pub fn write_gif(frames: &[Frame], path: &Path, delay_ms: u32) -> Result<()> {
    if frames.is_empty() {
        return Err(AppError::Export("No frames to write".to_string()));
    }

    let file = File::create(path)
        .map_err(|e| AppError::Export(format!("{}: {}", path.display(), e)))?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite)?;

    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    for frame in frames {
        encoder.encode_frame(image::Frame::from_parts(frame.to_image()?, 0, 0, delay))?;
    }
    tracing::info!("Wrote {} ({} frames)", path.display(), frames.len());
    Ok(())
}
