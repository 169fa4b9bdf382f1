//! Background images
//!
//! A [`BackgroundSet`] holds the decoded backgrounds and which one (if any)
//! is shown. Decoding happens off the frame loop in a [`BackgroundLoader`]
//! worker; the finished batch is picked up at a frame boundary and replaces
//! the whole set.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::Result;
use crate::loader::{ImageData, ImageSource};

/// Decoded backgrounds with a cyclic selection
#[derive(Debug, Clone, Default)]
pub struct BackgroundSet {
    images: Vec<Arc<ImageData>>,
    selected: Option<usize>,
}

impl BackgroundSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every image; the first one becomes selected
    pub fn replace(&mut self, images: Vec<ImageData>) {
        self.images = images.into_iter().map(Arc::new).collect();
        self.selected = if self.images.is_empty() { None } else { Some(0) };
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The image to draw, if one is selected
    pub fn selected(&self) -> Option<&ImageData> {
        self.selected
            .and_then(|i| self.images.get(i))
            .map(|img| img.as_ref())
    }

    /// Select the next image, wrapping around; from "none" this selects the first
    ///
    /// Returns false (and changes nothing) when the set is empty.
    pub fn next(&mut self) -> bool {
        let n = self.images.len();
        if n == 0 {
            return false;
        }
        self.selected = Some(self.selected.map_or(0, |i| (i + 1) % n));
        true
    }

    /// Select the previous image, wrapping around
    ///
    /// "none" counts as the slot before the first image, so stepping back
    /// from it lands one short of the last (`n - 2`, or `0` for one image).
    pub fn prev(&mut self) -> bool {
        let n = self.images.len();
        if n == 0 {
            return false;
        }
        self.selected = Some(self.selected.map_or((2 * n - 2) % n, |i| (i + n - 1) % n));
        true
    }

    /// Show no background; the images are kept
    pub fn none(&mut self) {
        self.selected = None;
    }

    /// Position readout: "2/3", "none/3", or `None` when there are no images
    pub fn label(&self) -> Option<String> {
        if self.images.is_empty() {
            return None;
        }
        Some(match self.selected {
            Some(i) => format!("{}/{}", i + 1, self.images.len()),
            None => format!("none/{}", self.images.len()),
        })
    }
}

/// Result of one loader run
#[derive(Debug)]
pub struct BackgroundBatch {
    /// Decoded images, in request order
    pub images: Vec<ImageData>,
    /// Number of sources that could not be loaded
    pub failed: usize,
}

/// Decodes a batch of backgrounds on a worker thread
pub struct BackgroundLoader {
    receiver: Receiver<BackgroundBatch>,
    handle: Option<JoinHandle<()>>,
    requested: usize,
}

impl BackgroundLoader {
    /// Start decoding `sources`; the batch is delivered once all are done
    pub fn spawn(sources: Vec<ImageSource>) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let requested = sources.len();

        let handle = thread::Builder::new()
            .name("glyphsketch-backgrounds".to_string())
            .spawn(move || {
                let mut batch = BackgroundBatch {
                    images: Vec::with_capacity(sources.len()),
                    failed: 0,
                };
                for source in &sources {
                    match ImageData::load(source) {
                        Ok(image) => {
                            tracing::debug!(
                                "Decoded background {} ({}x{})",
                                source,
                                image.width(),
                                image.height()
                            );
                            batch.images.push(image);
                        }
                        Err(e) => {
                            tracing::warn!("Skipping background {}: {}", source, e);
                            batch.failed += 1;
                        }
                    }
                }
                // The receiver may already be gone if the load was superseded
                let _ = sender.send(batch);
            })?;

        tracing::info!("Loading {} background image(s)", requested);
        Ok(Self {
            receiver,
            handle: Some(handle),
            requested,
        })
    }

    /// Number of sources this loader was started with
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Take the batch if it is ready, without blocking
    ///
    /// Returns `None` while decoding is still running, and after the batch
    /// has been taken.
    pub fn try_take(&mut self) -> Option<BackgroundBatch> {
        match self.receiver.try_recv() {
            Ok(batch) => {
                self.join();
                Some(batch)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.join();
                None
            }
        }
    }

    /// Block until the batch is ready
    pub fn wait(mut self) -> Option<BackgroundBatch> {
        let batch = self.receiver.recv().ok();
        self.join();
        batch
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Background loader thread panicked");
            }
        }
    }
}
