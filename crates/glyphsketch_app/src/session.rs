//! Session - the redraw pipeline
//!
//! A [`Session`] owns everything a sketch needs between frames: the current
//! [`RenderState`], the canvas, fonts, laid-out letters, the scheduler and
//! the background images. Settings change through mutators that swap in a
//! new state, re-run layout and mark the scheduler dirty. [`Session::tick`]
//! advances one frame and redraws when the scheduler says so.

use glyphsketch_animation::FrameScheduler;
use glyphsketch_core::{Color, DrawContext, NoiseField, Size};
use glyphsketch_image::{BackgroundBatch, BackgroundLoader, BackgroundSet, ImageSource};
use glyphsketch_paint::PaintContext;
use glyphsketch_styles::{render_glyph, GlyphJob, StyleMapping};
use glyphsketch_text::{
    load_default_face, FontSet, GlyphDescriptor, GlyphSampler, LayoutEngine, LayoutParameters,
};

use crate::config::Config;
use crate::error::Result;
use crate::export::Frame;
use crate::state::{parse_seed, RenderState};
use crate::status::StatusReport;

/// A live sketch
pub struct Session {
    state: RenderState,
    canvas: PaintContext,
    size: Size,
    fonts: FontSet,
    sampler: GlyphSampler,
    layout: LayoutEngine,
    scheduler: FrameScheduler,
    backgrounds: BackgroundSet,
    loader: Option<BackgroundLoader>,
    mapping: StyleMapping,
    status: String,
}

impl Session {
    /// Create a session on a `width` x `height` canvas
    ///
    /// The first tick always redraws.
    pub fn new(width: u32, height: u32, state: RenderState, fonts: FontSet) -> Result<Self> {
        let canvas = PaintContext::new(width, height)?;
        let mut scheduler = FrameScheduler::default();
        scheduler.set_auto_refresh(state.auto_refresh);

        let mut session = Self {
            layout: LayoutEngine::new(state.layout),
            state,
            canvas,
            size: Size::new(width as f32, height as f32),
            fonts,
            sampler: GlyphSampler::new(),
            scheduler,
            backgrounds: BackgroundSet::new(),
            loader: None,
            mapping: StyleMapping::default(),
            status: String::new(),
        };
        session.relayout();
        Ok(session)
    }

    /// Build a session from a loaded config
    ///
    /// Font files that fail to load are skipped. Without a default face,
    /// letters that have no assigned font draw nothing. Background decoding
    /// is started in the background; see [`Session::wait_for_backgrounds`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut fonts = FontSet::load(&config.fonts.paths);
        match load_default_face(config.fonts.default.as_deref()) {
            Ok(face) => {
                tracing::debug!("Default font: {}", face.family_name());
                fonts = fonts.with_default(face);
            }
            Err(e) => tracing::warn!("No default font ({}); unassigned letters will be skipped", e),
        }

        let mut session = Self::new(
            config.canvas.width,
            config.canvas.height,
            config.render_state(),
            fonts,
        )?;
        session.mapping = config.styles;
        session
            .scheduler
            .set_refresh_interval(config.render.refresh_interval);

        let sources: Vec<ImageSource> = config
            .backgrounds
            .paths
            .iter()
            .map(|p| ImageSource::from(p.as_str()))
            .collect();
        session.load_backgrounds(sources)?;

        tracing::info!(
            "Session ready: {}x{} canvas, {} font(s), {} glyph(s)",
            config.canvas.width,
            config.canvas.height,
            session.fonts.len(),
            session.layout.descriptors().len()
        );
        Ok(session)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.update(|state| state.with_text(text));
    }

    pub fn set_seed(&mut self, seed: i64) {
        self.update(|state| state.with_seed(seed));
    }

    /// Set the seed from user input; unusable input selects the default seed
    pub fn set_seed_str(&mut self, input: &str) {
        self.set_seed(parse_seed(input));
    }

    pub fn set_layout(&mut self, layout: LayoutParameters) {
        self.update(|state| state.with_layout(layout));
    }

    pub fn set_offsets(&mut self, offset_x: f32, offset_y: f32) {
        self.update(|state| state.with_offsets(offset_x, offset_y));
    }

    /// Set the letter color from hex input
    ///
    /// Invalid input keeps the current color. Returns whether the color
    /// was accepted.
    pub fn set_color_hex(&mut self, input: &str) -> bool {
        match Color::parse_hex(input) {
            Ok(color) => {
                self.state = std::mem::take(&mut self.state).with_color(color);
                self.scheduler.mark_dirty();
                true
            }
            Err(e) => {
                tracing::warn!("{}; keeping current color", e);
                false
            }
        }
    }

    pub fn set_random_fonts(&mut self, enabled: bool) {
        self.update(|state| state.with_random_fonts(enabled));
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.state = std::mem::take(&mut self.state).with_auto_refresh(enabled);
        self.scheduler.set_auto_refresh(enabled);
    }

    pub fn set_refresh_interval(&mut self, interval: u64) {
        self.scheduler.set_refresh_interval(interval);
    }

    pub fn set_style_mapping(&mut self, mapping: StyleMapping) {
        self.mapping = mapping;
        self.scheduler.mark_dirty();
    }

    /// Re-run layout with the current settings and redraw
    pub fn regenerate(&mut self) {
        self.relayout();
    }

    fn update(&mut self, change: impl FnOnce(RenderState) -> RenderState) {
        self.state = change(std::mem::take(&mut self.state));
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout.set_parameters(self.state.layout);
        self.layout.parse_text(&self.state.text);
        let count = self
            .layout
            .calculate(
                self.size,
                self.state.seed,
                self.state.use_random_fonts,
                self.fonts.len(),
            )
            .len();
        tracing::debug!("Layout: {} glyph(s) on {} line(s)", count, self.layout.lines().len());
        self.scheduler.mark_dirty();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Backgrounds
    // ─────────────────────────────────────────────────────────────────────

    /// Start decoding a new set of backgrounds
    ///
    /// The decoded batch replaces the current images at a later frame
    /// boundary. A load still in flight is abandoned. An empty list does
    /// nothing.
    pub fn load_backgrounds(&mut self, sources: Vec<ImageSource>) -> Result<()> {
        if sources.is_empty() {
            return Ok(());
        }
        if self.loader.is_some() {
            tracing::debug!("Abandoning previous background load");
        }
        self.loader = Some(BackgroundLoader::spawn(sources)?);
        Ok(())
    }

    /// Block until a pending background load completes and commit it
    pub fn wait_for_backgrounds(&mut self) {
        if let Some(batch) = self.loader.take().and_then(BackgroundLoader::wait) {
            self.commit_backgrounds(batch);
        }
    }

    /// Whether a background load is still running
    pub fn is_loading_backgrounds(&self) -> bool {
        self.loader.is_some()
    }

    pub fn next_background(&mut self) {
        if self.backgrounds.next() {
            self.scheduler.mark_dirty();
        }
    }

    pub fn prev_background(&mut self) {
        if self.backgrounds.prev() {
            self.scheduler.mark_dirty();
        }
    }

    pub fn no_background(&mut self) {
        if self.backgrounds.selected_index().is_some() {
            self.backgrounds.none();
            self.scheduler.mark_dirty();
        }
    }

    fn poll_backgrounds(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        if let Some(batch) = loader.try_take() {
            self.loader = None;
            self.commit_backgrounds(batch);
        }
    }

    fn commit_backgrounds(&mut self, batch: BackgroundBatch) {
        if batch.failed > 0 {
            tracing::warn!("{} background image(s) failed to load", batch.failed);
        }
        tracing::info!("Loaded {} background image(s)", batch.images.len());
        self.backgrounds.replace(batch.images);
        self.scheduler.mark_dirty();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Frame loop
    // ─────────────────────────────────────────────────────────────────────

    /// Advance one frame
    ///
    /// Picks up finished background loads, then redraws if the scheduler
    /// asks for it. Returns the frame number when a redraw happened.
    pub fn tick(&mut self) -> Option<u64> {
        self.poll_backgrounds();
        let ticket = self.scheduler.tick()?;
        let frame = ticket.frame;
        self.redraw(frame);
        self.scheduler.finish(ticket);
        Some(frame)
    }

    fn redraw(&mut self, frame: u64) {
        self.canvas.clear(Color::WHITE);
        if let Some(background) = self.backgrounds.selected() {
            self.canvas.draw_image(background.view(), self.size.to_rect());
        }

        let noise = NoiseField::new(self.state.seed as u64);
        let font_size = self.layout.parameters().font_size;
        let mut drawn = 0;
        for descriptor in self.layout.descriptors() {
            let mask = self.sampler.sample(
                descriptor.character,
                descriptor.font,
                &self.fonts,
                font_size,
            );
            let job = GlyphJob {
                descriptor,
                mask: &mask,
                color: self.state.color,
                noise: &noise,
                seed: self.state.seed,
                frame,
            };
            if render_glyph(&mut self.canvas, &job, &self.mapping).is_some() {
                drawn += 1;
            }
        }

        self.status = StatusReport::render(
            self.layout.lines().len(),
            self.layout.parameters(),
            self.layout.descriptors(),
        );
        tracing::debug!(
            "Frame {}: drew {}/{} glyph(s)",
            frame,
            drawn,
            self.layout.descriptors().len()
        );
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Copy the canvas out
    pub fn snapshot(&self) -> Frame {
        Frame {
            width: self.canvas.width(),
            height: self.canvas.height(),
            rgba: self.canvas.to_rgba(),
        }
    }

    /// Status text from the last redraw
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn descriptors(&self) -> &[GlyphDescriptor] {
        self.layout.descriptors()
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn backgrounds(&self) -> &BackgroundSet {
        &self.backgrounds
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// "Next refresh: N frames" or "Auto refresh off"
    pub fn countdown_label(&self) -> String {
        self.scheduler.countdown_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DEFAULT_SEED;
    use std::io::Cursor;

    fn session(width: u32, height: u32) -> Session {
        Session::new(width, height, RenderState::default(), FontSet::new()).unwrap()
    }

    fn pixel(frame: &Frame, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * frame.width + x) * 4) as usize;
        [frame.rgba[i], frame.rgba[i + 1], frame.rgba[i + 2], frame.rgba[i + 3]]
    }

    #[test]
    fn test_initial_layout_and_first_tick() {
        let mut s = session(1080, 1440);
        assert_eq!(s.descriptors().len(), 10);
        assert!(s.status().is_empty());

        assert_eq!(s.tick(), Some(1));
        assert!(s.status().starts_with("Lines: 2 | Font size: 200"));
        assert_eq!(s.tick(), None);
    }

    #[test]
    fn test_blank_canvas_is_white_without_fonts() {
        let mut s = session(32, 32);
        s.tick();
        let frame = s.snapshot();
        assert_eq!(frame.rgba.len(), 32 * 32 * 4);
        assert!(frame.rgba.chunks(4).all(|p| p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_mutators_relayout_and_mark_dirty() {
        let mut s = session(1080, 1440);
        s.tick();

        s.set_text("HI");
        assert_eq!(s.descriptors().len(), 2);
        assert!(s.scheduler().is_dirty());
        s.tick();

        s.set_seed_str("not a number");
        assert_eq!(s.state().seed, DEFAULT_SEED);
        s.set_seed_str("42");
        assert_eq!(s.state().seed, 42);

        s.set_offsets(30.0, -10.0);
        let x = s.descriptors()[0].x;
        s.set_offsets(0.0, -10.0);
        assert!((x - s.descriptors()[0].x - 30.0).abs() < 1e-3);

        s.set_text("");
        assert!(s.descriptors().is_empty());
    }

    #[test]
    fn test_bad_color_keeps_current() {
        let mut s = session(16, 16);
        assert!(s.set_color_hex("#ff0000"));
        assert_eq!(s.state().color, Color::RED);
        assert!(!s.set_color_hex("not-a-color"));
        assert_eq!(s.state().color, Color::RED);
    }

    #[test]
    fn test_auto_refresh_cadence() {
        let mut s = session(16, 16);
        let redraws: Vec<u64> = (0..60).filter_map(|_| s.tick()).collect();
        assert_eq!(redraws, vec![1, 20, 40, 60]);

        s.set_auto_refresh(false);
        assert_eq!(s.countdown_label(), "Auto refresh off");
        assert!((0..60).all(|_| s.tick().is_none()));
    }

    /// Write a solid blue 4x4 PNG and return its path
    fn blue_png(dir: &std::path::Path) -> std::path::PathBuf {
        let path = dir.join("blue.png");
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_background_is_drawn_and_cycled() {
        let dir = tempfile::tempdir().unwrap();
        let path = blue_png(dir.path());

        let mut s = session(16, 16);
        s.set_text("");
        s.load_backgrounds(vec![ImageSource::File(path)]).unwrap();
        assert!(s.is_loading_backgrounds());
        s.wait_for_backgrounds();
        assert!(!s.is_loading_backgrounds());
        assert_eq!(s.backgrounds().label().as_deref(), Some("1/1"));

        assert!(s.tick().is_some());
        assert_eq!(pixel(&s.snapshot(), 8, 8), [0, 0, 255, 255]);

        s.no_background();
        assert!(s.scheduler().is_dirty());
        s.tick();
        assert_eq!(pixel(&s.snapshot(), 8, 8), [255, 255, 255, 255]);

        s.next_background();
        assert_eq!(s.backgrounds().selected_index(), Some(0));
    }

    #[test]
    fn test_letter_drawn_over_background() {
        let face = match load_default_face(None) {
            Ok(face) => face,
            Err(e) => {
                eprintln!("No system font, skipping: {}", e);
                return;
            }
        };
        let dir = tempfile::tempdir().unwrap();
        let state = RenderState::default().with_text("H").with_color(Color::RED);
        let mut s = Session::new(400, 400, state, FontSet::new().with_default(face)).unwrap();
        s.load_backgrounds(vec![ImageSource::File(blue_png(dir.path()))])
            .unwrap();
        s.wait_for_backgrounds();

        for seed in 1..=5 {
            s.set_seed(seed);
            assert!(s.tick().is_some());
            let d = &s.descriptors()[0];
            let (cx, cy) = (d.x.round() as i64, d.y.round() as i64);
            assert!((0..400).contains(&cx) && (0..400).contains(&cy));

            let frame = s.snapshot();
            let mut letter = 0;
            for y in (cy - 100).max(0)..(cy + 100).min(400) {
                for x in (cx - 100).max(0)..(cx + 100).min(400) {
                    let [r, _, b, _] = pixel(&frame, x as u32, y as u32);
                    if r > 128 && b < 128 {
                        letter += 1;
                    }
                }
            }
            assert!(letter > 10, "seed {}: only {} letter pixels", seed, letter);
            assert_eq!(pixel(&frame, 2, 2), [0, 0, 255, 255]);
        }
    }

    #[test]
    fn test_empty_background_list_is_ignored() {
        let mut s = session(16, 16);
        s.load_backgrounds(Vec::new()).unwrap();
        assert!(!s.is_loading_backgrounds());
        s.next_background();
        assert!(s.backgrounds().is_empty());
    }

    #[test]
    fn test_from_config_applies_settings() {
        let mut config = Config::default();
        config.canvas.width = 64;
        config.canvas.height = 48;
        config.render.text = "AB C".to_string();
        config.render.refresh_interval = 5;
        config.render.auto_refresh = false;

        let s = Session::from_config(&config).unwrap();
        let frame = s.snapshot();
        assert_eq!((frame.width, frame.height), (64, 48));
        assert_eq!(s.descriptors().len(), 3);
        assert_eq!(s.scheduler().refresh_interval(), 5);
        assert!(!s.scheduler().auto_refresh());
    }
}
