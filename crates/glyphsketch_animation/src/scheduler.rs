//! Frame scheduler
//!
//! Decides on which frames the page is redrawn. Any settings change marks
//! the scheduler dirty; the next tick hands out a [`FrameTicket`] and the
//! scheduler stays in `Rendering` until the ticket is finished.

/// Frames between automatic refreshes
pub const DEFAULT_REFRESH_INTERVAL: u64 = 20;

/// Scheduler state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing to draw
    Idle,
    /// A redraw is pending for the next tick
    Dirty,
    /// A redraw is in progress
    Rendering,
}

/// Permission to draw one frame
///
/// Returned by [`FrameScheduler::tick`] and handed back through
/// [`FrameScheduler::finish`] once the frame is drawn.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a ticket must be finished once the frame is drawn"]
pub struct FrameTicket {
    /// Frame counter value the redraw belongs to
    pub frame: u64,
}

/// Frame counter with dirty tracking and optional periodic refresh
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    frame: u64,
    state: SchedulerState,
    /// Set when `mark_dirty` is called while a frame is being drawn
    pending: bool,
    auto_refresh: bool,
    refresh_interval: u64,
}

impl FrameScheduler {
    /// Create a scheduler with auto-refresh on
    ///
    /// A zero interval is treated as 1 (refresh every frame).
    pub fn new(refresh_interval: u64) -> Self {
        Self {
            frame: 0,
            state: SchedulerState::Idle,
            pending: false,
            auto_refresh: true,
            refresh_interval: refresh_interval.max(1),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        if self.auto_refresh != enabled {
            tracing::debug!("FrameScheduler: auto_refresh = {}", enabled);
        }
        self.auto_refresh = enabled;
    }

    pub fn refresh_interval(&self) -> u64 {
        self.refresh_interval
    }

    pub fn set_refresh_interval(&mut self, interval: u64) {
        self.refresh_interval = interval.max(1);
    }

    /// Request a redraw on the next tick
    pub fn mark_dirty(&mut self) {
        match self.state {
            SchedulerState::Rendering => self.pending = true,
            _ => self.state = SchedulerState::Dirty,
        }
    }

    /// Whether a redraw is waiting for the next tick
    pub fn is_dirty(&self) -> bool {
        self.state == SchedulerState::Dirty || self.pending
    }

    /// Advance one frame
    ///
    /// Returns a ticket when this frame must be redrawn. While a previous
    /// ticket is outstanding no new ticket is issued; the frame still counts.
    pub fn tick(&mut self) -> Option<FrameTicket> {
        self.frame += 1;

        if self.state == SchedulerState::Rendering {
            return None;
        }

        let refresh_due = self.auto_refresh && self.frame % self.refresh_interval == 0;
        if self.state == SchedulerState::Dirty || refresh_due {
            self.state = SchedulerState::Rendering;
            return Some(FrameTicket { frame: self.frame });
        }
        None
    }

    /// Mark the ticket's frame as drawn
    pub fn finish(&mut self, ticket: FrameTicket) {
        debug_assert!(ticket.frame <= self.frame);
        self.state = if std::mem::take(&mut self.pending) {
            SchedulerState::Dirty
        } else {
            SchedulerState::Idle
        };
    }

    /// Frames left until the next automatic refresh, `None` when auto-refresh is off
    pub fn frames_until_refresh(&self) -> Option<u64> {
        self.auto_refresh
            .then(|| self.refresh_interval - self.frame % self.refresh_interval)
    }

    /// Human-readable refresh countdown
    pub fn countdown_label(&self) -> String {
        match self.frames_until_refresh() {
            Some(n) => format!("Next refresh: {} frames", n),
            None => "Auto refresh off".to_string(),
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut FrameScheduler, frames: u64) -> Vec<u64> {
        let mut drawn = Vec::new();
        for _ in 0..frames {
            if let Some(ticket) = scheduler.tick() {
                drawn.push(ticket.frame);
                scheduler.finish(ticket);
            }
        }
        drawn
    }

    #[test]
    fn test_starts_idle() {
        let scheduler = FrameScheduler::default();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.frame(), 0);
        assert_eq!(scheduler.refresh_interval(), DEFAULT_REFRESH_INTERVAL);
    }

    #[test]
    fn test_dirty_redraws_once() {
        let mut scheduler = FrameScheduler::new(20);
        scheduler.set_auto_refresh(false);
        scheduler.mark_dirty();
        assert!(scheduler.is_dirty());

        let ticket = scheduler.tick().unwrap();
        assert_eq!(ticket.frame, 1);
        assert_eq!(scheduler.state(), SchedulerState::Rendering);
        scheduler.finish(ticket);
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        assert!(drain(&mut scheduler, 50).is_empty());
    }

    #[test]
    fn test_auto_refresh_interval() {
        let mut scheduler = FrameScheduler::new(20);
        assert_eq!(drain(&mut scheduler, 65), vec![20, 40, 60]);
    }

    #[test]
    fn test_dirty_during_render_stays_pending() {
        let mut scheduler = FrameScheduler::new(20);
        scheduler.set_auto_refresh(false);
        scheduler.mark_dirty();

        let ticket = scheduler.tick().unwrap();
        scheduler.mark_dirty();
        assert_eq!(scheduler.state(), SchedulerState::Rendering);
        assert!(scheduler.tick().is_none(), "no overlapping redraws");

        scheduler.finish(ticket);
        assert_eq!(scheduler.state(), SchedulerState::Dirty);
        let next = scheduler.tick().unwrap();
        assert_eq!(next.frame, 3);
        scheduler.finish(next);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn test_frames_until_refresh() {
        let mut scheduler = FrameScheduler::new(20);
        assert_eq!(scheduler.frames_until_refresh(), Some(20));
        drain(&mut scheduler, 5);
        assert_eq!(scheduler.frames_until_refresh(), Some(15));
        drain(&mut scheduler, 15);
        assert_eq!(scheduler.frames_until_refresh(), Some(20));
        assert_eq!(scheduler.countdown_label(), "Next refresh: 20 frames");

        scheduler.set_auto_refresh(false);
        assert_eq!(scheduler.frames_until_refresh(), None);
        assert_eq!(scheduler.countdown_label(), "Auto refresh off");
    }

    #[test]
    fn test_zero_interval_refreshes_every_frame() {
        let mut scheduler = FrameScheduler::new(0);
        assert_eq!(drain(&mut scheduler, 3), vec![1, 2, 3]);
    }
}
