//! glyphsketch Animation
//!
//! Frame-driven redraw scheduling.
//!
//! The host calls [`FrameScheduler::tick`] once per frame. A redraw is due
//! when a setting changed since the last one (the scheduler is dirty) or,
//! with auto-refresh on, on every `refresh_interval`-th frame so the noise
//! textures keep moving.
//!
//! ```rust
//! use glyphsketch_animation::FrameScheduler;
//!
//! let mut scheduler = FrameScheduler::new(20);
//! scheduler.mark_dirty();
//! let ticket = scheduler.tick().expect("dirty scheduler redraws");
//! assert_eq!(ticket.frame, 1);
//! scheduler.finish(ticket);
//! assert!(scheduler.tick().is_none());
//! ```

pub mod scheduler;

pub use scheduler::{FrameScheduler, FrameTicket, SchedulerState, DEFAULT_REFRESH_INTERVAL};
