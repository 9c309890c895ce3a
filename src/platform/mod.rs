//! Platform abstraction layer
//!
//! Everything outside the simulation goes through here:
//! - Image lookup (names -> pixel dimensions)
//! - Input events (jump, quit)
//! - Presenting a frame of draw commands
//! - Pacing ticks to the target rate

pub mod headless;
pub mod terminal;

use std::time::{Duration, Instant};

use crate::assets::ImageInfo;
use crate::error::Result;
use crate::render::Frame;

pub use headless::HeadlessPlatform;
pub use terminal::TerminalPlatform;

/// Discrete signals from the platform, polled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Stop immediately
    Quit,
    Jump,
}

/// Presentation/platform collaborator driven by the game loop
pub trait Platform {
    /// Look up a named image. Unknown names are fatal at startup.
    fn load_image(&mut self, name: &str) -> Result<ImageInfo>;

    /// Drain the events that arrived since the last poll
    fn poll_events(&mut self) -> Result<Vec<PlatformEvent>>;

    fn present(&mut self, frame: &Frame) -> Result<()>;

    /// Block until the next tick boundary
    fn wait_for_next_tick(&mut self);
}

/// Sleeps so that consecutive `wait` calls are one period apart
#[derive(Debug)]
pub struct FrameLimiter {
    period: Duration,
    deadline: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(rate: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / rate.max(1),
            deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn wait(&mut self) {
        let now = Instant::now();
        let deadline = match self.deadline {
            Some(d) => d,
            None => now + self.period,
        };

        if let Some(remaining) = deadline.checked_duration_since(now) {
            std::thread::sleep(remaining);
            self.deadline = Some(deadline + self.period);
        } else {
            // Running behind: don't try to catch up with a burst of ticks
            self.deadline = Some(now + self.period);
        }
    }
}
