//! Dino Dash - a side-scrolling jump-the-cactus reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump physics, spawning, collisions, world state)
//! - `render`: Converts world state into renderer-agnostic draw commands
//! - `platform`: Presentation/platform collaborators (terminal, headless)
//! - `driver`: Fixed-rate game loop tying the simulation to a platform
//! - `tuning`: Data-driven game balance
//! - `settings`: Runtime configuration

pub mod assets;
pub mod driver;
pub mod error;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::Error;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// World dimensions in pixels (y grows downward)
    pub const WORLD_WIDTH: i32 = 600;
    pub const WORLD_HEIGHT: i32 = 150;

    /// Obstacles rest their bottom edge on this line
    pub const GROUND_LINE: i32 = 135;
    /// Floor stripe drawn under the character
    pub const FLOOR_Y: i32 = 125;
    pub const FLOOR_THICKNESS: i32 = 2;
    /// Dust particles are scattered below this line
    pub const DUST_BASE_Y: i32 = 128;

    /// Character placement and sprite size
    pub const CHARACTER_X: i32 = 20;
    pub const CHARACTER_REST_Y: f32 = 90.0;
    pub const CHARACTER_WIDTH: i32 = 40;
    pub const CHARACTER_HEIGHT: i32 = 44;

    /// Obstacle sprites are scaled down by this divisor
    pub const SPRITE_SCALE_DIVISOR: i32 = 5;
    /// Horizontal gap between obstacles in a batch
    pub const OBSTACLE_GAP: i32 = 2;
    /// Batches are laid out starting here (off the right edge)
    pub const SPAWN_ANCHOR_X: i32 = 1000;

    /// Collision pre-filter reaches this far ahead of the character
    pub const DANGER_WINDOW_AHEAD: i32 = 100;

    /// Score HUD placement
    pub const SCORE_X: i32 = 525;
    pub const SCORE_WIDE_SHIFT: i32 = 10;
    pub const SCORE_DIGITS: usize = 5;

    /// Palette
    pub const BACKGROUND_COLOR: (u8, u8, u8) = (247, 247, 247);
    pub const ASSET_COLOR: (u8, u8, u8) = (83, 83, 83);
}

/// Logarithm of `value` in an arbitrary `base`
#[inline]
pub fn log_base(value: f32, base: f32) -> f32 {
    value.ln() / base.ln()
}
