//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod character;
pub mod collision;
pub mod dust;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;

pub use character::Character;
pub use collision::{first_hit, in_danger_window};
pub use dust::Dust;
pub use obstacle::{Obstacle, ObstacleSize};
pub use rect::Rect;
pub use state::{GamePhase, World};
pub use tick::{
    TickInput, TickOutcome, display_speed, max_batch, score_interval, speed_increment, tick,
};
