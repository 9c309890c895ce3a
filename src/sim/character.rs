//! The player character
//!
//! Jump motion uses a sampled linear deceleration rather than integrated
//! gravity: each airborne tick the velocity is recomputed from the elapsed
//! tick count and subtracted from the vertical position.

use serde::{Deserialize, Serialize};

use super::collision;
use super::obstacle::Obstacle;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Left edge; the character never scrolls
    pub x: i32,
    /// Top edge. Never greater than `CHARACTER_REST_Y`.
    pub y: f32,
    pub is_jumping: bool,
    /// Ticks since takeoff, reset on landing
    pub jump_elapsed_ticks: u32,
    /// Upward velocity in pixels/tick (negative while falling)
    pub velocity: f32,
    pub score: u64,
    launch_velocity: f32,
    deceleration: f32,
    deceleration_period: f32,
}

impl Default for Character {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl Character {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: CHARACTER_X,
            y: CHARACTER_REST_Y,
            is_jumping: false,
            jump_elapsed_ticks: 0,
            velocity: 0.0,
            score: 0,
            launch_velocity: tuning.launch_velocity,
            deceleration: tuning.deceleration,
            deceleration_period: tuning.deceleration_period,
        }
    }

    /// Start a jump. Ignored while airborne; returns whether a jump started.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping {
            return false;
        }
        self.is_jumping = true;
        self.velocity = self.launch_velocity;
        true
    }

    /// Apply one tick of jump physics
    pub fn advance(&mut self) {
        if !self.is_jumping {
            return;
        }

        self.jump_elapsed_ticks += 1;
        let t = self.jump_elapsed_ticks as f32;
        self.velocity = self.launch_velocity - self.deceleration * t / self.deceleration_period;
        self.y -= self.velocity;

        // Landed (y grows downward)
        if self.y > CHARACTER_REST_Y {
            self.y = CHARACTER_REST_Y;
            self.is_jumping = false;
            self.velocity = 0.0;
            self.jump_elapsed_ticks = 0;
        }
    }

    pub fn is_grounded(&self) -> bool {
        !self.is_jumping
    }

    /// Height above the resting position
    pub fn altitude(&self) -> f32 {
        CHARACTER_REST_Y - self.y
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y as i32, CHARACTER_WIDTH, CHARACTER_HEIGHT)
    }

    /// True if the character overlaps any obstacle in its danger window
    pub fn collides_with(&self, obstacles: &[Obstacle]) -> bool {
        collision::first_hit(self.x, &self.bounds(), obstacles).is_some()
    }
}
