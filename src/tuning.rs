//! Data-driven game balance
//!
//! Values that shape the feel of a run. Geometry lives in `consts`; anything a
//! designer might want to tweak from a settings file lives here.

use serde::{Deserialize, Serialize};

/// Balance parameters for jump physics, spawning and the difficulty ramp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scroll speed at the start of a run
    pub initial_speed: f32,

    // === Jump ===
    /// Upward velocity applied on takeoff (pixels/tick)
    pub launch_velocity: f32,
    /// Velocity lost per `deceleration_period` ticks of airtime
    pub deceleration: f32,
    /// Tick divisor of the deceleration term
    pub deceleration_period: f32,

    // === Difficulty ramp ===
    /// Ceiling of the per-score speed increment
    pub ramp_base: f32,
    /// Damping applied to `log_4(speed)` in the increment
    pub ramp_damping: f32,

    // === Spawning ===
    /// Upper bound (inclusive) of the per-tick spawn roll
    pub spawn_roll_max: u32,
    /// A roll strictly above this spawns a batch
    pub spawn_threshold: u32,
    /// Ticks after a spawn during which no new batch may appear
    pub spawn_cooldown: u32,

    // === Autopilot ===
    /// Ticks of scrolling the autopilot looks ahead before jumping
    pub autopilot_lead_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_speed: 6.0,

            launch_velocity: 9.25,
            deceleration: 2.5,
            deceleration_period: 5.0,

            ramp_base: 0.1,
            ramp_damping: 50.0,

            spawn_roll_max: 300,
            spawn_threshold: 290,
            spawn_cooldown: 60,

            autopilot_lead_ticks: 8,
        }
    }
}

impl Tuning {
    /// Clamp values that would break the simulation's invariants
    pub fn sanitized(mut self) -> Self {
        if !(self.initial_speed >= 1.0) {
            log::warn!("initial_speed {} below 1.0, clamping", self.initial_speed);
            self.initial_speed = 1.0;
        }
        if !(self.deceleration_period > 0.0) {
            log::warn!("deceleration_period must be positive, using default");
            self.deceleration_period = Self::default().deceleration_period;
        }
        if self.spawn_roll_max == 0 {
            self.spawn_roll_max = 1;
        }
        self
    }
}
