//! World state
//!
//! Everything a run needs lives in one explicitly constructed `World`. Two
//! worlds built from the same seed, tuning and sprites evolve identically
//! under the same inputs.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::character::Character;
use super::dust::Dust;
use super::obstacle::Obstacle;
use crate::assets::SpriteSheet;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// Terminal state, reached on the first collision
    GameOver,
}

#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub sprites: SpriteSheet,
    pub character: Character,
    /// Active obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    pub dust: Dust,
    /// Difficulty speed; never decreases
    pub speed: f32,
    /// Per-tick horizontal scroll derived from `speed` (negative = leftward)
    pub display_speed: f32,
    /// Ticks since the last score increment
    pub score_ticks: u32,
    /// Ticks remaining before another batch may spawn
    pub spawn_cooldown: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    rng: Pcg32,
    next_id: u32,
}

impl World {
    pub fn new(seed: u64, tuning: Tuning, sprites: SpriteSheet) -> Self {
        let tuning = tuning.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let dust = Dust::generate(&mut rng, WORLD_WIDTH);
        let speed = tuning.initial_speed;

        log::info!("New world: seed={} speed={} dust={}", seed, speed, dust.len());

        Self {
            seed,
            character: Character::new(&tuning),
            tuning,
            sprites,
            obstacles: Vec::new(),
            dust,
            speed,
            display_speed: super::tick::display_speed(speed),
            score_ticks: 0,
            spawn_cooldown: 0,
            time_ticks: 0,
            phase: GamePhase::Running,
            rng,
            next_id: 1,
        }
    }

    /// Default tuning and built-in sprite sizes
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Tuning::default(), SpriteSheet::builtin())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn score(&self) -> u64 {
        self.character.score
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Lay out a batch of `count` random obstacles starting at the spawn anchor
    pub fn spawn_batch(&mut self, count: u32) {
        let mut x = SPAWN_ANCHOR_X;
        for _ in 0..count {
            let id = self.next_entity_id();
            let obstacle = Obstacle::random(id, x, &mut self.rng, &self.sprites);
            x += obstacle.offset;
            self.obstacles.push(obstacle);
        }
        log::debug!(
            "Spawned {} obstacle(s) at tick {} (speed {:.3})",
            count,
            self.time_ticks,
            self.speed
        );
    }
}
