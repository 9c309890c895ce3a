//! Ground dust
//!
//! Small rectangles scattered under the floor line. They scroll with the
//! obstacles and wrap around, so the ground looks like it keeps moving.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dust {
    pub particles: Vec<Rect>,
}

impl Dust {
    /// Scatter particles left to right until `width` is covered
    pub fn generate(rng: &mut impl Rng, width: i32) -> Self {
        let mut particles = Vec::new();
        let mut distance = 0;
        while distance < width {
            let w = rng.random_range(3..8);
            distance += 10 + 4 * rng.random_range(0..8);
            let drop = 2 + 2 * rng.random_range(0..5);
            particles.push(Rect::new(distance, DUST_BASE_Y + drop, w, 2));
        }
        Self { particles }
    }

    /// Scroll by `dx` pixels; particles leaving the left edge re-enter on the right
    pub fn advance(&mut self, dx: i32) {
        for p in &mut self.particles {
            if p.pos.x + dx < 0 {
                p.pos.x = WORLD_WIDTH + dx;
            } else {
                p.pos.x += dx;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
