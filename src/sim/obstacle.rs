//! Cactus obstacles
//!
//! An obstacle is fixed in size once built. It only ever moves left, and the
//! world drops it as soon as `advance` reports it has left the screen.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::assets::{SpriteId, SpriteSheet};
use crate::consts::*;

/// Obstacle size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleSize {
    Small,
    Large,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub size: ObstacleSize,
    pub sprite: SpriteId,
    /// Left edge (pixels)
    pub x: i32,
    /// Top edge, chosen so the bottom rests on the ground line
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Width plus gap; spacing to the next obstacle in a batch
    pub offset: i32,
    /// Drawn flipped horizontally (cosmetic, hit box unchanged)
    pub mirrored: bool,
}

impl Obstacle {
    pub fn new(
        id: u32,
        size: ObstacleSize,
        variant: u8,
        mirrored: bool,
        x: i32,
        sprites: &SpriteSheet,
    ) -> Self {
        let sprite = SpriteId::cactus(size, variant);
        let dims = sprites.size(sprite);
        Self {
            id,
            size,
            sprite,
            x,
            y: GROUND_LINE - dims.y,
            width: dims.x,
            height: dims.y,
            offset: dims.x + OBSTACLE_GAP,
            mirrored,
        }
    }

    /// Build an obstacle with random size class, variant and orientation
    pub fn random(id: u32, x: i32, rng: &mut impl Rng, sprites: &SpriteSheet) -> Self {
        let size = if rng.random_range(0..2) == 1 {
            ObstacleSize::Large
        } else {
            ObstacleSize::Small
        };
        let variant = rng.random_range(0..2u8);
        let mirrored = rng.random::<bool>();
        Self::new(id, size, variant, mirrored, x, sprites)
    }

    /// Move horizontally by `dx` (negative scrolls left; fractions are
    /// truncated). Returns false once fully off the left edge.
    pub fn advance(&mut self, dx: f32) -> bool {
        self.x += dx as i32;
        self.is_visible()
    }

    pub fn is_visible(&self) -> bool {
        self.x >= -self.offset
    }

    /// Hit box (same for mirrored sprites)
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn small(x: i32) -> Obstacle {
        Obstacle::new(1, ObstacleSize::Small, 0, false, x, &SpriteSheet::builtin())
    }

    #[test]
    fn test_rests_on_ground() {
        let sprites = SpriteSheet::builtin();
        for size in [ObstacleSize::Small, ObstacleSize::Large] {
            for variant in 0..2 {
                let o = Obstacle::new(1, size, variant, true, 300, &sprites);
                assert_eq!(o.bounds().bottom(), GROUND_LINE);
                assert_eq!(o.offset, o.width + OBSTACLE_GAP);
            }
        }
    }

    #[test]
    fn test_advance_truncates_distance() {
        let mut o = small(100);
        assert!(o.advance(-4.42));
        assert_eq!(o.x, 96);
        assert!(o.advance(-0.9));
        assert_eq!(o.x, 96);
    }

    #[test]
    fn test_advance_reports_offscreen() {
        let mut o = small(0);
        let offset = o.offset;
        // Exactly at -offset is still on screen
        assert!(o.advance(-(offset as f32)));
        assert_eq!(o.x, -offset);
        assert!(!o.advance(-1.0));
        assert!(o.x <= -o.offset);
    }

    #[test]
    fn test_mirroring_keeps_hitbox() {
        let sprites = SpriteSheet::builtin();
        let a = Obstacle::new(1, ObstacleSize::Large, 1, false, 50, &sprites);
        let b = Obstacle::new(2, ObstacleSize::Large, 1, true, 50, &sprites);
        assert_eq!(a.bounds(), b.bounds());
    }

    #[test]
    fn test_random_is_seeded() {
        let sprites = SpriteSheet::builtin();
        let mut rng1 = Pcg32::seed_from_u64(7);
        let mut rng2 = Pcg32::seed_from_u64(7);
        for i in 0..20 {
            let a = Obstacle::random(i, 1000, &mut rng1, &sprites);
            let b = Obstacle::random(i, 1000, &mut rng2, &sprites);
            assert_eq!(a.sprite, b.sprite);
            assert_eq!(a.mirrored, b.mirrored);
        }
    }
}
