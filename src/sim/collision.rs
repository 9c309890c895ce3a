//! Character/obstacle collision detection
//!
//! Two stages: a cheap horizontal pre-filter keeps only obstacles near the
//! character, then a strict rectangle overlap decides.

use super::obstacle::Obstacle;
use super::rect::Rect;
use crate::consts::DANGER_WINDOW_AHEAD;

/// Whether an obstacle's left edge lies in the open window
/// `(character_x - obstacle.width, character_x + DANGER_WINDOW_AHEAD)`.
#[inline]
pub fn in_danger_window(character_x: i32, obstacle: &Obstacle) -> bool {
    character_x - obstacle.width < obstacle.x && obstacle.x < character_x + DANGER_WINDOW_AHEAD
}

/// Index of the first obstacle in the danger window whose hit box overlaps
/// `character_box`
pub fn first_hit(character_x: i32, character_box: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| in_danger_window(character_x, o) && character_box.intersects(&o.bounds()))
}
