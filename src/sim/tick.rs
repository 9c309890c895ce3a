//! Fixed timestep simulation tick
//!
//! Core game loop step that advances the world deterministically, plus the
//! difficulty-curve math it depends on.

use rand::Rng;

use super::state::{GamePhase, World};
use crate::consts::*;
use crate::log_base;
use crate::tuning::Tuning;

/// Speed at which batches start growing past a single obstacle
const BATCH_SPEED_STEP: f32 = 6.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key pressed this tick
    pub jump: bool,
    /// Demo mode - the world jumps on its own
    pub autopilot: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver,
}

/// Speed gained per score point. Shrinks as speed grows and is never negative.
pub fn speed_increment(speed: f32, tuning: &Tuning) -> f32 {
    (tuning.ramp_base - log_base(speed, 4.0) / tuning.ramp_damping).max(0.0)
}

/// Horizontal scroll per tick for obstacles and dust (negative = leftward)
pub fn display_speed(speed: f32) -> f32 {
    -log_base(speed, 1.5)
}

/// Ticks between score increments at the given speed
pub fn score_interval(speed: f32) -> f32 {
    TICK_RATE as f32 / speed
}

/// Largest batch the spawner may produce at the given speed
pub fn max_batch(speed: f32) -> u32 {
    ((1.0 + (speed - BATCH_SPEED_STEP) / BATCH_SPEED_STEP) as u32).max(1)
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) -> TickOutcome {
    if world.phase == GamePhase::GameOver {
        return TickOutcome::GameOver;
    }

    world.time_ticks += 1;

    // Input
    if input.jump || (input.autopilot && autopilot_wants_jump(world)) {
        world.character.jump();
    }

    // Physics
    world.character.advance();

    // Score and difficulty ramp
    world.score_ticks += 1;
    if world.score_ticks as f32 >= score_interval(world.speed) {
        world.character.score += 1;
        world.speed += speed_increment(world.speed, &world.tuning);
        world.score_ticks = 0;
    }
    world.display_speed = display_speed(world.speed);

    // Scroll; obstacles leaving the screen are dropped in place
    let dx = world.display_speed;
    world.obstacles.retain_mut(|o| o.advance(dx));
    world.dust.advance(dx as i32);

    spawn_obstacles(world);

    if world.character.collides_with(&world.obstacles) {
        world.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {}: score={} speed={:.3}",
            world.time_ticks,
            world.score(),
            world.speed
        );
        return TickOutcome::GameOver;
    }

    TickOutcome::Continue
}

/// Roll for a new batch. The roll is drawn every tick so the random
/// sequence does not depend on the cooldown. The cooldown counts down on the
/// spawning tick too, so the next batch can come `spawn_cooldown` ticks later.
fn spawn_obstacles(world: &mut World) {
    let roll_max = world.tuning.spawn_roll_max;
    let roll = world.rng_mut().random_range(1..=roll_max);

    if world.spawn_cooldown == 0 && roll > world.tuning.spawn_threshold {
        let upper = max_batch(world.speed);
        let count = world.rng_mut().random_range(1..=upper);
        world.spawn_batch(count);
        world.spawn_cooldown = world.tuning.spawn_cooldown;
    }

    if world.spawn_cooldown > 0 {
        world.spawn_cooldown -= 1;
    }
}

/// Jump when a grounded character sees an obstacle close enough that the
/// jump's high point will cover it
fn autopilot_wants_jump(world: &World) -> bool {
    if !world.character.is_grounded() {
        return false;
    }
    let front = world.character.x + CHARACTER_WIDTH;
    let reach = world.tuning.autopilot_lead_ticks as f32 * world.display_speed.abs();
    world.obstacles.iter().any(|o| {
        let gap = o.x - front;
        gap >= 0 && (gap as f32) <= reach
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteSheet;
    use crate::sim::{Obstacle, ObstacleSize};
    use proptest::prelude::*;

    /// World that never rolls a spawn on its own
    fn quiet_world(seed: u64) -> World {
        let tuning = Tuning {
            spawn_threshold: 300,
            ..Default::default()
        };
        World::new(seed, tuning, SpriteSheet::builtin())
    }

    #[test]
    fn test_ten_ticks_score_once() {
        let mut world = quiet_world(1);
        let input = TickInput::default();
        for _ in 0..10 {
            assert_eq!(tick(&mut world, &input), TickOutcome::Continue);
        }
        assert_eq!(world.score(), 1);
        let expected = 6.0 + speed_increment(6.0, &Tuning::default());
        assert_eq!(world.speed, expected);
        assert_eq!(world.score_ticks, 0);
        assert_eq!(world.time_ticks, 10);
    }

    #[test]
    fn test_speed_increment_values() {
        let tuning = Tuning::default();
        let inc = speed_increment(6.0, &tuning);
        assert!((inc - (0.1 - 6f32.log(4.0) / 50.0)).abs() < 1e-6);
        // Saturates past 4^5
        assert_eq!(speed_increment(1100.0, &tuning), 0.0);
        assert_eq!(speed_increment(5000.0, &tuning), 0.0);
    }

    #[test]
    fn test_display_speed() {
        assert!((display_speed(6.0) + 4.419).abs() < 0.001);
        assert_eq!(display_speed(6.0) as i32, -4);
        assert!(display_speed(1.0).abs() < 1e-6);
    }

    #[test]
    fn test_max_batch_grows_with_speed() {
        assert_eq!(max_batch(6.0), 1);
        assert_eq!(max_batch(11.9), 1);
        assert_eq!(max_batch(12.0), 2);
        assert_eq!(max_batch(18.0), 3);
    }

    #[test]
    fn test_jump_input() {
        let mut world = quiet_world(1);
        tick(&mut world, &TickInput { jump: true, autopilot: false });
        assert!(world.character.is_jumping);
        assert_eq!(world.character.jump_elapsed_ticks, 1);
        assert_eq!(world.character.y, 81.25);
    }

    #[test]
    fn test_obstacles_scroll_and_get_pruned() {
        let mut world = quiet_world(1);
        let sprites = world.sprites.clone();
        world
            .obstacles
            .push(Obstacle::new(1, ObstacleSize::Small, 0, false, -10, &sprites));
        world
            .obstacles
            .push(Obstacle::new(2, ObstacleSize::Small, 0, false, 400, &sprites));

        let input = TickInput::default();
        for _ in 0..5 {
            tick(&mut world, &input);
        }
        // 17px wide + 2 gap: gone once x < -19
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.obstacles[0].id, 2);
        assert_eq!(world.obstacles[0].x, 400 - 5 * 4);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut world = quiet_world(1);
        let sprites = world.sprites.clone();
        world
            .obstacles
            .push(Obstacle::new(1, ObstacleSize::Large, 0, false, 70, &sprites));

        let input = TickInput::default();
        let mut outcome = TickOutcome::Continue;
        for _ in 0..10 {
            outcome = tick(&mut world, &input);
            if outcome == TickOutcome::GameOver {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::GameOver);
        assert!(world.is_over());

        // Further ticks are inert
        let ticks = world.time_ticks;
        assert_eq!(tick(&mut world, &input), TickOutcome::GameOver);
        assert_eq!(world.time_ticks, ticks);
    }

    #[test]
    fn test_spawn_cooldown_blocks_batches() {
        let tuning = Tuning {
            spawn_threshold: 0,
            ..Default::default()
        };
        let mut world = World::new(9, tuning, SpriteSheet::builtin());
        let input = TickInput::default();

        tick(&mut world, &input);
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.spawn_cooldown, 59);

        // Ticks 2..=59 stay blocked
        for _ in 0..58 {
            tick(&mut world, &input);
            assert_eq!(world.obstacles.len(), 1);
        }
        assert_eq!(world.spawn_cooldown, 1);

        // Tick 60: sixty ticks after the first batch
        tick(&mut world, &input);
        assert_eq!(world.time_ticks, 60);
        assert_eq!(world.obstacles.len(), 2);
        assert_eq!(world.spawn_cooldown, 59);
    }

    #[test]
    fn test_autopilot_clears_single_obstacle() {
        let mut world = quiet_world(3);
        let sprites = world.sprites.clone();
        world
            .obstacles
            .push(Obstacle::new(1, ObstacleSize::Large, 1, false, 300, &sprites));

        let input = TickInput {
            jump: false,
            autopilot: true,
        };
        for _ in 0..150 {
            assert_eq!(tick(&mut world, &input), TickOutcome::Continue);
        }
        assert!(world.obstacles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two worlds with same seed should produce identical results
        let mut world1 = World::with_seed(99999);
        let mut world2 = World::with_seed(99999);
        let input = TickInput {
            jump: false,
            autopilot: true,
        };

        for _ in 0..2000 {
            let a = tick(&mut world1, &input);
            let b = tick(&mut world2, &input);
            assert_eq!(a, b);
            if a == TickOutcome::GameOver {
                break;
            }
        }

        assert_eq!(world1.time_ticks, world2.time_ticks);
        assert_eq!(world1.score(), world2.score());
        assert_eq!(world1.obstacles.len(), world2.obstacles.len());
        assert_eq!(world1.speed, world2.speed);
    }

    proptest! {
        #[test]
        fn prop_speed_never_decreases(speed in 1.0f32..5000.0) {
            let inc = speed_increment(speed, &Tuning::default());
            prop_assert!(inc >= 0.0);
            prop_assert!(inc <= 0.1);
        }

        #[test]
        fn prop_increment_shrinks_with_speed(a in 1.0f32..2000.0, b in 1.0f32..2000.0) {
            let tuning = Tuning::default();
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(speed_increment(hi, &tuning) <= speed_increment(lo, &tuning));
        }

        #[test]
        fn prop_run_invariants(seed in any::<u64>(), jumps in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut world = World::with_seed(seed);
            let mut last_speed = world.speed;
            let mut last_score = world.score();
            for jump in jumps {
                let outcome = tick(&mut world, &TickInput { jump, autopilot: false });
                prop_assert!(world.speed >= last_speed);
                prop_assert!(world.speed >= 6.0);
                prop_assert!(world.score() >= last_score);
                prop_assert!(world.character.y <= crate::consts::CHARACTER_REST_Y);
                prop_assert!(world.obstacles.iter().all(|o| o.is_visible()));
                last_speed = world.speed;
                last_score = world.score();
                if outcome == TickOutcome::GameOver {
                    break;
                }
            }
        }
    }
}
