//! Game loop
//!
//! Binds a `World` to a `Platform`: poll input, tick, present, wait. The loop
//! ends on the first collision, on a quit request, or when the tick budget
//! runs out.

use serde::Serialize;

use crate::assets::SpriteSheet;
use crate::error::Result;
use crate::platform::{Platform, PlatformEvent};
use crate::render::build_frame;
use crate::sim::{TickInput, TickOutcome, World, tick};
use crate::tuning::Tuning;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEnd {
    GameOver,
    Quit,
    TickLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub end: RunEnd,
    pub seed: u64,
    pub ticks: u64,
    pub score: u64,
    pub speed: f32,
}

impl RunSummary {
    fn new(end: RunEnd, world: &World) -> Self {
        Self {
            end,
            seed: world.seed,
            ticks: world.time_ticks,
            score: world.score(),
            speed: world.speed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub autopilot: bool,
    /// Stop with `RunEnd::TickLimit` after this many ticks
    pub max_ticks: Option<u64>,
}

/// Load sprites through the platform and build a fresh world. A missing
/// image aborts here, before any tick runs.
pub fn start<P: Platform + ?Sized>(seed: u64, tuning: Tuning, platform: &mut P) -> Result<World> {
    let sprites = SpriteSheet::load(platform)?;
    Ok(World::new(seed, tuning, sprites))
}

pub fn run<P: Platform + ?Sized>(
    world: &mut World,
    platform: &mut P,
    options: RunOptions,
) -> Result<RunSummary> {
    log::info!(
        "Run starting: seed={} autopilot={} max_ticks={:?}",
        world.seed,
        options.autopilot,
        options.max_ticks
    );

    loop {
        if options.max_ticks.is_some_and(|limit| world.time_ticks >= limit) {
            log::info!("Tick limit reached, score {}", world.score());
            return Ok(RunSummary::new(RunEnd::TickLimit, world));
        }

        let mut input = TickInput {
            jump: false,
            autopilot: options.autopilot,
        };
        for event in platform.poll_events()? {
            match event {
                PlatformEvent::Quit => {
                    log::info!("Quit at tick {}, score {}", world.time_ticks, world.score());
                    return Ok(RunSummary::new(RunEnd::Quit, world));
                }
                PlatformEvent::Jump => input.jump = true,
            }
        }

        if tick(world, &input) == TickOutcome::GameOver {
            return Ok(RunSummary::new(RunEnd::GameOver, world));
        }

        platform.present(&build_frame(world))?;
        platform.wait_for_next_tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetManifest;
    use crate::error::Error;
    use crate::platform::HeadlessPlatform;
    use crate::sim::GamePhase;

    fn quiet_tuning() -> Tuning {
        // Spawn roll can never exceed the threshold
        Tuning {
            spawn_threshold: 300,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_quit_stops_immediately() {
        let mut platform = HeadlessPlatform::default().with_event(5, PlatformEvent::Quit);
        let mut world = start(1, Tuning::default(), &mut platform).unwrap();

        let summary = run(&mut world, &mut platform, RunOptions::default()).unwrap();
        assert_eq!(summary.end, RunEnd::Quit);
        assert_eq!(summary.ticks, 5);
        assert_eq!(platform.frames_presented(), 5);
    }

    #[test]
    fn test_tick_limit() {
        let mut platform = HeadlessPlatform::default();
        let mut world = start(2, quiet_tuning(), &mut platform).unwrap();
        let options = RunOptions {
            autopilot: false,
            max_ticks: Some(10),
        };

        let summary = run(&mut world, &mut platform, options).unwrap();
        assert_eq!(summary.end, RunEnd::TickLimit);
        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.score, 1);
        assert_eq!(platform.frames_presented(), 10);
    }

    #[test]
    fn test_game_over_frame_is_not_presented() {
        let mut platform = HeadlessPlatform::default();
        let mut world = start(3, Tuning::default(), &mut platform).unwrap();
        let options = RunOptions {
            autopilot: false,
            max_ticks: Some(100_000),
        };

        // Standing still, the first cactus eventually hits
        let summary = run(&mut world, &mut platform, options).unwrap();
        assert_eq!(summary.end, RunEnd::GameOver);
        assert_eq!(world.phase, GamePhase::GameOver);
        assert_eq!(platform.frames_presented(), summary.ticks - 1);
    }

    #[test]
    fn test_scripted_jump_reaches_the_world() {
        let mut platform = HeadlessPlatform::default().with_event(0, PlatformEvent::Jump);
        let mut world = start(4, quiet_tuning(), &mut platform).unwrap();
        let options = RunOptions {
            autopilot: false,
            max_ticks: Some(1),
        };

        run(&mut world, &mut platform, options).unwrap();
        assert!(world.character.is_jumping);
        let frame = platform.last_frame().unwrap();
        let (_, rect, _) = frame.sprites().last().unwrap();
        assert_eq!(rect.top(), 81);
    }

    #[test]
    fn test_missing_image_is_fatal() {
        let mut manifest = AssetManifest::default();
        manifest.images.remove("cactus_large_2");
        let mut platform = HeadlessPlatform::new(manifest);

        match start(5, Tuning::default(), &mut platform) {
            Err(Error::Asset { name }) => assert_eq!(name, "cactus_large_2"),
            other => panic!("expected missing asset, got {:?}", other.map(|w| w.seed)),
        }
    }

    #[test]
    fn test_runs_are_reproducible() {
        let options = RunOptions {
            autopilot: true,
            max_ticks: Some(3_000),
        };
        let summaries: Vec<RunSummary> = (0..2)
            .map(|_| {
                let mut platform = HeadlessPlatform::default();
                let mut world = start(77, Tuning::default(), &mut platform).unwrap();
                run(&mut world, &mut platform, options).unwrap()
            })
            .collect();
        assert_eq!(summaries[0], summaries[1]);
    }

    #[test]
    fn test_summary_json() {
        let world = World::with_seed(6);
        let json = serde_json::to_value(RunSummary::new(RunEnd::TickLimit, &world)).unwrap();
        assert_eq!(json["end"], "tick_limit");
        assert_eq!(json["seed"], 6);
        assert_eq!(json["score"], 0);
    }
}
