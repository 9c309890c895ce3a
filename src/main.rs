//! Dino Dash entry point
//!
//! Parses settings, then runs either in the terminal or headless.

use std::process::ExitCode;

use dino_dash::assets::AssetManifest;
use dino_dash::driver::{self, RunEnd, RunSummary};
use dino_dash::platform::{HeadlessPlatform, TerminalPlatform};
use dino_dash::settings::USAGE;
use dino_dash::{Error, Settings};

fn main() -> ExitCode {
    env_logger::init();

    let settings = match Settings::from_args(std::env::args().skip(1)) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("dino-dash: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<(), Error> {
    let manifest = match &settings.asset_manifest {
        Some(path) => AssetManifest::load(path)?,
        None => AssetManifest::default(),
    };
    let seed = settings.seed_or_clock();
    log::info!("Dino Dash starting, seed {}", seed);

    if settings.headless {
        let mut platform = HeadlessPlatform::new(manifest);
        let mut world = driver::start(seed, settings.tuning.clone(), &mut platform)?;
        let summary = driver::run(&mut world, &mut platform, settings.run_options())?;
        let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::from)?;
        println!("{}", json);
        return Ok(());
    }

    let summary = {
        let mut platform = TerminalPlatform::new(manifest, settings.tick_rate)?;
        let mut world = driver::start(seed, settings.tuning.clone(), &mut platform)?;
        driver::run(&mut world, &mut platform, settings.run_options())?
    };
    // Terminal is restored once the platform is dropped
    print_result(&summary);
    Ok(())
}

fn print_result(summary: &RunSummary) {
    let reason = match summary.end {
        RunEnd::GameOver => "Game over",
        RunEnd::Quit => "Quit",
        RunEnd::TickLimit => "Time up",
    };
    println!(
        "{}! Score {} after {} ticks (seed {})",
        reason, summary.score, summary.ticks, summary.seed
    );
}
