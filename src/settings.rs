//! Run settings
//!
//! Loaded from an optional JSON file, then overridden from the command line.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::driver::RunOptions;
use crate::error::{Error, Result};
use crate::tuning::Tuning;

/// Tick budget for `--headless` without an explicit count (ten minutes of play)
pub const DEFAULT_HEADLESS_TICKS: u64 = 36_000;

pub const USAGE: &str = "\
usage: dino-dash [options]

options:
  --config <path>      read settings from a JSON file
  --seed <n>           seed the run (default: clock)
  --headless [ticks]   run without a terminal and print a JSON summary
  --autopilot          jump automatically
  --tick-rate <hz>     ticks per second (default: 60)
  -h, --help           show this message";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; drawn from the clock when absent
    pub seed: Option<u64>,
    pub tick_rate: u32,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
    pub autopilot: bool,
    pub headless: bool,
    /// JSON file of image sizes; built-in sizes when absent
    pub asset_manifest: Option<PathBuf>,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate: TICK_RATE,
            max_ticks: None,
            autopilot: false,
            headless: false,
            asset_manifest: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse command-line arguments (without the program name). Returns
    /// `None` when help was requested.
    pub fn from_args<I, S>(args: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut config = None;
        let mut seed = None;
        let mut tick_rate = None;
        let mut headless: Option<Option<u64>> = None;
        let mut autopilot = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => return Ok(None),
                "--config" => {
                    config = Some(PathBuf::from(value_of(&args, i, "--config")?));
                    i += 1;
                }
                "--seed" => {
                    seed = Some(parse_number(value_of(&args, i, "--seed")?, "--seed")?);
                    i += 1;
                }
                "--tick-rate" => {
                    let rate = parse_number(value_of(&args, i, "--tick-rate")?, "--tick-rate")?;
                    tick_rate = Some(u32::try_from(rate).map_err(|_| {
                        Error::Usage(format!("--tick-rate out of range: {}", rate))
                    })?);
                    i += 1;
                }
                "--headless" => {
                    let ticks = match args.get(i + 1) {
                        Some(next) if !next.starts_with('-') => {
                            i += 1;
                            Some(parse_number(next, "--headless")?)
                        }
                        _ => None,
                    };
                    headless = Some(ticks);
                }
                "--autopilot" => autopilot = true,
                other => {
                    return Err(Error::Usage(format!(
                        "unknown argument '{}'\n\n{}",
                        other, USAGE
                    )));
                }
            }
            i += 1;
        }

        let mut settings = match &config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if seed.is_some() {
            settings.seed = seed;
        }
        if let Some(rate) = tick_rate {
            settings.tick_rate = rate;
        }
        if let Some(ticks) = headless {
            settings.headless = true;
            if ticks.is_some() {
                settings.max_ticks = ticks;
            }
        }
        settings.autopilot |= autopilot;

        if settings.tick_rate == 0 {
            log::warn!("tick_rate 0 is invalid, using {}", TICK_RATE);
            settings.tick_rate = TICK_RATE;
        }
        Ok(Some(settings))
    }

    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    pub fn run_options(&self) -> RunOptions {
        let max_ticks = if self.headless {
            self.max_ticks.or(Some(DEFAULT_HEADLESS_TICKS))
        } else {
            self.max_ticks
        };
        RunOptions {
            autopilot: self.autopilot,
            max_ticks,
        }
    }
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| Error::Usage(format!("{} needs a value", flag)))
}

fn parse_number(value: &str, flag: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| Error::Usage(format!("{} expects a number, got '{}'", flag, value)))
}
