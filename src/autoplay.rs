//! Headless autoplay: command-line options and the greedy move chooser.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::{largest_group, Board};
use crate::types::Coord;

/// Time units per sequencer tick when `--delta` is not given (one 60 Hz frame
/// in milliseconds, rounded).
pub const DEFAULT_DELTA: f32 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AutoplayConfig {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u32>,
    pub delta: f32,
    pub json: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            seed: None,
            delta: DEFAULT_DELTA,
            json: false,
        }
    }
}

/// Parse `[--config PATH] [--seed N] [--delta D] [--json]`.
pub fn parse_autoplay_args(args: &[String]) -> Result<AutoplayConfig> {
    let mut config = AutoplayConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("autoplay: missing value for --config"))?;
                config.config_path = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("autoplay: missing value for --seed"))?;
                let seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("autoplay: invalid --seed value: {}", v))?;
                config.seed = Some(seed);
            }
            "--delta" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("autoplay: missing value for --delta"))?;
                let delta = v
                    .parse::<f32>()
                    .map_err(|_| anyhow!("autoplay: invalid --delta value: {}", v))?;
                if !(delta > 0.0 && delta.is_finite()) {
                    return Err(anyhow!("autoplay: --delta must be positive, got {}", v));
                }
                config.delta = delta;
            }
            "--json" => config.json = true,
            other => {
                return Err(anyhow!("autoplay: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

/// Cell to click next: the first cell of the largest removable group.
///
/// With nothing removable the top-left cell is returned; clicking it lets the
/// engine reshuffle or end the session.
pub fn choose_click(board: &Board, min_group_size: usize) -> Coord {
    largest_group(board, min_group_size)
        .and_then(|group| group.first().copied())
        .unwrap_or(Coord::new(0, 0))
}
