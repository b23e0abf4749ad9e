//! Session configuration, fixed at engine construction.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_COLORS_AMOUNT, DEFAULT_COLS, DEFAULT_MIN_GROUP_SIZE, DEFAULT_MOVES_LIMIT,
    DEFAULT_POINTS_GOAL, DEFAULT_ROWS, DEFAULT_SHUFFLES_LIMIT, MAX_COLORS_AMOUNT,
};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Board shape and session limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub colors_amount: u8,
    pub min_group_size_limit: usize,
    pub points_goal: u32,
    pub moves_limit: u32,
    pub shuffles_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            colors_amount: DEFAULT_COLORS_AMOUNT,
            min_group_size_limit: DEFAULT_MIN_GROUP_SIZE,
            points_goal: DEFAULT_POINTS_GOAL,
            moves_limit: DEFAULT_MOVES_LIMIT,
            shuffles_limit: DEFAULT_SHUFFLES_LIMIT,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Validation(format!(
                "board must be at least 1x1 (got {}x{})",
                self.rows, self.cols
            )));
        }
        if self.colors_amount == 0 || self.colors_amount > MAX_COLORS_AMOUNT {
            return Err(ConfigError::Validation(format!(
                "colorsAmount must be in 1..={} (got {})",
                MAX_COLORS_AMOUNT, self.colors_amount
            )));
        }
        if self.min_group_size_limit == 0 {
            return Err(ConfigError::Validation(
                "minGroupSizeLimit must be > 0".into(),
            ));
        }
        if self.moves_limit == 0 {
            return Err(ConfigError::Validation("movesLimit must be > 0".into()));
        }
        Ok(())
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}
