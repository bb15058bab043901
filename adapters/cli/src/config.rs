//! Runner configuration loaded from TOML.

use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use maze_runner_core::{GridCoordinate, TILES_PER_SECOND};
use serde::Deserialize;
use thiserror::Error;

/// Tunables for a headless run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunnerConfig {
    /// Side length of a tile in world units.
    pub(crate) tile_size: f64,
    /// Character speed.
    pub(crate) tiles_per_second: f64,
    /// Fixed simulation step in milliseconds.
    pub(crate) tick_ms: u64,
    /// Simulated render frame length in milliseconds.
    pub(crate) frame_ms: u64,
    /// Tick budget per frame; any backlog beyond it is dropped.
    pub(crate) max_ticks_per_frame: u32,
    /// Starting tile column.
    pub(crate) start_column: i32,
    /// Starting tile row.
    pub(crate) start_row: i32,
    /// Optional maze layout file; the classic maze is used when absent.
    pub(crate) maze: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tile_size: 8.0,
            tiles_per_second: TILES_PER_SECOND,
            tick_ms: 10,
            frame_ms: 16,
            max_ticks_per_frame: 5,
            start_column: 13,
            start_row: 23,
            maze: None,
        }
    }
}

impl RunnerConfig {
    /// Reads and validates a configuration file.
    ///
    /// A relative maze path is resolved against the configuration file's directory.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read runner config at {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)
            .with_context(|| format!("invalid runner config at {}", path.display()))?;
        if let (Some(maze), Some(base)) = (config.maze.as_mut(), path.parent()) {
            if maze.is_relative() {
                *maze = base.join(&*maze);
            }
        }
        Ok(config)
    }

    /// Parses and validates configuration text.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse runner config toml contents")?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ConfigError::TileSize(self.tile_size));
        }
        if !(self.tiles_per_second.is_finite() && self.tiles_per_second >= 0.0) {
            return Err(ConfigError::Speed(self.tiles_per_second));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::ZeroFrame);
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::ZeroTickBudget);
        }
        Ok(())
    }

    pub(crate) const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub(crate) const fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub(crate) const fn start(&self) -> GridCoordinate {
        GridCoordinate::new(self.start_column, self.start_row)
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("tile_size must be a positive number (received {0})")]
    TileSize(f64),
    #[error("tiles_per_second must be a non-negative number (received {0})")]
    Speed(f64),
    #[error("tick_ms must be positive")]
    ZeroTick,
    #[error("frame_ms must be positive")]
    ZeroFrame,
    #[error("max_ticks_per_frame must be positive")]
    ZeroTickBudget,
}
