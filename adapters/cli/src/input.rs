//! Keyboard mapping and scripted key presses.

use std::collections::BTreeMap;

use log::warn;
use maze_runner_core::Direction;
use thiserror::Error;

/// Maps a browser-style key code onto a direction.
pub(crate) fn direction_for_key_code(code: u32) -> Option<Direction> {
    match code {
        87 | 38 => Some(Direction::Up),
        83 | 40 => Some(Direction::Down),
        65 | 37 => Some(Direction::Left),
        68 | 39 => Some(Direction::Right),
        _ => None,
    }
}

/// Maps a key name (`w`, `arrowup`, `up`, ...) or numeric key code onto a direction.
pub(crate) fn direction_for_key(key: &str) -> Option<Direction> {
    if let Ok(code) = key.parse::<u32>() {
        return direction_for_key_code(code);
    }
    match key.to_ascii_lowercase().as_str() {
        "w" | "up" | "arrowup" => Some(Direction::Up),
        "s" | "down" | "arrowdown" => Some(Direction::Down),
        "a" | "left" | "arrowleft" => Some(Direction::Left),
        "d" | "right" | "arrowright" => Some(Direction::Right),
        _ => None,
    }
}

/// Key presses keyed by the simulation tick they precede.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct InputScript {
    presses: BTreeMap<u64, Vec<Direction>>,
}

impl InputScript {
    /// Parses `tick:key` pairs separated by commas, e.g. `0:left,40:up`.
    ///
    /// Keys that do not map to a direction are skipped with a warning.
    pub(crate) fn parse(script: &str) -> Result<Self, ScriptError> {
        let mut presses: BTreeMap<u64, Vec<Direction>> = BTreeMap::new();
        for entry in script.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (tick, key) = entry
                .split_once(':')
                .ok_or_else(|| ScriptError::MissingSeparator(entry.to_owned()))?;
            let tick = tick
                .trim()
                .parse::<u64>()
                .map_err(|_| ScriptError::InvalidTick(tick.trim().to_owned()))?;
            match direction_for_key(key.trim()) {
                Some(direction) => presses.entry(tick).or_default().push(direction),
                None => warn!("ignoring unmapped key {:?} at tick {tick}", key.trim()),
            }
        }
        Ok(Self { presses })
    }

    /// Directions pressed immediately before `tick`, in script order.
    pub(crate) fn presses_at(&self, tick: u64) -> &[Direction] {
        self.presses.get(&tick).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of ticks that carry at least one press.
    pub(crate) fn len(&self) -> usize {
        self.presses.len()
    }
}

/// Malformed input script entries.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    #[error("script entry {0:?} is not of the form tick:key")]
    MissingSeparator(String),
    #[error("script tick {0:?} is not a non-negative integer")]
    InvalidTick(String),
}
