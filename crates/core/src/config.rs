//! Game configuration
//!
//! Everything is supplied once at construction; there is no reconfiguration
//! mid-game. Missing JSON fields fall back to the defaults in
//! [`crate::types`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    Coord, Rect, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_SPAWN, LOCK_DELAY_MS,
    MOVE_DELAY_MS, STEP_DELAY_MS,
};

/// Largest accepted board side
pub const MAX_BOARD_SIDE: u32 = 1024;

/// Clock parameters, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Time between automatic descents
    pub step_delay_ms: u32,
    /// Time between repeated moves of a held direction
    pub move_delay_ms: u32,
    /// Resting time after which the piece locks
    pub lock_delay_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: STEP_DELAY_MS,
            move_delay_ms: MOVE_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    /// Board-space anchor every new piece is placed at
    pub spawn: Coord,
    pub timing: TimingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            spawn: DEFAULT_SPAWN,
            timing: TimingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side_ok = |n: u32| (1..=MAX_BOARD_SIDE).contains(&n);
        if !side_ok(self.width) || !side_ok(self.height) {
            return Err(ConfigError::BoardSize {
                width: self.width,
                height: self.height,
                max: MAX_BOARD_SIDE,
            });
        }
        if !self.bounds().contains(self.spawn) {
            return Err(ConfigError::SpawnOutOfBounds(self.spawn));
        }
        Ok(())
    }
}
