//! Engine configuration
//!
//! Every field has a default, so a JSON document only needs the values it
//! changes:
//!
//! ```
//! use gem_cascade_core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "width": 6, "seed": 99 }"#).unwrap();
//! assert_eq!(config.width, 6);
//! assert_eq!(config.height, 8);
//! assert_eq!(config.seed, 99);
//! ```

use serde::{Deserialize, Serialize};

use crate::refill::SpawnLimits;
use crate::types::{
    EngineError, ACTIVE_TYPE_COUNT, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_PALETTE, INITIAL_MOVES,
    MAX_ACTIVE_TYPES, MAX_BOARD_ATTEMPTS, MAX_BOARD_SIDE, MAX_SPAWN_ATTEMPTS, MIN_ACTIVE_TYPES,
    MIN_BOARD_SIDE,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    pub active_type_count: u8,
    /// Archetypes the active types are drawn from; `null` marks an
    /// unassigned slot
    pub master_palette: Vec<Option<String>>,
    pub seed: u32,
    pub max_board_attempts: u32,
    pub max_spawn_attempts: u32,
    pub initial_moves: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            active_type_count: ACTIVE_TYPE_COUNT,
            master_palette: DEFAULT_PALETTE.iter().map(|s| Some(s.to_string())).collect(),
            seed: 1,
            max_board_attempts: MAX_BOARD_ATTEMPTS,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            initial_moves: INITIAL_MOVES,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config
    pub fn from_json(s: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let side = MIN_BOARD_SIDE..=MAX_BOARD_SIDE;
        if !side.contains(&self.width) || !side.contains(&self.height) {
            return Err(EngineError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_BOARD_SIDE,
                max: MAX_BOARD_SIDE,
            });
        }
        self.validate_types()
    }

    /// Checks that do not depend on the board size
    pub fn validate_types(&self) -> Result<(), EngineError> {
        if self.active_type_count < MIN_ACTIVE_TYPES {
            return Err(EngineError::TooFewTypes {
                count: self.active_type_count,
                min: MIN_ACTIVE_TYPES,
            });
        }
        if self.active_type_count > MAX_ACTIVE_TYPES {
            return Err(EngineError::TooManyTypes {
                count: self.active_type_count,
                max: MAX_ACTIVE_TYPES,
            });
        }
        if self.master_palette.len() < self.active_type_count as usize {
            return Err(EngineError::PaletteTooSmall {
                palette: self.master_palette.len(),
                active: self.active_type_count,
            });
        }
        Ok(())
    }

    pub fn spawn_limits(&self) -> SpawnLimits {
        SpawnLimits {
            max_spawn_attempts: self.max_spawn_attempts,
            max_board_attempts: self.max_board_attempts,
        }
    }
}
