//! Game configuration - named integer settings
//!
//! Settings are read from JSON. Every key is optional; missing keys fall back
//! to the defaults in [`crate::types`]. Key names follow the settings file
//! format (`rows`, `columns`, `NormalGravity`, ...), and [`GameConfig::get_integer`]
//! offers lookup by that name.
//!
//! ```
//! use tui_diamonds_core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "rows": 12, "columns": 6, "NormalGravity": 1 }"#).unwrap();
//! assert_eq!(config.rows, 12);
//! assert_eq!(config.get_integer("NormalGravity"), Some(1));
//! assert_eq!(config.get_integer("SpawnColumn"), Some(4));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    CELL_SIZE_IN_PIXELS, DEFAULT_CHEST_PROBABILITY, DEFAULT_COLUMNS, DEFAULT_FLASH_PROBABILITY,
    DEFAULT_GRAVITY_MULTIPLIER, DEFAULT_NEW_GEM_DELAY_MS, DEFAULT_NORMAL_GRAVITY, DEFAULT_ROWS,
    DEFAULT_SPAWN_COLUMN, DEFAULT_STONE_TURNS, DEFAULT_STRONGEST_GRAVITY_MULTIPLIER, MAX_GRID_SIZE,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub rows: u16,
    pub columns: u16,
    /// Pixels per tick.
    #[serde(rename = "NormalGravity")]
    pub normal_gravity: u16,
    #[serde(rename = "GravityMultiplier")]
    pub gravity_multiplier: u16,
    #[serde(rename = "StrongestGravityMultiplier")]
    pub strongest_gravity_multiplier: u16,
    /// Milliseconds between a settled grid and the next pair.
    #[serde(rename = "NewGemDelay")]
    pub new_gem_delay_ms: u64,
    #[serde(rename = "SpawnColumn")]
    pub spawn_column: u16,
    #[serde(rename = "StoneTurns")]
    pub stone_turns: u8,
    /// Percent.
    #[serde(rename = "ChestProbability")]
    pub chest_probability: u8,
    /// Percent.
    #[serde(rename = "FlashProbability")]
    pub flash_probability: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            normal_gravity: DEFAULT_NORMAL_GRAVITY,
            gravity_multiplier: DEFAULT_GRAVITY_MULTIPLIER,
            strongest_gravity_multiplier: DEFAULT_STRONGEST_GRAVITY_MULTIPLIER,
            new_gem_delay_ms: DEFAULT_NEW_GEM_DELAY_MS,
            spawn_column: DEFAULT_SPAWN_COLUMN,
            stone_turns: DEFAULT_STONE_TURNS,
            chest_probability: DEFAULT_CHEST_PROBABILITY,
            flash_probability: DEFAULT_FLASH_PROBABILITY,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON settings document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Named integer lookup, using the settings file key names.
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        let value = match name {
            "rows" => i64::from(self.rows),
            "columns" => i64::from(self.columns),
            "NormalGravity" => i64::from(self.normal_gravity),
            "GravityMultiplier" => i64::from(self.gravity_multiplier),
            "StrongestGravityMultiplier" => i64::from(self.strongest_gravity_multiplier),
            "NewGemDelay" => i64::try_from(self.new_gem_delay_ms).ok()?,
            "SpawnColumn" => i64::from(self.spawn_column),
            "StoneTurns" => i64::from(self.stone_turns),
            "ChestProbability" => i64::from(self.chest_probability),
            "FlashProbability" => i64::from(self.flash_probability),
            _ => return None,
        };
        Some(value)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 2 {
            return Err(invalid("rows", "a gem pair needs at least two rows"));
        }
        if self.columns == 0 {
            return Err(invalid("columns", "must be positive"));
        }
        for (key, size) in [("rows", self.rows), ("columns", self.columns)] {
            if size > MAX_GRID_SIZE {
                return Err(invalid(key, format!("{size} exceeds {MAX_GRID_SIZE}")));
            }
        }
        if self.spawn_column >= self.columns {
            return Err(invalid(
                "SpawnColumn",
                format!("{} is outside {} columns", self.spawn_column, self.columns),
            ));
        }
        if self.normal_gravity == 0 {
            return Err(invalid("NormalGravity", "must be positive"));
        }
        for (key, multiplier) in [
            ("GravityMultiplier", self.gravity_multiplier),
            ("StrongestGravityMultiplier", self.strongest_gravity_multiplier),
        ] {
            if multiplier == 0 {
                return Err(invalid(key, "must be positive"));
            }
            let gravity = u32::from(self.normal_gravity) * u32::from(multiplier);
            if gravity > u32::from(CELL_SIZE_IN_PIXELS) {
                return Err(invalid(
                    key,
                    format!("{gravity} px per tick exceeds one cell ({CELL_SIZE_IN_PIXELS} px)"),
                ));
            }
        }
        if u16::from(self.chest_probability) + u16::from(self.flash_probability) > 100 {
            return Err(invalid(
                "ChestProbability",
                "chest and flash probabilities add up to more than 100",
            ));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}
