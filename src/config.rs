//! # Game Configuration
//!
//! Startup settings: built-in defaults, optionally overridden by a JSON file.
//! Command-line overrides are applied by the binary on top of the result.

use crate::game::DEFAULT_FOV_RADIUS;
use crate::generation::GenerationConfig;
use crate::{DelveError, DelveResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings read once at startup.
///
/// Missing fields in a config file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Console width in cells
    pub screen_width: u32,
    /// Console height in cells
    pub screen_height: u32,
    /// Map width in cells
    pub map_width: u32,
    /// Map height in cells; the rows below it hold the message log
    pub map_height: u32,
    pub room_min_size: u32,
    pub room_max_size: u32,
    pub max_rooms: u32,
    pub max_monsters_per_room: u32,
    /// Player sight radius
    pub fov_radius: u32,
    /// Fixed seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Accept hjkl/yubn movement keys
    pub vi_keys: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 80,
            screen_height: 50,
            map_width: 80,
            map_height: 45,
            room_min_size: 6,
            room_max_size: 10,
            max_rooms: 30,
            max_monsters_per_room: 2,
            fov_radius: DEFAULT_FOV_RADIUS,
            seed: None,
            vi_keys: true,
        }
    }
}

impl GameConfig {
    /// Loads a config file, filling unspecified fields with defaults.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use delve::GameConfig;
    ///
    /// let config = GameConfig::from_json_file("delve.json").unwrap();
    /// println!("map is {}x{}", config.map_width, config.map_height);
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> DelveResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&contents)?;
        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the rest of the game cannot work with.
    pub fn validate(&self) -> DelveResult<()> {
        if self.map_width > self.screen_width || self.map_height > self.screen_height {
            return Err(DelveError::InvalidConfig(format!(
                "map {}x{} does not fit the {}x{} screen",
                self.map_width, self.map_height, self.screen_width, self.screen_height
            )));
        }
        self.generation_config(0).validate()
    }

    /// The configured seed, or a fresh random one when none is set.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Generation parameters for one floor.
    pub fn generation_config(&self, seed: u64) -> GenerationConfig {
        GenerationConfig {
            seed,
            width: self.map_width,
            height: self.map_height,
            max_rooms: self.max_rooms,
            room_min_size: self.room_min_size,
            room_max_size: self.room_max_size,
            max_monsters_per_room: self.max_monsters_per_room,
        }
    }
}
