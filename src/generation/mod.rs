//! # Generation Module
//!
//! Procedural dungeon generation: room placement, corridor carving and
//! monster placement.
//!
//! All randomness flows through an explicit [`StdRng`] so that a seed fully
//! determines the generated dungeon.

pub mod dungeon;
pub mod encounters;

pub use dungeon::*;
pub use encounters::*;

use crate::game::{Entity, MapGrid, Position};
use crate::{DelveError, DelveResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for dungeon generation.
///
/// All values are fixed at construction time and validated once before
/// generation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Number of room placement attempts
    pub max_rooms: u32,
    /// Minimum room width/height
    pub room_min_size: u32,
    /// Maximum room width/height
    pub room_max_size: u32,
    /// Upper bound on monsters spawned per room
    pub max_monsters_per_room: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration for an 80x45 floor.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert!(config.validate().is_ok());
    /// assert!(config.room_max_size >= config.room_min_size);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: 80,
            height: 45,
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            max_monsters_per_room: 2,
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 40,
            height: 30,
            max_rooms: 12,
            room_min_size: 4,
            room_max_size: 8,
            max_monsters_per_room: 2,
        }
    }

    /// Checks that the parameters can produce at least one room.
    pub fn validate(&self) -> DelveResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DelveError::InvalidConfig(format!(
                "map dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_rooms == 0 {
            return Err(DelveError::InvalidConfig(
                "max_rooms must be at least 1".to_string(),
            ));
        }
        // Rooms narrower than 2 have no interior to carve or populate.
        if self.room_min_size < 2 {
            return Err(DelveError::InvalidConfig(format!(
                "room_min_size must be at least 2, got {}",
                self.room_min_size
            )));
        }
        if self.room_min_size > self.room_max_size {
            return Err(DelveError::InvalidConfig(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )));
        }
        // A room of size s needs x in [0, width - s - 1].
        if self.room_max_size >= self.width || self.room_max_size >= self.height {
            return Err(DelveError::InvalidConfig(format!(
                "rooms up to {} cells do not fit a {}x{} map",
                self.room_max_size, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// A rectangular room, described by its outer corners.
///
/// The outer ring is left as wall; only the interior is carved. Rooms exist
/// only while a dungeon is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectangularRoom {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectangularRoom {
    /// Creates a room from its top-left corner and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, RectangularRoom};
    ///
    /// let room = RectangularRoom::new(20, 15, 10, 15);
    /// assert_eq!(room.x2, 30);
    /// assert_eq!(room.center(), Position::new(25, 22));
    /// ```
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Integer midpoint of the room.
    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Cells strictly inside the outer corners.
    pub fn inner(&self) -> impl Iterator<Item = Position> {
        let (x1, x2) = (self.x1, self.x2);
        ((self.y1 + 1)..self.y2).flat_map(move |y| ((x1 + 1)..x2).map(move |x| Position::new(x, y)))
    }

    /// Whether the bounding boxes overlap. Shared edges count as overlap.
    pub fn intersects(&self, other: &RectangularRoom) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Whether `pos` is strictly inside the room.
    pub fn contains_inner(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }
}

/// The result of generating one floor.
#[derive(Debug, Clone)]
pub struct Dungeon {
    /// Carved terrain
    pub grid: MapGrid,
    /// Accepted rooms in placement order
    pub rooms: Vec<RectangularRoom>,
    /// Center of the first accepted room
    pub spawn_point: Position,
    /// Monsters to register alongside the grid
    pub monsters: Vec<Entity>,
}

/// Trait for procedural generators.
///
/// Generators receive the configuration and the random source explicitly so
/// their output is reproducible.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::game::EntityId;
    use rand::{Rng, SeedableRng};

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Draws an entity ID from `rng`, so seeded runs reproduce their IDs.
    pub fn random_entity_id(rng: &mut StdRng) -> EntityId {
        uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
    }
}
