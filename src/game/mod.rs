//! # Game Module
//!
//! Core world representation, entity records and turn resolution.
//!
//! This module contains the fundamental building blocks of the core:
//! - Tile catalog and map grid with visibility overlays
//! - Entity records and the world arena that owns them
//! - Field of view computation
//! - Action resolution and the turn engine

pub mod actions;
pub mod engine;
pub mod entities;
pub mod fov;
pub mod map;
pub mod tiles;
pub mod world;

pub use actions::*;
pub use engine::*;
pub use entities::*;
pub use fov::*;
pub use map::*;
pub use tiles::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a 2D coordinate on a map grid.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by the given offsets.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Squared Euclidean distance, exact in integers.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.distance_squared(pos2), 25);
    /// ```
    pub fn distance_squared(self, other: Position) -> i64 {
        let delta = self - other;
        let (dx, dy) = (delta.x as i64, delta.y as i64);
        dx * dx + dy * dy
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Directions for movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Direction {
    /// Converts a direction to a `(dx, dy)` delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Direction;
    ///
    /// assert_eq!(Direction::North.to_delta(), (0, -1));
    /// ```
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Northeast => (1, -1),
            Direction::Northwest => (-1, -1),
            Direction::Southeast => (1, 1),
            Direction::Southwest => (-1, 1),
        }
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Identifier of a map grid held by the [`World`].
pub type GridId = u32;

/// Creates a new random entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_offset() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.offset(1, 0), Position::new(6, 5));
        assert_eq!(pos.offset(-2, 3), Position::new(3, 8));
    }

    #[test]
    fn test_position_distances() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(b.distance_squared(a), 25);
        assert_eq!(Position::new(5, 10) - Position::new(3, 2), Position::new(2, 8));
    }

    #[test]
    fn test_direction_deltas_are_single_steps() {
        for direction in [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Northeast,
            Direction::Northwest,
            Direction::Southeast,
            Direction::Southwest,
        ] {
            let (dx, dy) = direction.to_delta();
            assert!(dx.abs() <= 1 && dy.abs() <= 1);
            assert_ne!((dx, dy), (0, 0));
        }
        assert_eq!(Direction::Southwest.to_delta(), (-1, 1));
    }

    #[test]
    fn test_entity_id_uniqueness() {
        assert_ne!(new_entity_id(), new_entity_id());
    }
}
