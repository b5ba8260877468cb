//! # Entities
//!
//! Positioned, renderable actors: the player and the monsters that populate
//! the dungeon. Records live in the [`World`](crate::World) arena and are
//! referenced by [`EntityId`]; the grid an entity stands on is kept as
//! metadata on the record.

use crate::game::{EntityId, GridId, Position, Rgb};
use serde::{Deserialize, Serialize};

/// An actor placed on a map grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub glyph: char,
    pub color: Rgb,
    pub name: String,
    /// Whether other blocking entities may share this cell
    pub blocks_movement: bool,
    /// Grid this entity currently belongs to, if any
    pub grid: Option<GridId>,
}

/// Static description of an entity kind, stamped out with [`EntityTemplate::spawn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTemplate {
    pub glyph: char,
    pub color: Rgb,
    pub name: &'static str,
    pub blocks_movement: bool,
}

impl EntityTemplate {
    /// Creates a fresh entity record from this template.
    ///
    /// The record is not attached to any grid until it is added to a world.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{new_entity_id, orc, Position};
    ///
    /// let entity = orc().spawn(new_entity_id(), Position::new(3, 4));
    /// assert_eq!(entity.name, "Orc");
    /// assert!(entity.grid.is_none());
    /// ```
    pub fn spawn(&self, id: EntityId, position: Position) -> Entity {
        Entity {
            id,
            position,
            glyph: self.glyph,
            color: self.color,
            name: self.name.to_string(),
            blocks_movement: self.blocks_movement,
            grid: None,
        }
    }
}

pub fn player() -> EntityTemplate {
    EntityTemplate {
        glyph: '@',
        color: Rgb::WHITE,
        name: "Player",
        blocks_movement: true,
    }
}

pub fn orc() -> EntityTemplate {
    EntityTemplate {
        glyph: 'o',
        color: Rgb::new(63, 127, 63),
        name: "Orc",
        blocks_movement: true,
    }
}

pub fn troll() -> EntityTemplate {
    EntityTemplate {
        glyph: 'T',
        color: Rgb::new(0, 127, 0),
        name: "Troll",
        blocks_movement: true,
    }
}
