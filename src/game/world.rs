//! # World
//!
//! Central arena for entity records and the map grids they live on.
//!
//! Entities are owned here and referenced by [`EntityId`]. Each grid keeps an
//! index of the ids placed on it, and each record remembers its grid. The two
//! sides are only ever updated together by the methods below.

use crate::game::{Entity, EntityId, GridId, MapGrid, Position};
use crate::generation::Dungeon;
use crate::{DelveError, DelveResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All game data the turn engine owns for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Map grids, indexed by ID
    pub grids: HashMap<GridId, MapGrid>,
    /// The grid the player is currently on
    pub current_grid: GridId,
    /// All entities, indexed by ID
    entities: HashMap<EntityId, Entity>,
}

impl World {
    /// Creates a world containing a single grid.
    pub fn new(grid: MapGrid) -> Self {
        let current_grid = grid.id;
        let mut grids = HashMap::new();
        grids.insert(grid.id, grid);
        Self {
            grids,
            current_grid,
            entities: HashMap::new(),
        }
    }

    /// Builds a world from a generated dungeon.
    ///
    /// The player is placed at the dungeon's spawn point and every generated
    /// monster is registered on the dungeon's grid.
    pub fn from_dungeon(dungeon: Dungeon, mut player: Entity) -> DelveResult<Self> {
        let grid_id = dungeon.grid.id;
        let mut world = Self::new(dungeon.grid);

        player.position = dungeon.spawn_point;
        player.grid = Some(grid_id);
        world.add_entity(player);

        for mut monster in dungeon.monsters {
            monster.grid = Some(grid_id);
            world.add_entity(monster);
        }

        info!(
            "World ready: {} entities on grid {}",
            world.entities.len(),
            grid_id
        );
        Ok(world)
    }

    /// Adds another grid. An existing grid with the same ID is replaced.
    pub fn add_grid(&mut self, grid: MapGrid) {
        self.grids.insert(grid.id, grid);
    }

    pub fn grid(&self, grid_id: GridId) -> Option<&MapGrid> {
        self.grids.get(&grid_id)
    }

    pub fn grid_mut(&mut self, grid_id: GridId) -> Option<&mut MapGrid> {
        self.grids.get_mut(&grid_id)
    }

    /// Gets the grid the session is playing on.
    pub fn current(&self) -> DelveResult<&MapGrid> {
        self.grids
            .get(&self.current_grid)
            .ok_or_else(|| DelveError::InvalidState("No current grid".to_string()))
    }

    pub fn current_mut(&mut self) -> DelveResult<&mut MapGrid> {
        self.grids
            .get_mut(&self.current_grid)
            .ok_or_else(|| DelveError::InvalidState("No current grid".to_string()))
    }

    /// Adds an entity to the arena and to the grid named by its `grid` field.
    ///
    /// Adding an entity whose ID is already present is a no-op.
    pub fn add_entity(&mut self, entity: Entity) {
        if self.entities.contains_key(&entity.id) {
            return;
        }
        if let Some(grid) = entity.grid.and_then(|id| self.grids.get_mut(&id)) {
            grid.add_entity(entity.id);
        }
        self.entities.insert(entity.id, entity);
    }

    /// Removes an entity from the arena and from its grid.
    ///
    /// Removing an absent entity is a no-op and returns `None`.
    pub fn remove_entity(&mut self, entity_id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&entity_id)?;
        if let Some(grid) = entity.grid.and_then(|id| self.grids.get_mut(&id)) {
            grid.remove_entity(entity_id);
        }
        Some(entity)
    }

    pub fn entity(&self, entity_id: EntityId) -> Option<&Entity> {
        self.entities.get(&entity_id)
    }

    pub fn entity_mut(&mut self, entity_id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&entity_id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entities placed on `grid_id`, in the order they were added.
    pub fn entities_on(&self, grid_id: GridId) -> impl Iterator<Item = &Entity> {
        self.grids
            .get(&grid_id)
            .map(|grid| grid.entity_ids())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.entities.get(id))
    }

    /// Finds the entity that blocks movement at `pos` on `grid_id`.
    ///
    /// At most one blocking entity may occupy a cell.
    pub fn blocking_entity_at(&self, grid_id: GridId, pos: Position) -> Option<&Entity> {
        let mut blocking = self
            .entities_on(grid_id)
            .filter(|entity| entity.blocks_movement && entity.position == pos);
        let found = blocking.next();
        debug_assert!(
            blocking.next().is_none(),
            "more than one blocking entity at ({}, {})",
            pos.x,
            pos.y
        );
        found
    }

    /// Moves an entity to `pos`, optionally onto another grid.
    ///
    /// When `grid_id` names a different grid than the entity's current one,
    /// the entity leaves the old grid's index and joins the new one. The target
    /// grid is checked before anything changes, so a failed call leaves the
    /// world untouched.
    pub fn place(
        &mut self,
        entity_id: EntityId,
        pos: Position,
        grid_id: Option<GridId>,
    ) -> DelveResult<()> {
        if let Some(target) = grid_id {
            if !self.grids.contains_key(&target) {
                return Err(DelveError::InvalidState(format!(
                    "Cannot place entity {} on unknown grid {}",
                    entity_id, target
                )));
            }
        }

        let entity = self.entities.get_mut(&entity_id).ok_or_else(|| {
            DelveError::InvalidState(format!("Entity {} not found for placement", entity_id))
        })?;

        entity.position = pos;

        if let Some(target) = grid_id {
            if entity.grid != Some(target) {
                let previous = entity.grid.replace(target);
                if let Some(old) = previous.and_then(|id| self.grids.get_mut(&id)) {
                    old.remove_entity(entity_id);
                }
                if let Some(new) = self.grids.get_mut(&target) {
                    new.add_entity(entity_id);
                }
                debug!(
                    "Entity {} moved from grid {:?} to grid {}",
                    entity_id, previous, target
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new_entity_id, orc, player, TileKind};

    fn open_world() -> World {
        World::new(MapGrid::filled(0, 10, 10, TileKind::Floor))
    }

    fn spawn_on(world: &mut World, grid: GridId, pos: Position) -> EntityId {
        let mut entity = orc().spawn(new_entity_id(), pos);
        entity.grid = Some(grid);
        let id = entity.id;
        world.add_entity(entity);
        id
    }

    #[test]
    fn test_add_and_remove_are_idempotent() {
        let mut world = open_world();
        let mut entity = player().spawn(new_entity_id(), Position::new(1, 1));
        entity.grid = Some(0);
        let id = entity.id;

        world.add_entity(entity.clone());
        world.add_entity(entity);
        assert_eq!(world.entity_count(), 1);
        assert_eq!(world.current().unwrap().entity_ids().len(), 1);

        assert!(world.remove_entity(id).is_some());
        assert!(world.remove_entity(id).is_none());
        assert_eq!(world.entity_count(), 0);
        assert!(!world.current().unwrap().contains_entity(id));
    }

    #[test]
    fn test_blocking_entity_lookup() {
        let mut world = open_world();
        let id = spawn_on(&mut world, 0, Position::new(4, 4));

        assert_eq!(
            world.blocking_entity_at(0, Position::new(4, 4)).map(|e| e.id),
            Some(id)
        );
        assert!(world.blocking_entity_at(0, Position::new(4, 5)).is_none());
        assert!(world.blocking_entity_at(7, Position::new(4, 4)).is_none());
    }

    #[test]
    fn test_non_blocking_entity_is_ignored() {
        let mut world = open_world();
        let id = spawn_on(&mut world, 0, Position::new(2, 2));
        world.entity_mut(id).unwrap().blocks_movement = false;

        assert!(world.blocking_entity_at(0, Position::new(2, 2)).is_none());
    }

    #[test]
    fn test_place_within_grid() {
        let mut world = open_world();
        let id = spawn_on(&mut world, 0, Position::new(1, 1));

        world.place(id, Position::new(3, 3), None).unwrap();
        assert_eq!(world.entity(id).unwrap().position, Position::new(3, 3));
        assert_eq!(world.entity(id).unwrap().grid, Some(0));
    }

    #[test]
    fn test_place_across_grids_moves_membership() {
        let mut world = open_world();
        world.add_grid(MapGrid::filled(1, 10, 10, TileKind::Floor));
        let id = spawn_on(&mut world, 0, Position::new(1, 1));

        world.place(id, Position::new(5, 5), Some(1)).unwrap();

        assert!(!world.grid(0).unwrap().contains_entity(id));
        assert!(world.grid(1).unwrap().contains_entity(id));
        assert_eq!(world.entity(id).unwrap().grid, Some(1));
        assert!(world.blocking_entity_at(1, Position::new(5, 5)).is_some());
    }

    #[test]
    fn test_place_on_unknown_grid_changes_nothing() {
        let mut world = open_world();
        let id = spawn_on(&mut world, 0, Position::new(1, 1));

        assert!(world.place(id, Position::new(5, 5), Some(9)).is_err());
        assert_eq!(world.entity(id).unwrap().position, Position::new(1, 1));
        assert!(world.grid(0).unwrap().contains_entity(id));
    }

    #[test]
    fn test_place_unknown_entity_fails() {
        let mut world = open_world();
        assert!(world
            .place(new_entity_id(), Position::new(0, 0), None)
            .is_err());
    }
}
