//! # Map Grid
//!
//! A width×height grid of tile kinds with two boolean overlays: cells that are
//! currently visible and cells that have ever been explored.
//!
//! Cell queries do not return sentinels for out-of-bounds positions. Callers
//! outside of generation must check [`MapGrid::in_bounds`] first; a lookup
//! outside the grid is a programming error and panics.

use crate::game::{EntityId, GridId, Position, TileGraphic, TileKind, SHROUD};
use serde::{Deserialize, Serialize};

/// A single dungeon floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapGrid {
    /// Identifier of this grid inside the world
    pub id: GridId,
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    tiles: Vec<TileKind>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    /// Entities currently placed on this grid, in insertion order
    entities: Vec<EntityId>,
}

impl MapGrid {
    /// Creates a grid filled with walls, nothing visible and nothing explored.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{MapGrid, Position, TileKind};
    ///
    /// let grid = MapGrid::new(0, 10, 8);
    /// assert_eq!(grid.tile(Position::new(3, 3)), TileKind::Wall);
    /// assert!(!grid.in_bounds(Position::new(10, 0)));
    /// ```
    pub fn new(id: GridId, width: u32, height: u32) -> Self {
        Self::filled(id, width, height, TileKind::Wall)
    }

    /// Creates a grid where every cell holds `kind`.
    pub fn filled(id: GridId, width: u32, height: u32, kind: TileKind) -> Self {
        let cells = (width as usize) * (height as usize);
        Self {
            id,
            width,
            height,
            tiles: vec![kind; cells],
            visible: vec![false; cells],
            explored: vec![false; cells],
            entities: Vec::new(),
        }
    }

    /// True iff `0 <= x < width` and `0 <= y < height`.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.in_bounds(pos),
            "map query at ({}, {}) outside {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Tile kind at `pos`. Panics when out of bounds.
    pub fn tile(&self, pos: Position) -> TileKind {
        self.tiles[self.index(pos)]
    }

    /// Whether the tile at `pos` can be walked on. Panics when out of bounds.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos).walkable()
    }

    /// Whether the tile at `pos` lets light through. Panics when out of bounds.
    pub fn is_transparent(&self, pos: Position) -> bool {
        self.tile(pos).transparent()
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.visible[self.index(pos)]
    }

    pub fn is_explored(&self, pos: Position) -> bool {
        self.explored[self.index(pos)]
    }

    /// Overwrites a single tile.
    pub fn set_tile(&mut self, pos: Position, kind: TileKind) {
        let idx = self.index(pos);
        self.tiles[idx] = kind;
    }

    /// Overwrites every cell of `region` with `kind`.
    ///
    /// Regions are rectangles (room interiors) or lines (corridors); both are
    /// given as a sequence of cells.
    pub fn carve<I>(&mut self, region: I, kind: TileKind)
    where
        I: IntoIterator<Item = Position>,
    {
        for pos in region {
            self.set_tile(pos, kind);
        }
    }

    /// Clears the visible overlay. Explored cells are kept.
    pub fn clear_visible(&mut self) {
        self.visible.iter_mut().for_each(|cell| *cell = false);
    }

    /// Marks a cell as currently visible.
    pub fn mark_visible(&mut self, pos: Position) {
        let idx = self.index(pos);
        self.visible[idx] = true;
    }

    /// Folds the visible overlay into the explored overlay.
    ///
    /// Explored bits are only ever set here, never cleared.
    pub fn merge_visible_into_explored(&mut self) {
        for (explored, visible) in self.explored.iter_mut().zip(&self.visible) {
            *explored |= *visible;
        }
    }

    /// Graphic to draw at `pos`: lit when visible, dim when explored, shroud
    /// otherwise.
    pub fn graphic_at(&self, pos: Position) -> TileGraphic {
        let idx = self.index(pos);
        if self.visible[idx] {
            self.tiles[idx].light()
        } else if self.explored[idx] {
            self.tiles[idx].dark()
        } else {
            SHROUD
        }
    }

    /// Row-major graphics for the whole grid.
    pub fn frame_graphics(&self) -> Vec<TileGraphic> {
        self.positions().map(|pos| self.graphic_at(pos)).collect()
    }

    /// Iterates every cell position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Number of walkable cells.
    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.walkable()).count()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|cell| **cell).count()
    }

    pub fn explored_count(&self) -> usize {
        self.explored.iter().filter(|cell| **cell).count()
    }

    /// Entities placed on this grid.
    pub fn entity_ids(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn contains_entity(&self, entity_id: EntityId) -> bool {
        self.entities.contains(&entity_id)
    }

    /// Adds an entity to this grid. Adding a present entity is a no-op.
    pub fn add_entity(&mut self, entity_id: EntityId) {
        if !self.entities.contains(&entity_id) {
            self.entities.push(entity_id);
        }
    }

    /// Removes an entity from this grid. Removing an absent entity is a no-op.
    pub fn remove_entity(&mut self, entity_id: EntityId) {
        self.entities.retain(|&id| id != entity_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_entity_id;

    #[test]
    fn test_new_grid_is_solid_and_dark() {
        let grid = MapGrid::new(0, 10, 10);
        assert_eq!(grid.floor_count(), 0);
        assert_eq!(grid.visible_count(), 0);
        assert_eq!(grid.explored_count(), 0);
        assert_eq!(grid.graphic_at(Position::new(0, 0)), SHROUD);
    }

    #[test]
    fn test_in_bounds() {
        let grid = MapGrid::new(0, 10, 5);
        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(9, 4)));
        assert!(!grid.in_bounds(Position::new(10, 4)));
        assert!(!grid.in_bounds(Position::new(9, 5)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert!(!grid.in_bounds(Position::new(0, -1)));
    }

    #[test]
    fn test_carve_region() {
        let mut grid = MapGrid::new(0, 10, 10);
        let region = (2..5).flat_map(|y| (2..5).map(move |x| Position::new(x, y)));
        grid.carve(region, TileKind::Floor);

        assert_eq!(grid.floor_count(), 9);
        assert!(grid.is_walkable(Position::new(3, 3)));
        assert!(!grid.is_walkable(Position::new(5, 5)));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_query_panics() {
        let grid = MapGrid::new(0, 10, 10);
        grid.is_walkable(Position::new(10, 10));
    }

    #[test]
    fn test_explored_survives_visibility_reset() {
        let mut grid = MapGrid::filled(0, 5, 5, TileKind::Floor);
        let pos = Position::new(2, 2);
        grid.mark_visible(pos);
        grid.merge_visible_into_explored();
        assert_eq!(grid.graphic_at(pos), TileKind::Floor.light());

        grid.clear_visible();
        grid.merge_visible_into_explored();
        assert!(!grid.is_visible(pos));
        assert!(grid.is_explored(pos));
        assert_eq!(grid.graphic_at(pos), TileKind::Floor.dark());
    }

    #[test]
    fn test_entity_membership_is_a_set() {
        let mut grid = MapGrid::new(0, 5, 5);
        let id = new_entity_id();

        grid.add_entity(id);
        grid.add_entity(id);
        assert_eq!(grid.entity_ids().len(), 1);

        grid.remove_entity(id);
        grid.remove_entity(id);
        assert!(!grid.contains_entity(id));
    }

    #[test]
    fn test_frame_graphics_is_row_major() {
        let mut grid = MapGrid::new(0, 3, 2);
        grid.set_tile(Position::new(2, 0), TileKind::Floor);
        grid.mark_visible(Position::new(2, 0));

        let frame = grid.frame_graphics();
        assert_eq!(frame.len(), 6);
        assert_eq!(frame[2], TileKind::Floor.light());
        assert_eq!(frame[5], SHROUD);
    }
}
