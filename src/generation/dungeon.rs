//! # Dungeon Generation
//!
//! Room-and-corridor floors.
//!
//! The generator:
//! 1. Samples up to `max_rooms` candidate rooms, skipping any that intersect
//!    an accepted room (no retries, so sparse floors are expected)
//! 2. Carves each accepted room's interior to floor
//! 3. Joins every room to the previous one with an L-shaped corridor
//! 4. Populates each room with a handful of monsters

use crate::game::{MapGrid, Position, TileKind};
use crate::generation::{place_monsters, Dungeon, GenerationConfig, Generator, RectangularRoom};
use crate::utils::bresenham;
use crate::{DelveError, DelveResult};
use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng};

/// Room-and-corridor dungeon generator.
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator {
    /// ID given to the generated grid
    pub grid_id: u32,
}

impl DungeonGenerator {
    /// Creates a generator that produces grid 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::generation::utils;
    /// use delve::{DungeonGenerator, GenerationConfig, Generator};
    ///
    /// let config = GenerationConfig::new(7);
    /// let mut rng = utils::create_rng(&config);
    /// let dungeon = DungeonGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert!(dungeon.grid.is_walkable(dungeon.spawn_point));
    /// ```
    pub fn new() -> Self {
        Self { grid_id: 0 }
    }

    /// Samples a candidate room that lies fully inside the grid.
    fn sample_room(&self, config: &GenerationConfig, rng: &mut StdRng) -> RectangularRoom {
        let room_width = rng.gen_range(config.room_min_size..=config.room_max_size) as i32;
        let room_height = rng.gen_range(config.room_min_size..=config.room_max_size) as i32;
        let x = rng.gen_range(0..=(config.width as i32 - room_width - 1));
        let y = rng.gen_range(0..=(config.height as i32 - room_height - 1));
        RectangularRoom::new(x, y, room_width, room_height)
    }
}

impl Generator<Dungeon> for DungeonGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<Dungeon> {
        config.validate()?;

        let mut grid = MapGrid::new(self.grid_id, config.width, config.height);
        let mut rooms: Vec<RectangularRoom> = Vec::new();
        let mut monsters = Vec::new();
        let mut spawn_point = None;

        for attempt in 0..config.max_rooms {
            let new_room = self.sample_room(config, rng);

            if rooms.iter().any(|other| new_room.intersects(other)) {
                trace!("Rejected room candidate {} at {:?}", attempt, new_room);
                continue;
            }

            grid.carve(new_room.inner(), TileKind::Floor);

            match rooms.last() {
                None => spawn_point = Some(new_room.center()),
                Some(previous) => {
                    let tunnel = tunnel_between(previous.center(), new_room.center(), rng);
                    grid.carve(tunnel, TileKind::Floor);
                }
            }

            let spawn = spawn_point.unwrap_or_else(|| new_room.center());
            let placed = place_monsters(
                &new_room,
                config.max_monsters_per_room,
                spawn,
                &mut monsters,
                rng,
            );

            debug!(
                "Accepted room {} at ({}, {})-({}, {}) with {} monsters",
                rooms.len(),
                new_room.x1,
                new_room.y1,
                new_room.x2,
                new_room.y2,
                placed
            );
            rooms.push(new_room);
        }

        let spawn_point = spawn_point.ok_or_else(|| {
            DelveError::GenerationFailed(format!(
                "no room could be placed in {} attempts",
                config.max_rooms
            ))
        })?;

        let dungeon = Dungeon {
            grid,
            rooms,
            spawn_point,
            monsters,
        };
        self.validate(&dungeon, config)?;

        info!(
            "Generated {}x{} dungeon: {}/{} rooms, {} monsters, {} floor cells",
            config.width,
            config.height,
            dungeon.rooms.len(),
            config.max_rooms,
            dungeon.monsters.len(),
            dungeon.grid.floor_count()
        );

        Ok(dungeon)
    }

    fn validate(&self, dungeon: &Dungeon, _config: &GenerationConfig) -> DelveResult<()> {
        if dungeon.rooms.is_empty() {
            return Err(DelveError::GenerationFailed(
                "dungeon has no rooms".to_string(),
            ));
        }
        if !dungeon.grid.in_bounds(dungeon.spawn_point)
            || !dungeon.grid.is_walkable(dungeon.spawn_point)
        {
            return Err(DelveError::GenerationFailed(format!(
                "spawn point {:?} is not walkable",
                dungeon.spawn_point
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "DungeonGenerator"
    }
}

/// Returns an L-shaped path from `start` to `end`.
///
/// The path runs along one axis to a corner and then along the other. Which
/// axis comes first is a coin flip. Every cell appears once and consecutive
/// cells are orthogonal neighbours.
pub fn tunnel_between(start: Position, end: Position, rng: &mut StdRng) -> Vec<Position> {
    let corner = if rng.gen_bool(0.5) {
        // Horizontal, then vertical.
        Position::new(end.x, start.y)
    } else {
        // Vertical, then horizontal.
        Position::new(start.x, end.y)
    };

    let mut path = bresenham(start, corner);
    path.extend(bresenham(corner, end).into_iter().skip(1));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils;
    use rand::SeedableRng;

    #[test]
    fn test_generation_is_reproducible() {
        let config = GenerationConfig::new(12345);
        let generator = DungeonGenerator::new();

        let first = generator
            .generate(&config, &mut utils::create_rng(&config))
            .unwrap();
        let second = generator
            .generate(&config, &mut utils::create_rng(&config))
            .unwrap();

        assert_eq!(first.rooms, second.rooms);
        assert_eq!(first.spawn_point, second.spawn_point);
        assert_eq!(first.monsters, second.monsters);
    }

    #[test]
    fn test_rooms_do_not_overlap() {
        let config = GenerationConfig::new(99);
        let dungeon = DungeonGenerator::new()
            .generate(&config, &mut utils::create_rng(&config))
            .unwrap();

        assert!(!dungeon.rooms.is_empty());
        assert!(dungeon.rooms.len() <= config.max_rooms as usize);
        for (i, a) in dungeon.rooms.iter().enumerate() {
            for b in &dungeon.rooms[i + 1..] {
                assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn test_spawn_point_is_first_room_center() {
        let config = GenerationConfig::for_testing(5);
        let dungeon = DungeonGenerator::new()
            .generate(&config, &mut utils::create_rng(&config))
            .unwrap();

        assert_eq!(dungeon.spawn_point, dungeon.rooms[0].center());
        assert!(dungeon.grid.is_walkable(dungeon.spawn_point));
    }

    #[test]
    fn test_room_interiors_are_floor() {
        let config = GenerationConfig::for_testing(21);
        let dungeon = DungeonGenerator::new()
            .generate(&config, &mut utils::create_rng(&config))
            .unwrap();

        for room in &dungeon.rooms {
            assert!(room.inner().all(|pos| dungeon.grid.is_walkable(pos)));
        }
    }

    #[test]
    fn test_room_centers_are_connected() {
        let config = GenerationConfig::new(2024);
        let dungeon = DungeonGenerator::new()
            .generate(&config, &mut utils::create_rng(&config))
            .unwrap();

        // Flood fill from the spawn point over walkable cells.
        let grid = &dungeon.grid;
        let mut seen = vec![false; (grid.width * grid.height) as usize];
        let mut stack = vec![dungeon.spawn_point];
        while let Some(pos) = stack.pop() {
            let idx = (pos.y as u32 * grid.width + pos.x as u32) as usize;
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                let next = pos.offset(dx, dy);
                if grid.in_bounds(next) && grid.is_walkable(next) {
                    stack.push(next);
                }
            }
        }

        for room in &dungeon.rooms {
            let center = room.center();
            assert!(seen[(center.y as u32 * grid.width + center.x as u32) as usize]);
        }
    }

    #[test]
    fn test_invalid_config_fails_before_generation() {
        let config = GenerationConfig {
            room_min_size: 50,
            room_max_size: 50,
            ..GenerationConfig::for_testing(1)
        };
        let result = DungeonGenerator::new().generate(&config, &mut utils::create_rng(&config));
        assert!(matches!(result, Err(DelveError::InvalidConfig(_))));
    }

    #[test]
    fn test_tiny_rooms_generate_or_fail_cleanly() {
        for seed in 0..8 {
            let slivers = GenerationConfig {
                room_min_size: 1,
                room_max_size: 3,
                ..GenerationConfig::for_testing(seed)
            };
            let result =
                DungeonGenerator::new().generate(&slivers, &mut utils::create_rng(&slivers));
            assert!(matches!(result, Err(DelveError::InvalidConfig(_))));

            let smallest = GenerationConfig {
                room_min_size: 2,
                ..slivers
            };
            let dungeon = DungeonGenerator::new()
                .generate(&smallest, &mut utils::create_rng(&smallest))
                .unwrap();
            assert!(dungeon.grid.is_walkable(dungeon.spawn_point));
            assert!(dungeon
                .monsters
                .iter()
                .all(|m| dungeon.grid.is_walkable(m.position)));
        }
    }

    #[test]
    fn test_tunnel_between_is_l_shaped() {
        let mut rng = StdRng::seed_from_u64(3);
        let start = Position::new(25, 22);
        let end = Position::new(40, 22);

        for _ in 0..8 {
            let path = tunnel_between(start, end, &mut rng);
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            for pair in path.windows(2) {
                let step = pair[1] - pair[0];
                assert_eq!(step.x.abs() + step.y.abs(), 1);
            }
        }

        let diagonal_end = Position::new(30, 30);
        let path = tunnel_between(start, diagonal_end, &mut rng);
        let turns = path
            .windows(3)
            .filter(|w| (w[1] - w[0]) != (w[2] - w[1]))
            .count();
        assert_eq!(turns, 1);
        assert_eq!(path.len(), 5 + 8 + 1);
    }

    #[test]
    fn test_generator_type() {
        assert_eq!(DungeonGenerator::new().generator_type(), "DungeonGenerator");
    }
}
