//! # Encounter Placement
//!
//! Populates freshly carved rooms with monsters.

use crate::game::{orc, troll, Entity, EntityTemplate, Position};
use crate::generation::{utils, RectangularRoom};
use log::trace;
use rand::{rngs::StdRng, Rng};

/// Chance that a spawned monster is the weaker kind.
pub const ORC_CHANCE: f64 = 0.8;

/// Picks the monster kind for one spawn: mostly orcs, sometimes trolls.
pub fn roll_monster(rng: &mut StdRng) -> EntityTemplate {
    if rng.gen_bool(ORC_CHANCE) {
        orc()
    } else {
        troll()
    }
}

/// Spawns between zero and `max_monsters` monsters inside `room`.
///
/// Each monster gets a random interior cell. A cell already taken by the
/// player's spawn point or by an earlier monster is skipped, not retried.
/// New monsters are appended to `monsters`; the number added is returned.
pub fn place_monsters(
    room: &RectangularRoom,
    max_monsters: u32,
    spawn_point: Position,
    monsters: &mut Vec<Entity>,
    rng: &mut StdRng,
) -> usize {
    let count = rng.gen_range(0..=max_monsters);
    let mut placed = 0;

    for _ in 0..count {
        let pos = Position::new(
            rng.gen_range((room.x1 + 1)..=(room.x2 - 1)),
            rng.gen_range((room.y1 + 1)..=(room.y2 - 1)),
        );

        if pos == spawn_point || monsters.iter().any(|monster| monster.position == pos) {
            trace!("Skipped monster spawn at occupied cell {:?}", pos);
            continue;
        }

        let template = roll_monster(rng);
        let id = utils::random_entity_id(rng);
        monsters.push(template.spawn(id, pos));
        placed += 1;
    }

    placed
}
