//! # Action System
//!
//! The closed set of intents an actor can issue, and how each one resolves
//! against the world.
//!
//! Every action resolves synchronously. Failing to move into a wall or an
//! occupied cell is an ordinary outcome, not an error; errors are reserved for
//! misuse such as naming an actor that is not in the world.

use crate::game::{EntityId, GridId, Position, World};
use crate::{DelveError, DelveResult};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// An intent issued by an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// End the session
    Escape { actor: EntityId },
    /// Step in a direction, attacking whatever blocks the destination
    Bump { actor: EntityId, dx: i32, dy: i32 },
    /// Step in a direction if the destination is free
    Move { actor: EntityId, dx: i32, dy: i32 },
    /// Attack the blocking entity in a direction
    Melee { actor: EntityId, dx: i32, dy: i32 },
}

/// What happened when an action was performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The actor changed position
    Moved { from: Position, to: Position },
    /// The destination was out of bounds, not walkable or occupied
    Blocked,
    /// The actor attacked another entity
    Attacked { target: EntityId, message: String },
    /// There was nothing to attack
    NoTarget,
    /// The actor asked to end the session
    Escaped,
}

impl ActionOutcome {
    /// Whether the outcome changed the world.
    pub fn changed_world(&self) -> bool {
        matches!(self, ActionOutcome::Moved { .. })
    }
}

impl Action {
    /// The entity performing this action.
    pub fn actor(&self) -> EntityId {
        match *self {
            Action::Escape { actor }
            | Action::Bump { actor, .. }
            | Action::Move { actor, .. }
            | Action::Melee { actor, .. } => actor,
        }
    }

    /// Resolves the action against `world`.
    pub fn perform(&self, world: &mut World) -> DelveResult<ActionOutcome> {
        match *self {
            Action::Escape { actor } => {
                debug!("Entity {} requested escape", actor);
                Ok(ActionOutcome::Escaped)
            }
            Action::Bump { actor, dx, dy } => perform_bump(world, actor, dx, dy),
            Action::Move { actor, dx, dy } => perform_move(world, actor, dx, dy),
            Action::Melee { actor, dx, dy } => perform_melee(world, actor, dx, dy),
        }
    }
}

/// Looks up the actor's grid and the cell it is trying to reach.
fn destination(
    world: &World,
    actor: EntityId,
    dx: i32,
    dy: i32,
) -> DelveResult<(GridId, Position, Position)> {
    let entity = world
        .entity(actor)
        .ok_or_else(|| DelveError::InvalidState(format!("Actor {} not found", actor)))?;
    let grid = entity
        .grid
        .ok_or_else(|| DelveError::InvalidState(format!("Actor {} is not on a grid", actor)))?;
    Ok((grid, entity.position, entity.position.offset(dx, dy)))
}

fn perform_bump(world: &mut World, actor: EntityId, dx: i32, dy: i32) -> DelveResult<ActionOutcome> {
    let (grid, _, dest) = destination(world, actor, dx, dy)?;

    if world.blocking_entity_at(grid, dest).is_some() {
        perform_melee(world, actor, dx, dy)
    } else {
        perform_move(world, actor, dx, dy)
    }
}

fn perform_melee(world: &mut World, actor: EntityId, dx: i32, dy: i32) -> DelveResult<ActionOutcome> {
    let (grid, _, dest) = destination(world, actor, dx, dy)?;

    match world.blocking_entity_at(grid, dest) {
        Some(target) => {
            let message = format!("You kick the {}, much to its annoyance!", target.name);
            debug!("{}", message);
            Ok(ActionOutcome::Attacked {
                target: target.id,
                message,
            })
        }
        None => Ok(ActionOutcome::NoTarget),
    }
}

fn perform_move(world: &mut World, actor: EntityId, dx: i32, dy: i32) -> DelveResult<ActionOutcome> {
    let (grid_id, from, dest) = destination(world, actor, dx, dy)?;

    let grid = world
        .grid(grid_id)
        .ok_or_else(|| DelveError::InvalidState(format!("Grid {} not found", grid_id)))?;

    if !grid.in_bounds(dest) || !grid.is_walkable(dest) {
        trace!("Move to {:?} blocked by terrain", dest);
        return Ok(ActionOutcome::Blocked);
    }
    if world.blocking_entity_at(grid_id, dest).is_some() {
        trace!("Move to {:?} blocked by an entity", dest);
        return Ok(ActionOutcome::Blocked);
    }

    world.place(actor, dest, None)?;
    Ok(ActionOutcome::Moved { from, to: dest })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new_entity_id, orc, player, MapGrid, TileKind};

    /// 10x10 all-floor world with the player at (5, 5).
    fn setup() -> (World, EntityId) {
        let mut world = World::new(MapGrid::filled(0, 10, 10, TileKind::Floor));
        let mut hero = player().spawn(new_entity_id(), Position::new(5, 5));
        hero.grid = Some(0);
        let id = hero.id;
        world.add_entity(hero);
        (world, id)
    }

    fn add_orc(world: &mut World, pos: Position) -> EntityId {
        let mut monster = orc().spawn(new_entity_id(), pos);
        monster.grid = Some(0);
        let id = monster.id;
        world.add_entity(monster);
        id
    }

    fn position(world: &World, id: EntityId) -> Position {
        world.entity(id).unwrap().position
    }

    #[test]
    fn test_move_into_open_floor() {
        let (mut world, hero) = setup();
        let outcome = Action::Move { actor: hero, dx: 1, dy: 0 }
            .perform(&mut world)
            .unwrap();

        assert_eq!(
            outcome,
            ActionOutcome::Moved {
                from: Position::new(5, 5),
                to: Position::new(6, 5)
            }
        );
        assert_eq!(position(&world, hero), Position::new(6, 5));
    }

    #[test]
    fn test_move_into_wall_is_a_no_op() {
        let (mut world, hero) = setup();
        world
            .current_mut()
            .unwrap()
            .set_tile(Position::new(6, 5), TileKind::Wall);

        let outcome = Action::Move { actor: hero, dx: 1, dy: 0 }
            .perform(&mut world)
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Blocked);
        assert_eq!(position(&world, hero), Position::new(5, 5));
    }

    #[test]
    fn test_move_off_the_map_is_a_no_op() {
        let (mut world, hero) = setup();
        world.place(hero, Position::new(0, 0), None).unwrap();

        let outcome = Action::Move { actor: hero, dx: -1, dy: 0 }
            .perform(&mut world)
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Blocked);
        assert_eq!(position(&world, hero), Position::new(0, 0));
    }

    #[test]
    fn test_move_into_blocking_entity_is_a_no_op() {
        let (mut world, hero) = setup();
        add_orc(&mut world, Position::new(5, 4));

        let outcome = Action::Move { actor: hero, dx: 0, dy: -1 }
            .perform(&mut world)
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Blocked);
        assert_eq!(position(&world, hero), Position::new(5, 5));
    }

    #[test]
    fn test_bump_resolves_to_melee() {
        let (mut world, hero) = setup();
        let target = add_orc(&mut world, Position::new(6, 5));

        let outcome = Action::Bump { actor: hero, dx: 1, dy: 0 }
            .perform(&mut world)
            .unwrap();

        match outcome {
            ActionOutcome::Attacked { target: hit, message } => {
                assert_eq!(hit, target);
                assert!(message.contains("Orc"));
            }
            other => panic!("expected melee, got {:?}", other),
        }
        assert_eq!(position(&world, hero), Position::new(5, 5));
        assert_eq!(position(&world, target), Position::new(6, 5));
    }

    #[test]
    fn test_bump_resolves_to_move() {
        let (mut world, hero) = setup();
        let outcome = Action::Bump { actor: hero, dx: -1, dy: 1 }
            .perform(&mut world)
            .unwrap();

        assert!(outcome.changed_world());
        assert_eq!(position(&world, hero), Position::new(4, 6));
    }

    #[test]
    fn test_melee_without_target() {
        let (mut world, hero) = setup();
        let outcome = Action::Melee { actor: hero, dx: 1, dy: 0 }
            .perform(&mut world)
            .unwrap();
        assert_eq!(outcome, ActionOutcome::NoTarget);
    }

    #[test]
    fn test_escape() {
        let (mut world, hero) = setup();
        let action = Action::Escape { actor: hero };
        assert_eq!(action.actor(), hero);
        assert_eq!(action.perform(&mut world).unwrap(), ActionOutcome::Escaped);
    }

    #[test]
    fn test_unknown_actor_is_an_error() {
        let (mut world, _) = setup();
        let result = Action::Move {
            actor: new_entity_id(),
            dx: 1,
            dy: 0,
        }
        .perform(&mut world);
        assert!(matches!(result, Err(DelveError::InvalidState(_))));
    }
}
