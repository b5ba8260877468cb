//! # Turn Engine
//!
//! Sequences one game turn: resolve the player's action, give every other
//! entity its turn, recompute the field of view, then let a display sink draw
//! the settled state.

use crate::config::GameConfig;
use crate::game::{new_entity_id, player, recompute, Action, ActionOutcome, EntityId, World};
use crate::generation::{utils, DungeonGenerator, Generator};
use crate::input::{InputEvent, InputHandler};
use crate::rendering::DisplaySink;
use crate::{DelveError, DelveResult};
use log::{debug, info};
use std::collections::VecDeque;

/// Maximum number of messages kept in the log.
pub const MAX_MESSAGES: usize = 100;

/// Result of feeding one input event to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnStatus {
    /// The event produced no action; no turn passed
    Idle,
    /// A full turn was played
    Continued(ActionOutcome),
    /// The session has ended
    Terminated,
}

/// Bounded log of player-facing messages, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: VecDeque<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message, dropping the oldest once the log is full.
    pub fn add(&mut self, message: impl Into<String>) {
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The `count` most recent messages, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &str> {
        let skip = self.messages.len().saturating_sub(count);
        self.messages.iter().skip(skip).map(String::as_str)
    }
}

/// Owns the world for a session and drives it one turn at a time.
#[derive(Debug)]
pub struct Engine {
    /// World state, settled between turns
    pub world: World,
    /// The entity controlled by input
    pub player_id: EntityId,
    /// Sight radius for the player's field of view
    pub fov_radius: u32,
    /// Player-facing messages
    pub messages: MessageLog,
    /// Number of completed turns
    pub turn_number: u64,
    input_handler: InputHandler,
    running: bool,
}

impl Engine {
    /// Creates an engine and computes the first field of view so the first
    /// frame is not blank.
    pub fn new(world: World, player_id: EntityId, fov_radius: u32) -> DelveResult<Self> {
        if world.entity(player_id).is_none() {
            return Err(DelveError::InvalidState(format!(
                "Player {} is not in the world",
                player_id
            )));
        }

        let mut engine = Self {
            world,
            player_id,
            fov_radius,
            messages: MessageLog::new(),
            turn_number: 0,
            input_handler: InputHandler::new(),
            running: true,
        };
        engine.update_fov()?;
        Ok(engine)
    }

    /// Generates a fresh floor for `seed` and puts a new player on its spawn
    /// point.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Engine, GameConfig};
    ///
    /// let engine = Engine::from_config(&GameConfig::default(), 42).unwrap();
    /// assert!(engine.is_running());
    /// assert_eq!(engine.turn_number, 0);
    /// ```
    pub fn from_config(config: &GameConfig, seed: u64) -> DelveResult<Self> {
        let generation = config.generation_config(seed);
        let mut rng = utils::create_rng(&generation);
        let dungeon = DungeonGenerator::new().generate(&generation, &mut rng)?;

        let hero = player().spawn(new_entity_id(), dungeon.spawn_point);
        let player_id = hero.id;
        let world = World::from_dungeon(dungeon, hero)?;

        let input_handler = if config.vi_keys {
            InputHandler::new()
        } else {
            InputHandler::arrows_only()
        };
        Ok(Self::new(world, player_id, config.fov_radius)?.with_input_handler(input_handler))
    }

    /// Replaces the input handler, e.g. to disable vi-keys.
    pub fn with_input_handler(mut self, input_handler: InputHandler) -> Self {
        self.input_handler = input_handler;
        self
    }

    /// Whether the session is still accepting input.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Dispatches one input event and plays the resulting turn, if any.
    pub fn handle_event(&mut self, event: InputEvent) -> DelveResult<TurnStatus> {
        if !self.running {
            return Ok(TurnStatus::Idle);
        }

        match self.input_handler.dispatch(&event, self.player_id) {
            Some(action) => self.run_turn(action),
            None => Ok(TurnStatus::Idle),
        }
    }

    /// Plays one full turn for `action`.
    pub fn run_turn(&mut self, action: Action) -> DelveResult<TurnStatus> {
        let outcome = action.perform(&mut self.world)?;

        if outcome == ActionOutcome::Escaped {
            info!("Session ended after {} turns", self.turn_number);
            self.running = false;
            return Ok(TurnStatus::Terminated);
        }

        if let ActionOutcome::Attacked { message, .. } = &outcome {
            self.messages.add(message.clone());
        }

        self.handle_enemy_turns()?;
        self.update_fov()?;
        self.turn_number += 1;

        Ok(TurnStatus::Continued(outcome))
    }

    /// Gives every non-player entity on the current grid its turn.
    ///
    /// Monsters have no behaviour yet; each one only reports that it was
    /// offered a turn.
    fn handle_enemy_turns(&mut self) -> DelveResult<()> {
        let grid_id = self.world.current()?.id;
        for entity in self
            .world
            .entities_on(grid_id)
            .filter(|entity| entity.id != self.player_id)
        {
            debug!(
                "The {} wonders when it will get to take a real turn.",
                entity.name
            );
        }
        Ok(())
    }

    /// Recomputes visibility from the player's position.
    pub fn update_fov(&mut self) -> DelveResult<()> {
        let viewpoint = self
            .world
            .entity(self.player_id)
            .map(|player| player.position)
            .ok_or_else(|| DelveError::InvalidState("No player found".to_string()))?;
        let radius = self.fov_radius;
        recompute(self.world.current_mut()?, viewpoint, radius);
        Ok(())
    }

    /// Draws the current state to `sink`.
    ///
    /// Tiles first, then every entity standing on a visible cell, then the
    /// frame is presented and the sink cleared for the next one.
    pub fn render<S: DisplaySink>(&self, sink: &mut S) -> DelveResult<()> {
        let grid = self.world.current()?;
        sink.paint_tiles(grid.width, grid.height, &grid.frame_graphics());

        for entity in self.world.entities_on(grid.id) {
            if grid.in_bounds(entity.position) && grid.is_visible(entity.position) {
                sink.paint_glyph(entity.position, entity.glyph, entity.color);
            }
        }

        sink.present()?;
        sink.clear();
        Ok(())
    }
}
