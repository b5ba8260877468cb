//! # Delve
//!
//! The turn-based core of a grid roguelike.
//!
//! ## Architecture Overview
//!
//! The core is split into a handful of modules, leaves first:
//!
//! - **Tiles**: static catalog of tile kinds and their graphics
//! - **Map**: the tile grid with its visible/explored overlays
//! - **World**: the entity arena and grid membership index
//! - **Generation**: room-and-corridor dungeon generation with monster placement
//! - **Field of view**: symmetric shadowcasting from a single viewpoint
//! - **Actions**: closed set of intents resolved against the world
//! - **Engine**: turn sequencing and hand-off to a display sink
//!
//! Rendering and raw input are external collaborators. The core produces frames
//! for any [`DisplaySink`] and consumes [`InputEvent`]s.

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

pub use config::GameConfig;
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Delve engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values cannot produce a playable game
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
