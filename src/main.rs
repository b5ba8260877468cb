//! # Delve Main Entry Point
//!
//! Loads the configuration, generates a floor, and runs the game loop in a
//! macroquad window.

use clap::Parser;
use delve::{
    AsciiSink, DelveResult, Engine, GameConfig, MacroquadDisplay, TurnStatus,
};
use log::{error, info};
use macroquad::prelude::*;
use std::path::PathBuf;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A small turn-based dungeon crawler")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with game settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of room placement attempts
    #[arg(long)]
    max_rooms: Option<u32>,

    /// Print the first frame as text and exit. The macroquad window still
    /// opens briefly, since the whole binary runs inside its event loop.
    #[arg(long)]
    ascii: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Delve")]
async fn main() -> DelveResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Delve v{}", delve::VERSION);

    let config = load_config(&args)?;
    let seed = config.resolve_seed();
    info!("Generating dungeon with seed {}", seed);

    let mut engine = Engine::from_config(&config, seed)?;
    engine
        .messages
        .add("Hello and welcome, adventurer, to yet another dungeon!");

    if args.ascii {
        let mut sink = AsciiSink::new();
        engine.render(&mut sink)?;
        if let Some(frame) = sink.last_frame() {
            println!("{}", frame);
        }
        return Ok(());
    }

    run_game_loop(&config, &mut engine).await
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => tracing::Level::ERROR,
            "warn" => tracing::Level::WARN,
            "debug" => tracing::Level::DEBUG,
            "trace" => tracing::Level::TRACE,
            _ => tracing::Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .init();
    }
}

/// Defaults, then the config file, then command-line overrides.
fn load_config(args: &Args) -> DelveResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(max_rooms) = args.max_rooms {
        config.max_rooms = max_rooms;
    }

    config.validate()?;
    Ok(config)
}

/// Main game loop: one batch of input events, then one frame.
async fn run_game_loop(config: &GameConfig, engine: &mut Engine) -> DelveResult<()> {
    prevent_quit();
    let mut display = MacroquadDisplay::new(
        config.screen_width,
        config.screen_height,
        config.map_height,
    );

    'game: loop {
        for event in display.poll_input() {
            match engine.handle_event(event) {
                Ok(TurnStatus::Terminated) => break 'game,
                Ok(_) => {}
                Err(e) => {
                    error!("Turn failed: {}", e);
                    return Err(e);
                }
            }
        }

        engine.render(&mut display)?;
        display.render_messages(engine.messages.recent(display.message_rows as usize));

        next_frame().await;
    }

    info!("Goodbye after {} turns", engine.turn_number);
    Ok(())
}
