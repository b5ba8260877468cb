//! # Rendering Module
//!
//! The display sink the turn engine draws into.
//!
//! The core hands over exactly the cells and colours to draw; pixels, windows
//! and terminals are the sink's business.

pub mod ascii;
pub mod display;

pub use ascii::*;
pub use display::*;

use crate::game::{Position, Rgb, TileGraphic};
use crate::DelveResult;

/// Receives one frame at a time from the engine.
///
/// A frame is one `paint_tiles` call, zero or more `paint_glyph` calls, then
/// `present` followed by `clear`.
pub trait DisplaySink {
    /// Paints the whole map from row-major graphics of `width * height` cells.
    fn paint_tiles(&mut self, width: u32, height: u32, tiles: &[TileGraphic]);

    /// Paints a single glyph over the map.
    fn paint_glyph(&mut self, position: Position, glyph: char, color: Rgb);

    /// Shows the finished frame.
    fn present(&mut self) -> DelveResult<()>;

    /// Resets the sink for the next frame.
    fn clear(&mut self);
}
