//! # ASCII Frames
//!
//! A headless sink that renders frames to text, for tests and map dumps.

use crate::game::{Position, Rgb, TileGraphic, TileKind, SHROUD};
use crate::rendering::DisplaySink;
use crate::DelveResult;

/// Renders frames as lines of text.
///
/// Lit and remembered cells are drawn with their terrain symbol, shrouded
/// cells as spaces. Entity glyphs are drawn on top.
#[derive(Debug, Clone, Default)]
pub struct AsciiSink {
    width: u32,
    height: u32,
    buffer: Vec<char>,
    /// Text of every presented frame, in order
    pub frames: Vec<String>,
}

impl AsciiSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    fn symbol_for(graphic: &TileGraphic) -> char {
        if *graphic == SHROUD {
            return ' ';
        }
        [TileKind::Floor, TileKind::Wall]
            .into_iter()
            .find(|kind| kind.light() == *graphic || kind.dark() == *graphic)
            .map(TileKind::symbol)
            .unwrap_or('?')
    }
}

impl DisplaySink for AsciiSink {
    fn paint_tiles(&mut self, width: u32, height: u32, tiles: &[TileGraphic]) {
        self.width = width;
        self.height = height;
        self.buffer = tiles.iter().map(Self::symbol_for).collect();
    }

    fn paint_glyph(&mut self, position: Position, glyph: char, _color: Rgb) {
        if position.x < 0 || position.y < 0 {
            return;
        }
        let (x, y) = (position.x as u32, position.y as u32);
        if x < self.width && y < self.height {
            self.buffer[(y * self.width + x) as usize] = glyph;
        }
    }

    fn present(&mut self) -> DelveResult<()> {
        let frame = self
            .buffer
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        self.frames.push(frame);
        Ok(())
    }

    fn clear(&mut self) {
        self.buffer.iter_mut().for_each(|cell| *cell = ' ');
    }
}
