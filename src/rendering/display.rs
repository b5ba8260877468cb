//! # Display Management
//!
//! Window rendering with macroquad.

use crate::game::{Position, Rgb, TileGraphic};
use crate::input::{poll_keyboard, InputEvent};
use crate::rendering::DisplaySink;
use crate::DelveResult;
use macroquad::prelude::*;

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

/// Macroquad display sink.
///
/// Painting only fills a cell buffer; `present` draws the buffer to the
/// window. The caller still has to await `next_frame` to show it.
pub struct MacroquadDisplay {
    /// Tile size in pixels
    pub tile_size: f32,
    /// Rows reserved under the map for messages
    pub message_rows: u32,
    width: u32,
    height: u32,
    tiles: Vec<TileGraphic>,
    glyphs: Vec<(Position, char, Rgb)>,
}

impl MacroquadDisplay {
    /// Creates a display for a console of `screen_width` x `screen_height`
    /// cells, sizing the window to match.
    pub fn new(screen_width: u32, screen_height: u32, map_height: u32) -> Self {
        let tile_size = 16.0;
        request_new_screen_size(
            screen_width as f32 * tile_size,
            screen_height as f32 * tile_size,
        );

        Self {
            tile_size,
            message_rows: screen_height.saturating_sub(map_height),
            width: 0,
            height: 0,
            tiles: Vec::new(),
            glyphs: Vec::new(),
        }
    }

    /// Collects this frame's input events.
    pub fn poll_input(&self) -> Vec<InputEvent> {
        poll_keyboard()
    }

    /// Draws the most recent messages in the strip under the map.
    pub fn render_messages<'a>(&self, messages: impl Iterator<Item = &'a str>) {
        let top = self.height as f32 * self.tile_size;
        draw_rectangle(
            0.0,
            top,
            screen_width(),
            self.message_rows as f32 * self.tile_size,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );

        for (i, message) in messages.enumerate() {
            let y = top + (i as f32 + 1.0) * self.tile_size;
            draw_text(message, 4.0, y, self.tile_size, WHITE);
        }
    }

    fn draw_cell(&self, position: Position, glyph: char, fg: Rgb, bg: Option<Rgb>) {
        let x = position.x as f32 * self.tile_size;
        let y = position.y as f32 * self.tile_size;

        if let Some(bg) = bg {
            draw_rectangle(x, y, self.tile_size, self.tile_size, to_color(bg));
        }
        if glyph != ' ' {
            let mut buffer = [0u8; 4];
            draw_text(
                glyph.encode_utf8(&mut buffer),
                x + self.tile_size * 0.2,
                y + self.tile_size * 0.85,
                self.tile_size,
                to_color(fg),
            );
        }
    }
}

impl DisplaySink for MacroquadDisplay {
    fn paint_tiles(&mut self, width: u32, height: u32, tiles: &[TileGraphic]) {
        self.width = width;
        self.height = height;
        self.tiles = tiles.to_vec();
    }

    fn paint_glyph(&mut self, position: Position, glyph: char, color: Rgb) {
        self.glyphs.push((position, glyph, color));
    }

    fn present(&mut self) -> DelveResult<()> {
        clear_background(BLACK);

        let width = self.width.max(1) as usize;
        for (index, tile) in self.tiles.iter().enumerate() {
            let position = Position::new((index % width) as i32, (index / width) as i32);
            self.draw_cell(position, tile.glyph, tile.fg, Some(tile.bg));
        }
        for &(position, glyph, color) in &self.glyphs {
            self.draw_cell(position, glyph, color, None);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.tiles.clear();
        self.glyphs.clear();
    }
}
