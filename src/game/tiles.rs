//! # Tile Catalog
//!
//! Static definitions of the tile kinds a map grid is made of, together with
//! the graphics used to draw them in and out of the field of view.

use serde::{Deserialize, Serialize};

/// An RGB colour triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
}

/// A single drawable cell: a glyph with foreground and background colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGraphic {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl TileGraphic {
    pub const fn new(glyph: char, fg: Rgb, bg: Rgb) -> Self {
        Self { glyph, fg, bg }
    }
}

/// Graphic for cells that have never been seen.
pub const SHROUD: TileGraphic = TileGraphic::new(' ', Rgb::WHITE, Rgb::BLACK);

const FLOOR_LIGHT: TileGraphic = TileGraphic::new(' ', Rgb::WHITE, Rgb::new(200, 180, 50));
const FLOOR_DARK: TileGraphic = TileGraphic::new(' ', Rgb::WHITE, Rgb::new(50, 50, 150));
const WALL_LIGHT: TileGraphic = TileGraphic::new(' ', Rgb::WHITE, Rgb::new(130, 110, 50));
const WALL_DARK: TileGraphic = TileGraphic::new(' ', Rgb::WHITE, Rgb::new(0, 0, 100));

/// The kinds of terrain a map cell can hold.
///
/// # Examples
///
/// ```
/// use delve::TileKind;
///
/// assert!(TileKind::Floor.walkable());
/// assert!(!TileKind::Wall.transparent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Wall,
}

impl TileKind {
    /// Whether actors can stand on this tile.
    pub fn walkable(self) -> bool {
        match self {
            TileKind::Floor => true,
            TileKind::Wall => false,
        }
    }

    /// Whether this tile lets light through for field of view.
    pub fn transparent(self) -> bool {
        match self {
            TileKind::Floor => true,
            TileKind::Wall => false,
        }
    }

    /// Graphic used while the tile is in the field of view.
    pub fn light(self) -> TileGraphic {
        match self {
            TileKind::Floor => FLOOR_LIGHT,
            TileKind::Wall => WALL_LIGHT,
        }
    }

    /// Graphic used once the tile has been explored but is out of view.
    pub fn dark(self) -> TileGraphic {
        match self {
            TileKind::Floor => FLOOR_DARK,
            TileKind::Wall => WALL_DARK,
        }
    }

    /// ASCII symbol for text renderers.
    pub fn symbol(self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
        }
    }
}
