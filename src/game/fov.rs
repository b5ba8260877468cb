//! # Field of View
//!
//! Symmetric shadowcasting over the four quadrants around a viewpoint.
//!
//! Slopes are kept as exact fractions so that cells on a shadow boundary are
//! classified the same way from both ends: if A can see B, B can see A.

use crate::game::{MapGrid, Position};

/// Sight radius used by the turn engine unless configured otherwise.
pub const DEFAULT_FOV_RADIUS: u32 = 8;

/// Recomputes `grid`'s visible overlay from `viewpoint`.
///
/// The visible overlay is overwritten, never patched. Afterwards every visible
/// cell is folded into the explored overlay. Cells farther than `radius`
/// (Euclidean) from the viewpoint stay dark.
///
/// # Examples
///
/// ```
/// use delve::{recompute, MapGrid, Position, TileKind};
///
/// let mut grid = MapGrid::filled(0, 10, 10, TileKind::Floor);
/// recompute(&mut grid, Position::new(5, 5), 8);
/// assert!(grid.is_visible(Position::new(0, 0)));
/// assert!(grid.is_explored(Position::new(9, 9)));
/// ```
pub fn recompute(grid: &mut MapGrid, viewpoint: Position, radius: u32) {
    grid.clear_visible();

    if grid.in_bounds(viewpoint) {
        let visible = visible_cells(grid, viewpoint, radius);
        for pos in visible {
            grid.mark_visible(pos);
        }
    }

    grid.merge_visible_into_explored();
}

/// Computes the cells visible from `viewpoint` without touching the grid.
pub fn visible_cells(grid: &MapGrid, viewpoint: Position, radius: u32) -> Vec<Position> {
    let radius_sq = i64::from(radius).saturating_mul(i64::from(radius));
    let mut visible = vec![viewpoint];

    for cardinal in [
        Cardinal::North,
        Cardinal::East,
        Cardinal::South,
        Cardinal::West,
    ] {
        let quadrant = Quadrant {
            cardinal,
            origin: viewpoint,
        };
        let mut rows = vec![Row {
            depth: 1,
            start: Slope::new(-1, 1),
            end: Slope::new(1, 1),
        }];

        while let Some(mut row) = rows.pop() {
            if i64::from(row.depth) > i64::from(radius) {
                continue;
            }

            let mut previous: Option<bool> = None;
            for col in row.min_col()..=row.max_col() {
                let pos = quadrant.transform(row.depth, col);
                let opaque = !grid.in_bounds(pos) || !grid.is_transparent(pos);
                let in_range = viewpoint.distance_squared(pos) <= radius_sq;

                if grid.in_bounds(pos) && in_range && (opaque || row.is_symmetric(col)) {
                    visible.push(pos);
                }

                match previous {
                    Some(true) if !opaque => row.start = Slope::of_tile(row.depth, col),
                    Some(false) if opaque => {
                        let mut next = row.next();
                        next.end = Slope::of_tile(row.depth, col);
                        rows.push(next);
                    }
                    _ => {}
                }
                previous = Some(opaque);
            }

            if previous == Some(false) {
                rows.push(row.next());
            }
        }
    }

    visible
}

#[derive(Debug, Clone, Copy)]
enum Cardinal {
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy)]
struct Quadrant {
    cardinal: Cardinal,
    origin: Position,
}

impl Quadrant {
    /// Maps a (row depth, column) pair in quadrant space onto the grid.
    fn transform(&self, depth: i32, col: i32) -> Position {
        let Position { x, y } = self.origin;
        match self.cardinal {
            Cardinal::North => Position::new(x + col, y - depth),
            Cardinal::South => Position::new(x + col, y + depth),
            Cardinal::East => Position::new(x + depth, y + col),
            Cardinal::West => Position::new(x - depth, y + col),
        }
    }
}

/// A rational slope `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Slope through the near-left corner of the tile at (depth, col).
    fn of_tile(depth: i32, col: i32) -> Self {
        Self::new(2 * col - 1, 2 * depth)
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    start: Slope,
    end: Slope,
}

impl Row {
    /// `floor(depth * start + 1/2)`
    fn min_col(&self) -> i32 {
        let num = 2 * self.depth * self.start.num + self.start.den;
        num.div_euclid(2 * self.start.den)
    }

    /// `ceil(depth * end - 1/2)`
    fn max_col(&self) -> i32 {
        let num = 2 * self.depth * self.end.num - self.end.den;
        -(-num).div_euclid(2 * self.end.den)
    }

    fn is_symmetric(&self, col: i32) -> bool {
        col * self.start.den >= self.depth * self.start.num
            && col * self.end.den <= self.depth * self.end.num
    }

    fn next(&self) -> Row {
        Row {
            depth: self.depth + 1,
            start: self.start,
            end: self.end,
        }
    }
}
