//! # Grid Mathematics
//!
//! Integer line rasterisation for corridor carving.

use crate::game::Position;

/// Returns the cells of the Bresenham line from `start` to `end`, both
/// endpoints included.
///
/// # Examples
///
/// ```
/// use delve::{bresenham, Position};
///
/// let line = bresenham(Position::new(0, 0), Position::new(3, 0));
/// assert_eq!(line.len(), 4);
/// assert_eq!(line[3], Position::new(3, 0));
/// ```
pub fn bresenham(start: Position, end: Position) -> Vec<Position> {
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let sx = if start.x < end.x { 1 } else { -1 };
    let sy = if start.y < end.y { 1 } else { -1 };

    let mut points = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let mut err = dx + dy;
    let mut current = start;

    loop {
        points.push(current);
        if current == end {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.x += sx;
        }
        if e2 <= dx {
            err += dx;
            current.y += sy;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point() {
        let p = Position::new(4, 4);
        assert_eq!(bresenham(p, p), vec![p]);
    }

    #[test]
    fn test_axis_aligned_lines() {
        let line = bresenham(Position::new(2, 5), Position::new(2, 1));
        assert_eq!(
            line,
            vec![
                Position::new(2, 5),
                Position::new(2, 4),
                Position::new(2, 3),
                Position::new(2, 2),
                Position::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_diagonal_line() {
        let line = bresenham(Position::new(0, 0), Position::new(3, 3));
        assert_eq!(line.len(), 4);
        assert_eq!(line[1], Position::new(1, 1));
    }

    #[test]
    fn test_endpoints_included() {
        let start = Position::new(1, 7);
        let end = Position::new(9, 2);
        let line = bresenham(start, end);
        assert_eq!(line.first(), Some(&start));
        assert_eq!(line.last(), Some(&end));
        for pair in line.windows(2) {
            let step = pair[1] - pair[0];
            assert!(step.x.abs() <= 1 && step.y.abs() <= 1);
        }
    }
}
