//! Lattice coordinates.

use serde::{Deserialize, Serialize};

/// An integer `(x, y)` coordinate.
///
/// A `Point` identifies a vertex of the lattice's corner grid (see
/// [`crate::matrix::Matrix`]); a [`Cell`] reuses the same representation to
/// identify a unit square by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A unit square of the lattice, identified by its top-left corner.
///
/// Cells and points share a representation: a cell at `(x, y)` has corners
/// `{(x,y), (x+1,y), (x,y+1), (x+1,y+1)}`.
pub type Cell = Point;

/// The four cells that border a point, useful when trying every corner of a
/// source cell as a braid start.
pub const CELL_CORNERS: [Point; 4] = [
    Point::new(0, 0),
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(1, 1),
];

/// 4-connected step directions, in the order the A* pathfinder encodes them
/// (index `i` corresponds to traceback code `i + 1`).
pub const STEP_DIRECTIONS: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
];

/// Inverse of [`STEP_DIRECTIONS`], used during A* traceback.
pub const INVERSE_STEP_DIRECTIONS: [Point; 4] = [
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(0, -1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_componentwise() {
        assert_eq!(Point::new(1, 2) + Point::new(3, 4), Point::new(4, 6));
    }

    #[test]
    fn cell_is_point() {
        let c: Cell = Point::new(2, 3);
        assert_eq!(c.x, 2);
    }
}
