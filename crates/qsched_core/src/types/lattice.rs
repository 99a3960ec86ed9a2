//! Logical-to-physical qubit placement on a square lattice.

use super::point::Point;

/// A bounding box on the corner grid, inclusive of both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Number of lattice cells inside the box, inclusive — used to break
    /// ties between same-degree vertices when peeling the interference
    /// graph (larger footprint wins).
    pub fn area(&self) -> i64 {
        (self.max.x - self.min.x + 1) * (self.max.y - self.min.y + 1)
    }

    /// Inclusive rectangle overlap test.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y)
    }
}

/// A square lattice of `length * length` physical qubits and the current
/// logical-to-physical assignment.
///
/// Physical qubits sit directly on the corner grid: physical qubit `i`
/// occupies corner point `(i % length, i / length)`. Braid paths run on the
/// `(length+1) x (length+1)` [`crate::types::matrix::Matrix`] of corner
/// points surrounding them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    length: usize,
    /// `log2phys[logical_qubit] == physical_index`.
    log2phys: Vec<usize>,
}

impl Lattice {
    /// Builds a `length x length` lattice with the identity placement
    /// (logical qubit `i` on physical qubit `i`).
    pub fn new(length: usize) -> Self {
        let n = length * length;
        Self {
            length,
            log2phys: (0..n).collect(),
        }
    }

    /// Builds a lattice with an explicit initial placement.
    pub fn with_placement(length: usize, log2phys: Vec<usize>) -> Self {
        assert_eq!(
            log2phys.len(),
            length * length,
            "placement must cover every physical qubit"
        );
        Self { length, log2phys }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn num_qubits(&self) -> usize {
        self.length * self.length
    }

    /// Side length of the corner grid this lattice's braids run on.
    pub fn world_side(&self) -> usize {
        self.length + 1
    }

    /// Corner-grid position of a physical qubit index.
    pub fn get_lattice_position(&self, physical: usize) -> Point {
        let x = (physical % self.length) as i64;
        let y = (physical / self.length) as i64;
        Point::new(x, y)
    }

    /// Physical qubit index currently hosting `logical`.
    pub fn get_phys_qubit_number(&self, logical: usize) -> usize {
        self.log2phys[logical]
    }

    /// Corner-grid position currently hosting `logical`.
    pub fn get_position(&self, logical: usize) -> Point {
        self.get_lattice_position(self.get_phys_qubit_number(logical))
    }

    /// Bounding box spanned by a two-qubit gate's endpoints, inclusive.
    pub fn get_area(&self, control: usize, target: usize) -> BoundingBox {
        BoundingBox::new(self.get_position(control), self.get_position(target))
    }

    /// Swaps the physical qubits hosting two logical qubits.
    pub fn swap_logical_qubit(&mut self, q1: usize, q2: usize) {
        self.log2phys.swap(q1, q2);
    }
}
