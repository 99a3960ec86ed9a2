//! Core data model: lattice geometry, gates, and the world grid.

pub mod gate;
pub mod lattice;
pub mod matrix;
pub mod point;

pub use gate::{ActiveGate, Gate};
pub use lattice::{BoundingBox, Lattice};
pub use matrix::{CellState, Matrix, FREE};
pub use point::{Cell, Point, CELL_CORNERS, INVERSE_STEP_DIRECTIONS, STEP_DIRECTIONS};
