//! Convenient re-exports for downstream crates.
//!
//! # Usage
//!
//! ```rust
//! use qsched_core::prelude::*;
//! ```

pub use crate::config::SchedulerConfig;
pub use crate::environment::{cost, distance_to_logpl, logpl_to_distance};
pub use crate::error::{Result, ScheduleError};
pub use crate::types::{
    ActiveGate, BoundingBox, Cell, CellState, Gate, Lattice, Matrix, Point, FREE,
};
