//! # qsched_core
//!
//! Core data model for the braided surface-code scheduler.
//!
//! This crate provides:
//! - `Point`/`Cell`: integer lattice coordinates
//! - `Matrix`: the dense corner-grid "world" tracking cell occupancy
//! - `Gate`/`ActiveGate`: circuit gates and their in-flight scheduling state
//! - `Lattice`: logical-to-physical qubit placement and bounding-box geometry
//! - `environment`: gate cost and logical-error-rate / distance conversions
//! - `ScheduleError`: unified error type
//! - `SchedulerConfig`: run configuration
//!
//! ## Example
//!
//! ```rust
//! use qsched_core::prelude::*;
//!
//! let lattice = Lattice::new(3);
//! let gate = Gate::new(0, "cx", 0, 4);
//! let bbox = lattice.get_area(gate.control, gate.target);
//! assert!(bbox.area() > 0);
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod prelude;
pub mod types;

pub use config::SchedulerConfig;
pub use environment::{cost, distance_to_logpl, logpl_to_distance};
pub use error::{Result, ScheduleError};
pub use types::{ActiveGate, BoundingBox, Cell, CellState, Gate, Lattice, Matrix, Point, FREE};
