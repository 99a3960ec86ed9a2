//! Error types for the scheduler.

use thiserror::Error;

/// Unified error type for scheduler operations.
///
/// Routine per-cycle conditions — a braid that cannot be found this cycle,
/// a SWAP pass that improves nothing — are *not* errors; they are plain
/// `Option`/empty-`Vec` returns handled inline by the scheduler. This enum
/// is reserved for conditions that abort a run: malformed input, a lattice
/// too small for the requested placement, or I/O failure.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The input circuit text could not be parsed.
    #[error("malformed circuit input: {0}")]
    MalformedCircuit(String),

    /// The requested lattice cannot host the circuit's qubit count.
    #[error("lattice of {available} physical qubits cannot host {needed} logical qubits")]
    LatticeTooSmall { available: usize, needed: usize },

    /// A named logical qubit falls outside the circuit's declared range.
    #[error("qubit index {0} out of range, circuit declares {1} qubits")]
    InvalidQubit(usize, usize),

    /// The initial-placement partitioner was given a coupling graph it
    /// could not bisect (e.g. a single vertex, or a target split of zero).
    #[error("placement error: {0}")]
    Placement(String),

    /// Configuration failed validation (e.g. non-positive cycle time).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error reading a circuit file or config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error for configuration.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for scheduler operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

impl ScheduleError {
    pub fn malformed_circuit(msg: impl Into<String>) -> Self {
        Self::MalformedCircuit(msg.into())
    }

    pub fn placement(msg: impl Into<String>) -> Self {
        Self::Placement(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_too_small_message_contains_counts() {
        let err = ScheduleError::LatticeTooSmall {
            available: 4,
            needed: 9,
        };
        assert!(err.to_string().contains('4'));
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn constructors_build_expected_variants() {
        let err = ScheduleError::malformed_circuit("bad line");
        assert!(matches!(err, ScheduleError::MalformedCircuit(_)));
        assert!(err.to_string().contains("bad line"));
    }
}
