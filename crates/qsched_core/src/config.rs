//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Tunables for one scheduling run.
///
/// Mirrors the shape of the original command-line flags (see
/// `qsched_cli`'s argument parser) so a config file and a CLI invocation
/// populate the same struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Surface-code distance. Overrides `target_log_pl` when both are set
    /// explicitly by the caller.
    pub distance: u32,

    /// Target logical error rate, expressed as `PL = -log10(P_L)` (so
    /// larger is a smaller, better error rate). Used to derive `distance`
    /// via [`crate::environment::logpl_to_distance`] when the caller asks
    /// for a rate rather than a raw distance.
    pub target_log_pl: Option<f64>,

    /// Wall-clock duration of one surface-code cycle, in microseconds —
    /// used only to convert the cycle count into a duration for reporting.
    pub cycle_time_us: f64,

    /// Fraction of interference-graph vertices that must be "stuck" before
    /// the SWAP optimizer is invoked for a cycle.
    pub swap_threshold: f64,

    /// Upper bound on consecutive SWAP-only layers before the scheduler
    /// gives up improving placement and forces the remaining actives to
    /// completion.
    pub max_consecutive_swap_layers: u32,

    /// Double two-qubit gate cost to account for QFT-style phase rotations.
    pub qft: bool,

    /// Run recursive-bisection initial placement before scheduling.
    pub init_placement: bool,

    /// Run the SWAP-insertion placement optimizer during scheduling.
    pub swap_optimizer: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            distance: 33,
            target_log_pl: None,
            cycle_time_us: 2.2,
            swap_threshold: 0.10,
            max_consecutive_swap_layers: 10,
            qft: false,
            init_placement: false,
            swap_optimizer: false,
        }
    }
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `distance`, preferring an explicit `target_log_pl` if set.
    pub fn resolved_distance(&self) -> u32 {
        match self.target_log_pl {
            Some(log_pl) => crate::environment::logpl_to_distance(log_pl),
            None => self.distance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cycle_time_us <= 0.0 {
            return Err(ScheduleError::config("cycle_time_us must be positive"));
        }
        if !(0.0..=1.0).contains(&self.swap_threshold) {
            return Err(ScheduleError::config("swap_threshold must be in [0, 1]"));
        }
        if self.resolved_distance() < 1 {
            return Err(ScheduleError::config("distance must be at least 1"));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SchedulerConfig::default().validate().is_ok());
    }

    #[test]
    fn target_log_pl_overrides_distance() {
        let mut cfg = SchedulerConfig::default();
        cfg.target_log_pl = Some(10.0);
        assert_ne!(cfg.resolved_distance(), cfg.distance);
    }

    #[test]
    fn json_roundtrip_preserves_fields() {
        let cfg = SchedulerConfig::default();
        let json = cfg.to_json().unwrap();
        let parsed = SchedulerConfig::from_json(&json).unwrap();
        assert_eq!(cfg.distance, parsed.distance);
        assert_eq!(cfg.swap_threshold, parsed.swap_threshold);
    }

    #[test]
    fn rejects_nonpositive_cycle_time() {
        let mut cfg = SchedulerConfig::default();
        cfg.cycle_time_us = 0.0;
        assert!(cfg.validate().is_err());
    }
}
