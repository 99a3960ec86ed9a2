//! End-to-end scheduling scenarios against the full stack scheduler.

use qsched_core::{Gate, Lattice, SchedulerConfig};
use qsched_engine::{run, CircuitSource};

struct FixedCircuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl CircuitSource for FixedCircuit {
    fn num_qubits(&self) -> usize {
        self.num_qubits
    }
    fn gates(&self) -> &[Gate] {
        &self.gates
    }
}

fn linear_chain(num_qubits: usize) -> FixedCircuit {
    let gates = (0..num_qubits - 1)
        .map(|i| Gate::new(i, "cx", i, i + 1))
        .collect();
    FixedCircuit { num_qubits, gates }
}

/// S1: an empty circuit terminates immediately with zero cycles spent.
#[test]
fn s1_empty_circuit_runs_zero_cycles() {
    let circuit = FixedCircuit {
        num_qubits: 4,
        gates: vec![],
    };
    let mut lattice = Lattice::new(3);
    let report = run(&circuit, &mut lattice, &SchedulerConfig::default());
    assert_eq!(report.total_cycles, 0);
    assert_eq!(report.gates_executed, 0);
}

/// S2: a single CX on a 2-qubit lattice at distance 1 costs exactly
/// `2*1+3 = 5` cycles.
#[test]
fn s2_single_cx_costs_exactly_cycle_cost_cycles() {
    let circuit = FixedCircuit {
        num_qubits: 2,
        gates: vec![Gate::new(0, "cx", 0, 1)],
    };
    let mut lattice = Lattice::new(2);
    let mut cfg = SchedulerConfig::default();
    cfg.distance = 1;
    let report = run(&circuit, &mut lattice, &cfg);
    assert_eq!(report.gates_executed, 1);
    assert_eq!(report.total_cycles, 5);
}

/// S3: two independent CXs on disjoint cells of a 2-qubit-per-side lattice
/// both schedule in the same cycle, finishing in the same 5 cycles a lone
/// CX would take at distance 1.
#[test]
fn s3_independent_pairs_schedule_in_one_layer() {
    let circuit = FixedCircuit {
        num_qubits: 4,
        gates: vec![Gate::new(0, "cx", 0, 1), Gate::new(1, "cx", 2, 3)],
    };
    let mut lattice = Lattice::new(2);
    let mut cfg = SchedulerConfig::default();
    cfg.distance = 1;
    let report = run(&circuit, &mut lattice, &cfg);
    assert_eq!(report.gates_executed, 2);
    assert_eq!(report.total_cycles, 5);
}

/// S4: a linear chain of 3 dependent CX gates runs strictly sequentially,
/// totalling `3 * (2d+3)` cycles regardless of lattice geometry.
#[test]
fn s4_linear_chain_costs_three_times_cycle_cost() {
    let circuit = linear_chain(4);
    let mut lattice = Lattice::new(2);
    let mut cfg = SchedulerConfig::default();
    cfg.distance = 1;
    let report = run(&circuit, &mut lattice, &cfg);
    assert_eq!(report.gates_executed, 3);
    assert_eq!(report.total_cycles, 3 * (2 * 1 + 3));
}

/// S6: with the SWAP optimizer forced on every stuck cycle
/// (`swap_threshold = 1.0`) but capped to a single triggering layer
/// (`max_consecutive_swap_layers = 1`), a densely-interfering circuit still
/// completes every gate, and the optimizer inserts at least the one SWAP
/// its single allowed layer can contribute.
#[test]
fn s6_dense_interference_triggers_swap_layer_once() {
    let gates = vec![
        Gate::new(0, "cx", 0, 3),
        Gate::new(1, "cx", 1, 4),
        Gate::new(2, "cx", 2, 5),
        Gate::new(3, "cx", 0, 4),
        Gate::new(4, "cx", 1, 5),
    ];
    let circuit = FixedCircuit { num_qubits: 6, gates };
    let mut lattice = Lattice::new(3);
    let mut cfg = SchedulerConfig::default();
    cfg.swap_optimizer = true;
    cfg.swap_threshold = 1.0;
    cfg.max_consecutive_swap_layers = 1;
    let report = run(&circuit, &mut lattice, &cfg);
    assert_eq!(report.gates_executed, 5);
}

#[test]
fn average_utilization_is_within_unit_interval() {
    let circuit = linear_chain(8);
    let mut lattice = Lattice::new(4);
    let report = run(&circuit, &mut lattice, &SchedulerConfig::default());
    let utilization = report.average_utilization();
    assert!((0.0..=1.0).contains(&utilization));
}

#[test]
fn higher_distance_never_decreases_cycle_count() {
    let circuit = linear_chain(6);

    let mut low_cfg = SchedulerConfig::default();
    low_cfg.distance = 3;
    let mut lattice_low = Lattice::new(4);
    let low_report = run(&circuit, &mut lattice_low, &low_cfg);

    let mut high_cfg = SchedulerConfig::default();
    high_cfg.distance = 9;
    let mut lattice_high = Lattice::new(4);
    let high_report = run(&circuit, &mut lattice_high, &high_cfg);

    assert!(high_report.total_cycles >= low_report.total_cycles);
}

#[test]
fn qft_flag_never_decreases_cycle_count() {
    let circuit = linear_chain(6);

    let mut plain_cfg = SchedulerConfig::default();
    plain_cfg.qft = false;
    let mut lattice_plain = Lattice::new(4);
    let plain_report = run(&circuit, &mut lattice_plain, &plain_cfg);

    let mut qft_cfg = SchedulerConfig::default();
    qft_cfg.qft = true;
    let mut lattice_qft = Lattice::new(4);
    let qft_report = run(&circuit, &mut lattice_qft, &qft_cfg);

    assert!(qft_report.total_cycles >= plain_report.total_cycles);
}
