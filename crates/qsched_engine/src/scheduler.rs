//! The stack-based per-cycle scheduler: the core scheduling loop.

use tracing::{debug, info, warn};

use qsched_core::{ActiveGate, Gate, Lattice, Matrix, SchedulerConfig};

use crate::circuit_dag::{CircuitDag, CircuitSource};
use crate::interference::{build_interference_graph, components_in_order, max_degree_vertex};
use crate::pathfind::braid;
use crate::swap_optimizer::find_swaps;

/// Per-cell resource utilization and per-cycle diagnostics collected over a
/// full scheduling run.
#[derive(Debug, Clone, Default)]
pub struct ScheduleReport {
    pub total_cycles: u64,
    pub gates_executed: usize,
    pub swaps_inserted: usize,
    /// Sum of cells occupied across all cycles, for average-utilization
    /// reporting (`utilization = cell_cycles / (cycles * world_area)`).
    pub cell_cycles: u64,
    pub world_area: usize,
}

impl ScheduleReport {
    pub fn average_utilization(&self) -> f64 {
        if self.total_cycles == 0 || self.world_area == 0 {
            return 0.0;
        }
        self.cell_cycles as f64 / (self.total_cycles as f64 * self.world_area as f64)
    }
}

/// Runs the circuit to completion against `lattice`, returning a report of
/// cycle count, utilization, and diagnostics.
///
/// Implements the reference scheduling loop: classify the ready set into
/// single- and two-qubit gates, build the interference graph over the
/// two-qubit candidates, peel high-degree vertices onto a retry stack,
/// braid the remaining degree-`<=2` components in ascending size order,
/// retry the stack top-to-bottom against the now-updated world, optionally
/// insert SWAPs when too much of the cycle is stuck, commit every gate that
/// found a path, then advance the clock to the next gate completion.
pub fn run(source: &dyn CircuitSource, lattice: &mut Lattice, config: &SchedulerConfig) -> ScheduleReport {
    let mut dag = CircuitDag::build(source);
    let num_circuit_gates = dag.num_gates();
    let world_side = lattice.world_side();
    let mut world = Matrix::new(world_side);
    let mut actives: Vec<ActiveGate> = Vec::new();
    let mut next_gate_id = num_circuit_gates;

    let mut report = ScheduleReport {
        world_area: world_side * world_side,
        ..Default::default()
    };

    info!(num_gates = dag.num_gates(), world_side, "starting schedule run");

    let mut consecutive_swap_layers = 0u32;

    while !dag.ready().is_empty() || !actives.is_empty() {
        if !dag.ready().is_empty() {
            schedule_cycle(
                &mut dag,
                lattice,
                &mut world,
                &mut actives,
                config,
                &mut next_gate_id,
                &mut report,
                &mut consecutive_swap_layers,
            );
        }

        if actives.is_empty() {
            if dag.ready().is_empty() {
                break;
            }
            // no active gate to advance the clock by and nothing scheduled
            // this pass: avoid spinning forever on a circuit fragment that
            // genuinely cannot progress (e.g. every remaining gate blocked).
            warn!("no progress this cycle, no active gates to advance the clock");
            break;
        }

        let advance = actives.iter().map(|a| a.remaining_cycles).min().unwrap_or(0).max(1);
        report.total_cycles += advance;
        report.cell_cycles += actives
            .iter()
            .map(|a| a.cells.len() as u64 * advance.min(a.remaining_cycles))
            .sum::<u64>();

        for active in actives.iter_mut() {
            active.remaining_cycles = active.remaining_cycles.saturating_sub(advance);
        }

        let (finished, still_active): (Vec<_>, Vec<_>) =
            actives.drain(..).partition(|a| a.is_finished());
        actives = still_active;

        for active in finished {
            world.release(&active.cells);
            if active.gate.id < num_circuit_gates {
                dag.resolve_gate(active.gate.id);
                report.gates_executed += 1;
            }
            debug!(gate_id = active.gate.id, "gate finished");
        }
    }

    info!(
        total_cycles = report.total_cycles,
        gates_executed = report.gates_executed,
        swaps_inserted = report.swaps_inserted,
        "schedule run finished"
    );

    report
}

#[allow(clippy::too_many_arguments)]
fn schedule_cycle(
    dag: &mut CircuitDag,
    lattice: &mut Lattice,
    world: &mut Matrix,
    actives: &mut Vec<ActiveGate>,
    config: &SchedulerConfig,
    next_gate_id: &mut usize,
    report: &mut ScheduleReport,
    consecutive_swap_layers: &mut u32,
) {
    let ready_ids: Vec<usize> = dag.ready().to_vec();
    let ready_gates: Vec<Gate> = ready_ids.iter().map(|&id| dag.gate(id).clone()).collect();

    let (two_qubit, single_qubit): (Vec<Gate>, Vec<Gate>) =
        ready_gates.into_iter().partition(|g| !g.is_single());

    let distance = config.resolved_distance();

    // Single-qubit gates never interfere; activate every one immediately.
    for gate in single_qubit {
        let pos = lattice.get_position(gate.target);
        let cycles = qsched_core::cost(&gate.name, distance, config.qft);
        let id = gate.id;
        activate_gate(world, actives, gate, vec![pos], cycles);
        dag.activate_gate(id);
    }

    if two_qubit.is_empty() {
        return;
    }

    let mut ig = build_interference_graph(lattice, &two_qubit);
    let mut stack: Vec<usize> = Vec::new();

    while let Some(v) = max_degree_vertex(&ig) {
        stack.push(v);
        ig.graph.delete_vertex(v);
    }

    let mut committed = vec![false; two_qubit.len()];

    for component in components_in_order(&ig) {
        for &v in &component {
            try_braid(&two_qubit, v, dag, lattice, world, actives, config, &mut committed);
        }
    }

    for v in stack.into_iter().rev() {
        if committed[v] {
            continue;
        }
        let gate = &two_qubit[v];
        let control_pos = lattice.get_position(gate.control);
        let target_pos = lattice.get_position(gate.target);
        if let Some(path) = braid(world, control_pos, target_pos) {
            let cycles = qsched_core::cost(&gate.name, distance, config.qft);
            let id = gate.id;
            activate_gate(world, actives, gate.clone(), path, cycles);
            dag.activate_gate(id);
            committed[v] = true;
        }
    }

    // Spec's SWAP trigger: ratio = scheduled / |CX gates| (including gates
    // already in flight from a prior cycle), fire when ratio <= threshold.
    let active_two_qubit = actives.iter().filter(|a| !a.gate.is_single()).count();
    let scheduled = committed.iter().filter(|&&c| c).count() + active_two_qubit;
    let candidates = two_qubit.len() + active_two_qubit;
    let scheduled_ratio = if candidates == 0 { 1.0 } else { scheduled as f64 / candidates as f64 };
    if config.swap_optimizer
        && scheduled_ratio <= config.swap_threshold
        && *consecutive_swap_layers < config.max_consecutive_swap_layers
    {
        // findSwaps operates over the whole ready two-qubit front layer, not
        // just the gates still unscheduled this cycle: a gate that did
        // braid this cycle is still a legitimate SWAP partner for next
        // cycle's placement.
        let swaps = find_swaps(lattice, world, &two_qubit, 4, next_gate_id);
        if swaps.is_empty() {
            warn!("activated placement optimizer but 0 SWAPs inserted");
        } else {
            *consecutive_swap_layers += 1;
            for swap in swaps {
                let control_pos = lattice.get_position(swap.control);
                let target_pos = lattice.get_position(swap.target);
                if let Some(path) = braid(world, control_pos, target_pos) {
                    let cycles = qsched_core::cost("swap", distance, false);
                    let active = ActiveGate::new(swap, path.clone(), cycles);
                    world.occupy(&path, active.gate.id as u64);
                    report.swaps_inserted += 1;
                    actives.push(active);
                }
            }
        }
    } else {
        *consecutive_swap_layers = 0;
    }
}

/// Attempts to braid a single two-qubit gate (vertex `v` of the
/// interference graph) against the current world state, activating it on
/// success. A no-op if `v` is already committed or no free path exists
/// between its endpoints this cycle — the gate simply waits for the next
/// cycle (or the retry stack, if it was peeled).
#[allow(clippy::too_many_arguments)]
fn try_braid(
    gates: &[Gate],
    v: usize,
    dag: &mut CircuitDag,
    lattice: &mut Lattice,
    world: &mut Matrix,
    actives: &mut Vec<ActiveGate>,
    config: &SchedulerConfig,
    committed: &mut [bool],
) {
    if committed[v] {
        return;
    }
    let gate = &gates[v];
    let control_pos = lattice.get_position(gate.control);
    let target_pos = lattice.get_position(gate.target);
    if let Some(path) = braid(world, control_pos, target_pos) {
        let cycles = qsched_core::cost(&gate.name, config.resolved_distance(), config.qft);
        let id = gate.id;
        activate_gate(world, actives, gate.clone(), path, cycles);
        dag.activate_gate(id);
        committed[v] = true;
    }
}

/// Occupies `cells` in `world` for `gate`, asserting they were free
/// beforehand, and records it as an active gate counting down
/// `cycles` until completion.
fn activate_gate(
    world: &mut Matrix,
    actives: &mut Vec<ActiveGate>,
    gate: Gate,
    cells: Vec<qsched_core::Point>,
    cycles: u64,
) {
    world.occupy(&cells, gate.id as u64);
    actives.push(ActiveGate::new(gate, cells, cycles.max(1)));
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn single_gate_circuit_completes() {
        let circuit = FixedCircuit {
            num_qubits: 2,
            gates: vec![Gate::new(0, "cx", 0, 1)],
        };
        let mut lattice = Lattice::new(3);
        let config = SchedulerConfig::default();
        let report = run(&circuit, &mut lattice, &config);
        assert_eq!(report.gates_executed, 1);
        assert!(report.total_cycles > 0);
    }

    #[test]
    fn independent_gates_execute_in_one_layer() {
        let circuit = FixedCircuit {
            num_qubits: 4,
            gates: vec![Gate::new(0, "cx", 0, 1), Gate::new(1, "cx", 2, 3)],
        };
        let mut lattice = Lattice::new(4);
        let config = SchedulerConfig::default();
        let report = run(&circuit, &mut lattice, &config);
        assert_eq!(report.gates_executed, 2);
    }

    #[test]
    fn empty_circuit_finishes_with_zero_cycles() {
        let circuit = FixedCircuit {
            num_qubits: 1,
            gates: vec![],
        };
        let mut lattice = Lattice::new(2);
        let config = SchedulerConfig::default();
        let report = run(&circuit, &mut lattice, &config);
        assert_eq!(report.total_cycles, 0);
        assert_eq!(report.gates_executed, 0);
    }
}
