//! Circuit dependency tracking and the ready/front-layer set.

use qsched_core::Gate;

/// Supplies the gate list a schedule run operates on.
///
/// Parsing a circuit file into [`Gate`]s is explicitly out of scope for the
/// scheduler itself — this trait is the seam a caller (the CLI's own text
/// loader, or any other front end) plugs a concrete source into.
pub trait CircuitSource {
    /// Number of logical qubits the circuit declares.
    fn num_qubits(&self) -> usize;

    /// Gates in program order. Gate `id` must equal the gate's index in
    /// this list; [`CircuitDag::build`] relies on it to index `nodes`.
    fn gates(&self) -> &[Gate];
}

/// Per-gate dependency bookkeeping.
///
/// Each logical qubit has at most one pending "next gate", so every gate
/// has at most one control-child and one target-child: the next gate (if
/// any) that reads the control qubit, and the next gate that reads the
/// target qubit. A single-qubit gate's control-child and target-child are
/// the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateNode {
    pub control_child: Option<usize>,
    pub target_child: Option<usize>,
    /// Number of predecessor gates (0, 1, or 2) that must finish before
    /// this gate is ready.
    pub num_dependencies: u8,
    /// Predecessors that have finished so far.
    pub num_parents_finished: u8,
    pub finished: bool,
}

impl GateNode {
    fn new() -> Self {
        Self {
            control_child: None,
            target_child: None,
            num_dependencies: 0,
            num_parents_finished: 0,
            finished: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        !self.finished && self.num_parents_finished == self.num_dependencies
    }
}

/// The circuit DAG: one [`GateNode`] per gate, plus the incrementally
/// maintained set of gates ready to execute.
#[derive(Debug, Clone)]
pub struct CircuitDag {
    gates: Vec<Gate>,
    nodes: Vec<GateNode>,
    ready: Vec<usize>,
}

impl CircuitDag {
    /// Builds the DAG from a circuit source, tracking each qubit's most
    /// recent gate to wire up control-child / target-child links.
    pub fn build(source: &dyn CircuitSource) -> Self {
        let gates = source.gates().to_vec();
        let mut nodes: Vec<GateNode> = (0..gates.len()).map(|_| GateNode::new()).collect();
        let mut last_gate_on_qubit: Vec<Option<usize>> = vec![None; source.num_qubits()];

        for (id, gate) in gates.iter().enumerate() {
            if gate.is_single() {
                if let Some(parent) = last_gate_on_qubit[gate.target] {
                    nodes[parent].control_child = Some(id);
                    nodes[parent].target_child = Some(id);
                    nodes[id].num_dependencies += 1;
                }
            } else {
                if let Some(parent) = last_gate_on_qubit[gate.control] {
                    link_child(&mut nodes, parent, gate, id, gate.control);
                    nodes[id].num_dependencies += 1;
                }
                if let Some(parent) = last_gate_on_qubit[gate.target] {
                    if Some(parent) != last_gate_on_qubit[gate.control] {
                        link_child(&mut nodes, parent, gate, id, gate.target);
                        nodes[id].num_dependencies += 1;
                    }
                }
            }
            last_gate_on_qubit[gate.control] = Some(id);
            last_gate_on_qubit[gate.target] = Some(id);
        }

        let ready: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_ready())
            .map(|(id, _)| id)
            .collect();

        Self { gates, nodes, ready }
    }

    pub fn gate(&self, id: usize) -> &Gate {
        &self.gates[id]
    }

    pub fn node(&self, id: usize) -> &GateNode {
        &self.nodes[id]
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Gates currently ready to execute (all dependencies finished).
    pub fn ready(&self) -> &[usize] {
        &self.ready
    }

    /// Removes `id` from the ready set without marking it finished, for a
    /// gate that has been committed to the active set this cycle but has
    /// not yet completed.
    ///
    /// Without this, a gate whose cost outlives the cycle it was committed
    /// in would still satisfy [`GateNode::is_ready`] (its dependencies are
    /// met and it isn't finished) and reappear in [`Self::ready`] on the
    /// next pass, getting recommitted onto lattice cells it already holds.
    pub fn activate_gate(&mut self, id: usize) {
        self.ready.retain(|&g| g != id);
    }

    /// Marks `id` finished and advances any successor whose last
    /// dependency was `id` into the ready set.
    ///
    /// Panics if `id` is not currently ready — callers must only resolve
    /// gates that were actually activated.
    pub fn resolve_gate(&mut self, id: usize) {
        assert!(
            self.nodes[id].is_ready(),
            "resolved gate {id} that was not ready"
        );
        self.nodes[id].finished = true;
        self.ready.retain(|&g| g != id);

        let node = self.nodes[id];
        let mut children = [node.control_child, node.target_child];
        if children[0] == children[1] {
            children[1] = None;
        }
        for child in children.into_iter().flatten() {
            self.nodes[child].num_parents_finished += 1;
            if self.nodes[child].is_ready() {
                self.ready.push(child);
            }
        }
    }

    /// Resets the DAG to its freshly-built state (all gates pending).
    pub fn reset(&mut self, source: &dyn CircuitSource) {
        *self = Self::build(source);
    }
}

fn link_child(nodes: &mut [GateNode], parent: usize, gate: &Gate, id: usize, qubit: usize) {
    if qubit == gate.control {
        nodes[parent].control_child = Some(id);
    } else {
        nodes[parent].target_child = Some(id);
    }
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
    fn independent_gates_are_all_ready() {
        let circuit = FixedCircuit {
            num_qubits: 4,
            gates: vec![Gate::new(0, "cx", 0, 1), Gate::new(1, "cx", 2, 3)],
        };
        let dag = CircuitDag::build(&circuit);
        assert_eq!(dag.ready().len(), 2);
    }

    #[test]
    fn dependent_gate_becomes_ready_after_resolve() {
        let circuit = FixedCircuit {
            num_qubits: 3,
            gates: vec![Gate::new(0, "cx", 0, 1), Gate::new(1, "cx", 1, 2)],
        };
        let mut dag = CircuitDag::build(&circuit);
        assert_eq!(dag.ready(), &[0]);
        dag.resolve_gate(0);
        assert_eq!(dag.ready(), &[1]);
    }

    #[test]
    fn activated_gate_does_not_reappear_in_ready() {
        let circuit = FixedCircuit {
            num_qubits: 4,
            gates: vec![Gate::new(0, "cx", 0, 1), Gate::new(1, "cx", 2, 3)],
        };
        let mut dag = CircuitDag::build(&circuit);
        assert_eq!(dag.ready().len(), 2);
        dag.activate_gate(0);
        assert_eq!(dag.ready(), &[1]);
        dag.resolve_gate(1);
        // gate 0 is still in flight (committed but not finished) and must
        // not have been resurrected by resolving its unrelated sibling.
        assert!(dag.ready().is_empty());
    }

    #[test]
    fn chain_on_shared_qubit_resolves_in_order() {
        let circuit = FixedCircuit {
            num_qubits: 3,
            gates: vec![
                Gate::single(0, "h", 0),
                Gate::new(1, "cx", 0, 1),
                Gate::new(2, "cx", 1, 2),
            ],
        };
        let mut dag = CircuitDag::build(&circuit);
        assert_eq!(dag.ready(), &[0]);
        dag.resolve_gate(0);
        assert_eq!(dag.ready(), &[1]);
        dag.resolve_gate(1);
        assert_eq!(dag.ready(), &[2]);
        dag.resolve_gate(2);
        assert!(dag.ready().is_empty());
    }
}
