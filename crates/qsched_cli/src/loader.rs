//! Minimal line-oriented circuit text format.
//!
//! Not a QASM parser — deliberately so. Each non-blank, non-comment line is
//! one gate: `<name> <target>` for a single-qubit gate, `<name> <control>
//! <target>` for a two-qubit gate. The qubit count is the highest index
//! seen, plus one. Lines starting with `#` are comments.
//!
//! ```text
//! h 0
//! cx 0 1
//! cx 1 2
//! ```

use qsched_core::{Gate, ScheduleError};
use qsched_engine::CircuitSource;

#[derive(Debug, Clone)]
pub struct TextCircuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl TextCircuit {
    pub fn parse(text: &str) -> Result<Self, ScheduleError> {
        let mut gates = Vec::new();
        let mut max_qubit = 0usize;

        for (line_no, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let gate = match fields.as_slice() {
                [name, target] => {
                    let target: usize = target.parse().map_err(|_| {
                        ScheduleError::malformed_circuit(format!(
                            "line {}: invalid qubit index {target:?}",
                            line_no + 1
                        ))
                    })?;
                    max_qubit = max_qubit.max(target);
                    Gate::single(gates.len(), *name, target)
                }
                [name, control, target] => {
                    let control: usize = control.parse().map_err(|_| {
                        ScheduleError::malformed_circuit(format!(
                            "line {}: invalid qubit index {control:?}",
                            line_no + 1
                        ))
                    })?;
                    let target: usize = target.parse().map_err(|_| {
                        ScheduleError::malformed_circuit(format!(
                            "line {}: invalid qubit index {target:?}",
                            line_no + 1
                        ))
                    })?;
                    max_qubit = max_qubit.max(control).max(target);
                    Gate::new(gates.len(), *name, control, target)
                }
                _ => {
                    return Err(ScheduleError::malformed_circuit(format!(
                        "line {}: expected '<name> <target>' or '<name> <control> <target>', got {line:?}",
                        line_no + 1
                    )));
                }
            };
            gates.push(gate);
        }

        Ok(Self {
            num_qubits: max_qubit + 1,
            gates,
        })
    }
}

impl CircuitSource for TextCircuit {
    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn gates(&self) -> &[Gate] {
        &self.gates
    }
}
