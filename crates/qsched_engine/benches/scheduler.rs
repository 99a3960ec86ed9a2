use criterion::{black_box, criterion_group, criterion_main, Criterion};

use qsched_core::{Gate, Lattice, SchedulerConfig};
use qsched_engine::{run, CircuitSource};

struct SyntheticCircuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl CircuitSource for SyntheticCircuit {
    fn num_qubits(&self) -> usize {
        self.num_qubits
    }
    fn gates(&self) -> &[Gate] {
        &self.gates
    }
}

/// A brick-pattern layer circuit: alternating nearest-neighbor CX layers,
/// the kind of regular structure a surface-code compiler emits for a
/// repeated stabilizer-measurement round.
fn brick_circuit(num_qubits: usize, layers: usize) -> SyntheticCircuit {
    let mut gates = Vec::new();
    let mut id = 0;
    for layer in 0..layers {
        let offset = layer % 2;
        let mut q = offset;
        while q + 1 < num_qubits {
            gates.push(Gate::new(id, "cx", q, q + 1));
            id += 1;
            q += 2;
        }
    }
    SyntheticCircuit { num_qubits, gates }
}

fn bench_schedule(c: &mut Criterion) {
    let circuit = brick_circuit(64, 40);
    let config = SchedulerConfig::default();

    c.bench_function("schedule_brick_64x40", |b| {
        b.iter(|| {
            let mut lattice = Lattice::new(8);
            black_box(run(&circuit, &mut lattice, &config));
        });
    });
}

criterion_group!(benches, bench_schedule);
criterion_main!(benches);
