//! SWAP-insertion placement optimizer.
//!
//! When too large a fraction of a cycle's candidate gates are stuck behind
//! interference (see [`crate::scheduler`]'s `swap_threshold`), inserting a
//! SWAP between two logical qubits can shrink the front layer's interference
//! graph enough to unblock braiding. This module greedily searches for such
//! SWAPs: each round it picks the highest-degree gate whose qubits aren't
//! already committed to an earlier SWAP this round, pairs it with its
//! highest-degree free neighbor, and tries the 2x2 logical-qubit pairings
//! between the two gates' endpoints, accepting the first pairing that both
//! reduces the interference graph's edge count and actually replays (braids
//! cleanly against a scratch copy of the world, alongside every SWAP
//! already accepted this round).

use std::collections::HashSet;

use qsched_core::{Gate, Lattice, Matrix};

use crate::interference::{build_interference_graph, InterferenceGraph};
use crate::pathfind::braid;

/// A reference-implementation note on a known bug in the system this
/// scheduler descends from: an earlier version of the SWAP probe set both
/// of a candidate SWAP's qubit fields to the same logical qubit, which
/// silently produced a no-op identity gate. A correct SWAP must name two
/// distinct logical qubits; this module always constructs `{control: q1,
/// target: q2}` with `q1 != q2`.
fn make_swap(id: usize, q1: usize, q2: usize) -> Gate {
    debug_assert_ne!(q1, q2, "a SWAP must name two distinct logical qubits");
    Gate::new(id, "swap", q1, q2)
}

/// Highest-degree vertex whose gate touches no qubit in `busy`, ties broken
/// by larger bounding-box area. Unlike [`crate::interference::max_degree_vertex`],
/// this has no minimum-degree filter: a stuck gate with a single conflict
/// (degree 1) is still a valid SWAP candidate.
fn max_degree_free_vertex(ig: &InterferenceGraph, gates: &[Gate], busy: &HashSet<usize>) -> Option<usize> {
    ig.graph
        .vertices()
        .filter(|&v| {
            let g = &gates[v];
            !busy.contains(&g.control) && !busy.contains(&g.target)
        })
        .max_by(|&a, &b| {
            ig.graph
                .degree(a)
                .cmp(&ig.graph.degree(b))
                .then(ig.boxes[a].area().cmp(&ig.boxes[b].area()))
        })
}

/// Replays every `(q1, q2)` pair in `pairs`, in order, as a braid between
/// their current lattice positions onto a scratch copy of `world`. Returns
/// `false` as soon as one fails to braid — an unschedulable stack.
fn replays(world: &Matrix, lattice: &Lattice, pairs: &[(usize, usize)]) -> bool {
    let mut scratch = world.clone();
    for &(q1, q2) in pairs {
        let a = lattice.get_position(q1);
        let b = lattice.get_position(q2);
        match braid(&scratch, a, b) {
            Some(path) => scratch.occupy(&path, 1),
            None => return false,
        }
    }
    true
}

/// Searches for SWAPs that reduce interference among `front_layer`'s
/// two-qubit gates, one per round, up to `max_swaps` accepted SWAPs or
/// until no candidate improves the interference graph.
///
/// Returns the accepted SWAP gates, already reflected in `lattice`'s
/// placement (the caller commits them to the schedule the same way any
/// other gate is committed).
pub fn find_swaps(
    lattice: &mut Lattice,
    world: &Matrix,
    front_layer: &[Gate],
    max_swaps: u32,
    next_gate_id: &mut usize,
) -> Vec<Gate> {
    let mut accepted = Vec::new();
    if front_layer.is_empty() {
        return accepted;
    }

    let mut busy: HashSet<usize> = HashSet::new();
    let mut accepted_pairs: Vec<(usize, usize)> = Vec::new();

    for _ in 0..max_swaps {
        let ig = build_interference_graph(lattice, front_layer);
        let Some(id1) = max_degree_free_vertex(&ig, front_layer, &busy) else {
            break;
        };
        let gate1 = front_layer[id1].clone();

        let id2 = ig
            .graph
            .neighbours(id1)
            .iter()
            .copied()
            .filter(|&u| {
                let g = &front_layer[u];
                !busy.contains(&g.control) && !busy.contains(&g.target)
            })
            .max_by(|&a, &b| {
                ig.graph
                    .degree(a)
                    .cmp(&ig.graph.degree(b))
                    .then(ig.boxes[a].area().cmp(&ig.boxes[b].area()))
            });
        let Some(id2) = id2 else {
            break;
        };
        let gate2 = front_layer[id2].clone();

        let current_edges = ig.graph.num_edges();
        let mut best: Option<(usize, usize, usize)> = None; // (q1, q2, resulting edges)

        for (q1, q2) in [
            (gate1.control, gate2.control),
            (gate1.control, gate2.target),
            (gate1.target, gate2.control),
            (gate1.target, gate2.target),
        ] {
            if q1 == q2 || busy.contains(&q1) || busy.contains(&q2) {
                continue;
            }

            lattice.swap_logical_qubit(q1, q2);
            let mut trial_stack = accepted_pairs.clone();
            trial_stack.push((q1, q2));
            if replays(world, lattice, &trial_stack) {
                let edges = build_interference_graph(lattice, front_layer).graph.num_edges();
                if edges < current_edges && best.map(|(_, _, e)| edges < e).unwrap_or(true) {
                    best = Some((q1, q2, edges));
                }
            }
            lattice.swap_logical_qubit(q1, q2); // undo the probe
        }

        match best {
            Some((q1, q2, _)) => {
                lattice.swap_logical_qubit(q1, q2);
                busy.insert(q1);
                busy.insert(q2);
                accepted_pairs.push((q1, q2));
                let id = *next_gate_id;
                *next_gate_id += 1;
                accepted.push(make_swap(id, q1, q2));
            }
            None => break,
        }
    }

    accepted
}
