//! Interference graph construction and component extraction.
//!
//! Two ready two-qubit gates interfere (can't braid in the same cycle
//! without risking crossing paths) exactly when their lattice bounding
//! boxes overlap. The scheduler builds this graph fresh each cycle from the
//! ready set, then peels it down to degree-`<=2` components it can braid
//! directly.

use qsched_core::{BoundingBox, Gate, Lattice};

use crate::graph::Graph;

/// Interference graph over a cycle's candidate two-qubit gates.
///
/// Vertex ids are indices into the `gates` slice passed to
/// [`build_interference_graph`], not circuit gate ids — callers map back
/// through that slice.
pub struct InterferenceGraph {
    pub graph: Graph,
    pub boxes: Vec<BoundingBox>,
}

/// Builds the interference graph for a set of candidate two-qubit gates.
///
/// Single-qubit gates never interfere with anything (they occupy one
/// physical qubit, not a braid through shared lattice cells) and are
/// expected to have already been filtered out by the caller.
pub fn build_interference_graph(lattice: &Lattice, gates: &[Gate]) -> InterferenceGraph {
    let boxes: Vec<BoundingBox> = gates
        .iter()
        .map(|g| lattice.get_area(g.control, g.target))
        .collect();

    let mut graph = Graph::new(gates.len());
    for i in 0..gates.len() {
        for j in (i + 1)..gates.len() {
            if boxes[i].overlaps(&boxes[j]) {
                graph.add_edge(i, j);
            }
        }
    }

    InterferenceGraph { graph, boxes }
}

/// Picks the highest-degree vertex with degree `>= 3`, the scheduler's
/// signal that a vertex must be peeled onto the retry stack before the
/// remaining graph can be decomposed into braidable path/cycle components.
///
/// Ties are broken by larger bounding-box area (bigger footprint gates are
/// more likely to keep blocking neighbors, so they're deferred first).
pub fn max_degree_vertex(ig: &InterferenceGraph) -> Option<usize> {
    ig.graph
        .vertices()
        .filter(|&v| ig.graph.degree(v) >= 3)
        .max_by(|&a, &b| {
            ig.graph
                .degree(a)
                .cmp(&ig.graph.degree(b))
                .then(ig.boxes[a].area().cmp(&ig.boxes[b].area()))
        })
}

/// Decomposes a degree-`<=2` graph into its path and cycle components,
/// ordered by ascending edge count (smaller components braid first, since
/// they're least likely to be blocked by lattice congestion).
///
/// Each component is returned as the sequence of vertex ids visited when
/// walking it; a path component lists both endpoints, a cycle component
/// returns to its start.
pub fn components_in_order(ig: &InterferenceGraph) -> Vec<Vec<usize>> {
    let mut visited = vec![false; ig.boxes.len()];
    let mut components = Vec::new();

    for v in ig.graph.vertices() {
        if visited[v] {
            continue;
        }
        debug_assert!(ig.graph.degree(v) <= 2, "component extraction requires degree <= 2");
        if ig.graph.degree(v) == 2 {
            continue; // visited via a path endpoint or cycle scan below
        }
        // v is a path endpoint (degree 0 or 1): walk forward from it.
        let mut component = vec![v];
        visited[v] = true;
        forward_walk(ig, v, &mut visited, &mut component);
        components.push(component);
    }

    // Remaining unvisited vertices (all degree 2) form pure cycles.
    for v in ig.graph.vertices() {
        if visited[v] {
            continue;
        }
        let mut component = vec![v];
        visited[v] = true;
        forward_walk(ig, v, &mut visited, &mut component);
        component.push(v);
        components.push(component);
    }

    components.sort_by_key(|c| c.len().saturating_sub(1));
    components
}

fn forward_walk(ig: &InterferenceGraph, start: usize, visited: &mut [bool], out: &mut Vec<usize>) {
    let mut prev = None;
    let mut current = start;
    loop {
        let next = ig
            .graph
            .neighbours(current)
            .iter()
            .copied()
            .find(|&n| Some(n) != prev && !visited[n]);
        match next {
            Some(n) => {
                visited[n] = true;
                out.push(n);
                prev = Some(current);
                current = n;
            }
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(control: usize, target: usize) -> Gate {
        Gate::new(0, "cx", control, target)
    }

    #[test]
    fn disjoint_gates_have_no_edges() {
        let lattice = Lattice::new(4);
        let gates = vec![g(0, 1), g(14, 15)];
        let ig = build_interference_graph(&lattice, &gates);
        assert_eq!(ig.graph.num_edges(), 0);
    }

    #[test]
    fn overlapping_gates_form_an_edge() {
        let lattice = Lattice::new(4);
        let gates = vec![g(0, 1), g(1, 5)];
        let ig = build_interference_graph(&lattice, &gates);
        assert_eq!(ig.graph.num_edges(), 1);
    }

    #[test]
    fn components_cover_every_vertex_once() {
        let lattice = Lattice::new(4);
        let gates = vec![g(0, 1), g(1, 5), g(8, 9)];
        let ig = build_interference_graph(&lattice, &gates);
        let components = components_in_order(&ig);
        let total: usize = components.iter().map(|c| c.len()).sum();
        assert_eq!(total, gates.len());
    }
}
