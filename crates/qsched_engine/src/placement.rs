//! Initial qubit placement: recursive bisection and the line-graph fallback.

use qsched_core::Lattice;

use crate::graph::Graph;

/// Splits a weighted coupling graph into two balanced-size vertex sets.
///
/// This is the seam the graph-partitioning library (e.g. a METIS binding)
/// plugs into; [`GreedyPartitioner`] below is a dependency-free reference
/// implementation good enough to drive the recursive bisection placer
/// without pulling in an external partitioning crate.
pub trait BalancedPartitioner {
    /// Partitions `graph`'s vertices into two sets whose sizes are as close
    /// as possible to `target_left` and `graph.num_vertices() -
    /// target_left`. Returns the left set.
    fn bisect(&self, graph: &Graph, target_left: usize) -> Vec<usize>;
}

/// Deterministic greedy bisection: repeatedly assigns the highest-degree
/// unassigned vertex to whichever side still has spare target capacity,
/// breaking ties by smaller vertex id for reproducibility.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPartitioner;

impl BalancedPartitioner for GreedyPartitioner {
    fn bisect(&self, graph: &Graph, target_left: usize) -> Vec<usize> {
        let mut vertices: Vec<usize> = graph.vertices().collect();
        vertices.sort_by(|&a, &b| graph.degree(b).cmp(&graph.degree(a)).then(a.cmp(&b)));

        let mut left = Vec::new();
        let mut left_capacity = target_left;
        let mut right_capacity = vertices.len().saturating_sub(target_left);

        for v in vertices {
            let left_neighbours = graph.neighbours(v).iter().filter(|n| left.contains(n)).count();
            let right_neighbours = graph.degree(v) - left_neighbours;

            let goes_left = if left_capacity == 0 {
                false
            } else if right_capacity == 0 {
                true
            } else {
                left_neighbours >= right_neighbours
            };

            if goes_left {
                left.push(v);
                left_capacity -= 1;
            } else {
                right_capacity = right_capacity.saturating_sub(1);
            }
        }

        left
    }
}

/// Recursively bisects `coupling` (a logical-qubit interaction graph,
/// weighted implicitly by edge presence) into the physical sub-rectangles
/// of a square lattice, each split weighted by the target rectangle's
/// area so a lattice that doesn't split evenly still gets a proportional
/// partition.
///
/// `coupling` may have fewer vertices than `lattice_side * lattice_side`
/// (a circuit need not use every physical qubit); the remainder is padded
/// with isolated dummy vertices so every physical slot still gets a
/// logical index, matching [`Lattice::with_placement`]'s requirement that
/// the placement cover every physical qubit.
///
/// Returns `logical -> physical` placement, indexed by logical qubit id.
pub fn recursive_bisect_placement(
    coupling: &Graph,
    lattice_side: usize,
    partitioner: &dyn BalancedPartitioner,
) -> Vec<usize> {
    let total = lattice_side * lattice_side;
    let mut padded = coupling.clone();
    while padded.num_vertices() < total {
        padded.add_vertex();
    }
    let n = padded.num_vertices();
    let mut placement = vec![0usize; n];
    assign_region(
        &padded,
        (0..n).collect(),
        0,
        0,
        lattice_side,
        lattice_side,
        lattice_side,
        partitioner,
        &mut placement,
    );
    placement
}

#[allow(clippy::too_many_arguments)]
fn assign_region(
    coupling: &Graph,
    vertices: Vec<usize>,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
    lattice_side: usize,
    partitioner: &dyn BalancedPartitioner,
    placement: &mut [usize],
) {
    let area = width * height;
    if vertices.len() <= 1 || area <= 1 {
        for (i, &v) in vertices.iter().enumerate() {
            let idx = i.min(area.saturating_sub(1));
            let px = x0 + idx % width.max(1);
            let py = y0 + idx / width.max(1);
            placement[v] = py * lattice_side + px;
        }
        return;
    }

    let split_vertically = width >= height;
    let (left_w, left_h, right_w, right_h) = if split_vertically {
        (width / 2, height, width - width / 2, height)
    } else {
        (width, height / 2, width, height - height / 2)
    };
    let left_area = left_w * left_h;

    let mut sub = Graph::new(vertices.len());
    let index_of: std::collections::HashMap<usize, usize> =
        vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    for (i, &v) in vertices.iter().enumerate() {
        for &u in coupling.neighbours(v) {
            if let Some(&j) = index_of.get(&u) {
                if j > i {
                    sub.add_edge(i, j);
                }
            }
        }
    }

    let target_left = (vertices.len() * left_area) / area.max(1);
    let left_local = partitioner.bisect(&sub, target_left.min(vertices.len()));
    let left_set: std::collections::HashSet<usize> = left_local.into_iter().collect();

    let mut left_vertices = Vec::new();
    let mut right_vertices = Vec::new();
    for (i, &v) in vertices.iter().enumerate() {
        if left_set.contains(&i) {
            left_vertices.push(v);
        } else {
            right_vertices.push(v);
        }
    }

    let (right_x0, right_y0) = if split_vertically {
        (x0 + left_w, y0)
    } else {
        (x0, y0 + left_h)
    };

    assign_region(
        coupling, left_vertices, x0, y0, left_w, left_h, lattice_side, partitioner, placement,
    );
    assign_region(
        coupling, right_vertices, right_x0, right_y0, right_w, right_h, lattice_side, partitioner, placement,
    );
}

/// Snake/zigzag mapping for a pure line-graph coupling graph: logical qubit
/// `i` goes to physical position `i` read in boustrophedon (row-reversing)
/// order, which keeps every edge of a line graph between
/// lattice-adjacent physical qubits.
pub fn snake_placement(lattice: &Lattice) -> Vec<usize> {
    let side = lattice.length();
    let mut placement = vec![0usize; side * side];
    let mut logical = 0;
    for row in 0..side {
        let cols: Box<dyn Iterator<Item = usize>> = if row % 2 == 0 {
            Box::new(0..side)
        } else {
            Box::new((0..side).rev())
        };
        for col in cols {
            placement[logical] = row * side + col;
            logical += 1;
        }
    }
    placement
}
