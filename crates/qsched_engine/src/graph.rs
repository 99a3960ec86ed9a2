//! A small undirected graph keyed by `usize` vertex id.
//!
//! Used for the interference graph the scheduler peels each cycle and for
//! the coupling graph the initial placer bisects. Vertices can be deleted
//! mid-algorithm (the stack scheduler strips vertices as it commits their
//! gates), so adjacency is kept as per-vertex neighbor sets rather than a
//! fixed-size matrix.

use std::collections::BTreeSet;

/// An undirected graph over vertex ids `0..capacity`, with vertices
/// deletable independently of that range.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// `neighbours[v]` is `None` for a deleted (or never-added) vertex.
    neighbours: Vec<Option<BTreeSet<usize>>>,
}

impl Graph {
    /// Builds a graph with `n` vertices, `0..n`, and no edges.
    pub fn new(n: usize) -> Self {
        Self {
            neighbours: (0..n).map(|_| Some(BTreeSet::new())).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            neighbours: Vec::new(),
        }
    }

    /// Adds a new vertex, returning its id.
    pub fn add_vertex(&mut self) -> usize {
        let id = self.neighbours.len();
        self.neighbours.push(Some(BTreeSet::new()));
        id
    }

    pub fn has_vertex(&self, v: usize) -> bool {
        matches!(self.neighbours.get(v), Some(Some(_)))
    }

    /// Removes a vertex and every edge touching it.
    pub fn delete_vertex(&mut self, v: usize) {
        if let Some(Some(adj)) = self.neighbours.get(v).cloned() {
            for u in adj {
                if let Some(Some(set)) = self.neighbours.get_mut(u) {
                    set.remove(&v);
                }
            }
        }
        self.neighbours[v] = None;
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u != v, "no self-loops");
        if let Some(Some(set)) = self.neighbours.get_mut(u) {
            set.insert(v);
        }
        if let Some(Some(set)) = self.neighbours.get_mut(v) {
            set.insert(u);
        }
    }

    pub fn remove_edge(&mut self, u: usize, v: usize) {
        if let Some(Some(set)) = self.neighbours.get_mut(u) {
            set.remove(&v);
        }
        if let Some(Some(set)) = self.neighbours.get_mut(v) {
            set.remove(&u);
        }
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.neighbours
            .get(u)
            .and_then(|n| n.as_ref())
            .map(|set| set.contains(&v))
            .unwrap_or(false)
    }

    pub fn neighbours(&self, v: usize) -> &BTreeSet<usize> {
        self.neighbours[v].as_ref().expect("vertex was deleted")
    }

    pub fn degree(&self, v: usize) -> usize {
        self.neighbours(v).len()
    }

    /// Ids of every live vertex, in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.neighbours
            .iter()
            .enumerate()
            .filter_map(|(id, adj)| adj.as_ref().map(|_| id))
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices().count()
    }

    pub fn num_edges(&self) -> usize {
        self.vertices().map(|v| self.degree(v)).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_is_symmetric() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 0));
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn delete_vertex_removes_incident_edges() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.delete_vertex(1);
        assert_eq!(g.num_vertices(), 2);
        assert_eq!(g.num_edges(), 0);
        assert!(!g.has_vertex(1));
    }

    #[test]
    fn degree_counts_live_neighbours() {
        let mut g = Graph::new(4);
        g.add_edge(0, 1);
        g.add_edge(0, 2);
        g.add_edge(0, 3);
        assert_eq!(g.degree(0), 3);
    }
}
