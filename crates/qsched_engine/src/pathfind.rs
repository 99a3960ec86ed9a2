//! A* braid pathfinding over the lattice's corner grid.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use qsched_core::{Matrix, Point, CELL_CORNERS, INVERSE_STEP_DIRECTIONS, STEP_DIRECTIONS};

/// One entry in the A* fringe.
///
/// Ordered by `f = g + h` ascending; `BinaryHeap` is a max-heap, so
/// `Ord`/`PartialOrd` below are reversed. Ties on `f` favor the *larger* `g`
/// (the deeper, more-committed path), matching the reference pathfinder's
/// tie-break — preferring depth avoids repeatedly re-expanding shallow
/// nodes when many cells share the same heuristic estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FringeEntry {
    point: Point,
    g: u32,
    f: u32,
}

impl Ord for FringeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
    }
}

impl PartialOrd for FringeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn manhattan(a: Point, b: Point) -> u32 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as u32
}

/// Finds the shortest free path from `start` to `goal` on `world`, avoiding
/// any occupied cell other than `goal` itself (the destination qubit's own
/// cell is allowed to already carry state). An occupied `start` fails
/// immediately — a braid can't originate from a cell another gate already
/// holds.
///
/// Returns `None` if no free path exists. The fringe is rebuilt ("dirty")
/// whenever a cheaper route to an already-queued point is found, rather
/// than decreasing a key in place — with the grid sizes this scheduler
/// operates on, the extra heap churn is cheaper than a decrease-key-capable
/// structure.
pub fn find_path(world: &Matrix, start: Point, goal: Point) -> Option<Vec<Point>> {
    if start == goal {
        return Some(vec![start]);
    }
    if !world.in_bounds(start) || !world.in_bounds(goal) {
        return None;
    }
    if !world.is_free(start) {
        return None;
    }

    let side = world.side();
    let mut best_g: Vec<u32> = vec![u32::MAX; side * side];
    let mut came_from: Vec<Option<usize>> = vec![None; side * side];
    let idx = |p: Point| p.y as usize * side + p.x as usize;

    let mut fringe = BinaryHeap::new();
    best_g[idx(start)] = 0;
    fringe.push(FringeEntry {
        point: start,
        g: 0,
        f: manhattan(start, goal),
    });

    while let Some(FringeEntry { point, g, .. }) = fringe.pop() {
        if point == goal {
            return Some(reconstruct(start, goal, &came_from, side));
        }
        if g > best_g[idx(point)] {
            continue; // stale fringe entry from a since-improved route
        }

        for (dir_idx, step) in STEP_DIRECTIONS.iter().enumerate() {
            let next = point + *step;
            if !world.in_bounds(next) {
                continue;
            }
            if next != goal && !world.is_free(next) {
                continue;
            }
            let next_g = g + 1;
            if next_g < best_g[idx(next)] {
                best_g[idx(next)] = next_g;
                came_from[idx(next)] = Some(dir_idx);
                fringe.push(FringeEntry {
                    point: next,
                    g: next_g,
                    f: next_g + manhattan(next, goal),
                });
            }
        }
    }

    None
}

fn reconstruct(start: Point, goal: Point, came_from: &[Option<usize>], side: usize) -> Vec<Point> {
    let idx = |p: Point| p.y as usize * side + p.x as usize;
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let dir_idx = came_from[idx(current)].expect("path must be connected to start");
        current = current + INVERSE_STEP_DIRECTIONS[dir_idx];
        path.push(current);
    }
    path.reverse();
    path
}

/// Tries to braid a two-qubit gate between two source cells, attempting
/// every corner of each qubit's footprint as the endpoint (a qubit's
/// physical position has four adjacent lattice corners it can braid from).
///
/// Returns the shortest path found across all sixteen corner combinations,
/// or `None` if every combination is blocked.
pub fn braid(world: &Matrix, control_pos: Point, target_pos: Point) -> Option<Vec<Point>> {
    let mut best: Option<Vec<Point>> = None;
    for c in CELL_CORNERS {
        for t in CELL_CORNERS {
            let start = control_pos + c;
            let goal = target_pos + t;
            if !world.in_bounds(start) || !world.in_bounds(goal) {
                continue;
            }
            if let Some(path) = find_path(world, start, goal) {
                if best.as_ref().map(|b| path.len() < b.len()).unwrap_or(true) {
                    best = Some(path);
                }
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_path_has_manhattan_length() {
        let world = Matrix::new(5);
        let path = find_path(&world, Point::new(0, 0), Point::new(3, 0)).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(3, 0)));
    }

    #[test]
    fn blocked_cell_forces_a_detour() {
        let mut world = Matrix::new(3);
        world.occupy(&[Point::new(1, 0)], 1);
        let path = find_path(&world, Point::new(0, 0), Point::new(2, 0)).unwrap();
        assert!(path.len() > 3);
        assert!(!path.contains(&Point::new(1, 0)));
    }

    #[test]
    fn occupied_start_has_no_path() {
        let mut world = Matrix::new(3);
        world.occupy(&[Point::new(0, 0)], 1);
        assert!(find_path(&world, Point::new(0, 0), Point::new(2, 0)).is_none());
    }

    #[test]
    fn fully_enclosed_goal_has_no_path() {
        let mut world = Matrix::new(3);
        world.occupy(
            &[Point::new(0, 1), Point::new(1, 0), Point::new(2, 1), Point::new(1, 2)],
            1,
        );
        assert!(find_path(&world, Point::new(0, 0), Point::new(1, 1)).is_none());
    }

    #[test]
    fn braid_tries_every_corner() {
        let world = Matrix::new(7);
        let path = braid(&world, Point::new(0, 0), Point::new(4, 0)).unwrap();
        assert!(!path.is_empty());
    }
}
