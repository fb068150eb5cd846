//! Shared fixtures and reference implementations for the engine tests.

use std::collections::VecDeque;

use mazestep_core::{Cell, Connectivity, Grid};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::state::Step;
use crate::traits::Search;

/// A `h`×`w` grid with start at the top-left corner and goal at the
/// bottom-right, every other cell a wall with probability `wall_p`.
pub(crate) fn random_grid(seed: u64, h: usize, w: usize, wall_p: f64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = Cell::new(0, 0);
    let goal = Cell::new(h as i32 - 1, w as i32 - 1);
    let open: Vec<bool> = (0..h * w)
        .map(|i| {
            let cell = Cell::new((i / w) as i32, (i % w) as i32);
            cell == start || cell == goal || !rng.random_bool(wall_p)
        })
        .collect();
    Grid::new(w, h, open, start, goal).unwrap()
}

/// Hop counts from the start by plain BFS, indexed like the grid.
pub(crate) fn bfs_distances(grid: &Grid, connectivity: Connectivity) -> Vec<Option<u32>> {
    let mut dist = vec![None; grid.len()];
    let mut queue = VecDeque::new();
    dist[grid.index(grid.start()).unwrap()] = Some(0);
    queue.push_back(grid.start());
    while let Some(cell) = queue.pop_front() {
        let d = dist[grid.index(cell).unwrap()].unwrap();
        for n in grid.neighbors(cell, connectivity) {
            let i = grid.index(n).unwrap();
            if dist[i].is_none() {
                dist[i] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

/// Least Euclidean path costs from the start, by Bellman-Ford relaxation.
pub(crate) fn reference_costs(grid: &Grid, connectivity: Connectivity) -> Vec<Option<f64>> {
    let mut cost: Vec<Option<f64>> = vec![None; grid.len()];
    cost[grid.index(grid.start()).unwrap()] = Some(0.0);
    loop {
        let mut changed = false;
        for cell in grid.open_cells() {
            let Some(c) = cost[grid.index(cell).unwrap()] else {
                continue;
            };
            for (n, d) in grid.weighted_neighbors(cell, connectivity) {
                let i = grid.index(n).unwrap();
                if cost[i].is_none_or(|old| c + d < old - 1e-12) {
                    cost[i] = Some(c + d);
                    changed = true;
                }
            }
        }
        if !changed {
            return cost;
        }
    }
}

/// Step until terminal, returning the final step. Panics after `limit` calls.
pub(crate) fn run_to_end<S: Search + ?Sized>(search: &mut S, limit: usize) -> Step {
    for _ in 0..limit {
        match search.step().unwrap() {
            step @ (Step::Reached(_) | Step::Exhausted) => return step,
            _ => {}
        }
    }
    panic!("no terminal state within {limit} steps");
}
