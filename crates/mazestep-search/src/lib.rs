//! Step-observable maze search engines.
//!
//! Every engine advances one dequeue per [`Search::step`] and exposes its
//! visited set, frontier, current and next cells through a [`Snapshot`], so a
//! renderer can draw each intermediate state:
//!
//! - **Breadth/depth-first**, tree or graph, depth-limited and path-checked
//!   ([`FirstSearch`] over a [`Variant`])
//! - **Bidirectional** breadth-first meeting in the middle ([`Bidirectional`])
//! - **Uniform cost** (Dijkstra) with lazy deletion ([`UniformCost`])
//! - **Naive expansion** driven by user reveals ([`Explorer`])
//!
//! [`StepDriver`] builds an engine from a [`SearchConfig`] and steps it by
//! hand or on a timer until it is stopped.
//!
//! # Containers
//!
//! | Engine | Container | Sets |
//! |---|---|---|
//! | [`FirstSearch`] | [`Frontier`] queue or stack | visited (graph mode), frontier |
//! | [`Bidirectional`] | two FIFO [`Frontier`]s | visited, one frontier per side |
//! | [`UniformCost`] | [`CostQueue`] | visited, frontier |
//! | [`Explorer`] | none | visited, frontier |

mod bidirectional;
mod cellset;
mod config;
mod dijkstra;
mod driver;
mod error;
mod explorer;
mod first;
mod frontier;
mod state;
mod traits;

#[cfg(test)]
mod testutil;

pub use bidirectional::{Bidirectional, Side};
pub use cellset::CellSet;
pub use config::{Algorithm, Mode, Order, SearchConfig, Variant};
pub use dijkstra::UniformCost;
pub use driver::{StepDriver, StopHandle, build};
pub use error::{InvalidState, SearchError};
pub use explorer::{Explorer, Reveal};
pub use first::FirstSearch;
pub use frontier::{CostQueue, Frontier};
pub use mazestep_core::{Cell, Connectivity, Grid, GridError};
pub use state::{SearchState, Snapshot, Stats, Status, Step};
pub use traits::Search;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;
    use crate::testutil::random_grid;

    fn assert_sets_consistent(grid: &Grid, snap: &Snapshot<'_>) {
        assert!(!snap.visited.intersects(snap.frontier));
        if let Some(goal_side) = snap.goal_frontier {
            assert!(!snap.visited.intersects(goal_side));
        }
        for cell in snap.visited.iter().chain(snap.frontier_cells()) {
            assert!(grid.is_open(cell), "{cell} is blocked or out of bounds");
        }
    }

    fn configs() -> Vec<SearchConfig> {
        let mut out = Vec::new();
        for algorithm in Algorithm::ALL {
            for connectivity in [Connectivity::Four, Connectivity::Eight] {
                let base = SearchConfig::new(algorithm).with_connectivity(connectivity);
                out.push(base);
                if base.variant().is_some() {
                    out.push(base.with_mode(Mode::Tree).with_max_depth(Some(6)));
                    out.push(base.with_mode(Mode::Tree).with_path_check(true));
                }
            }
        }
        out
    }

    #[test]
    fn visited_and_frontier_stay_disjoint() {
        for seed in 0..8 {
            let grid = Arc::new(random_grid(seed, 8, 9, 0.25));
            for config in configs() {
                let mut engine = build(Arc::clone(&grid), &config);
                assert_sets_consistent(&grid, &engine.snapshot());
                for _ in 0..2_000 {
                    if engine.is_terminal() {
                        break;
                    }
                    engine.step().unwrap();
                    assert_sets_consistent(&grid, &engine.snapshot());
                }
            }
        }
    }

    #[test]
    fn explorer_sets_stay_disjoint() {
        for seed in 0..10 {
            let grid = Arc::new(random_grid(seed, 9, 9, 0.3));
            let mut rng = StdRng::seed_from_u64(seed);
            let mut explorer = Explorer::new(Arc::clone(&grid), Connectivity::Four);
            while explorer.status() == Status::Running {
                let frontier: Vec<Cell> = explorer.state().frontier().iter().collect();
                let pick = frontier[rng.random_range(0..frontier.len())];
                explorer.reveal(pick).unwrap();
                assert_sets_consistent(&grid, &explorer.snapshot());
            }
        }
    }

    #[test]
    fn terminal_step_leaves_state_unchanged() {
        let grid = Arc::new(random_grid(3, 7, 7, 0.2));
        for config in configs() {
            let mut engine = build(Arc::clone(&grid), &config);
            for _ in 0..5_000 {
                if engine.is_terminal() {
                    break;
                }
                engine.step().unwrap();
            }
            if !engine.is_terminal() {
                continue;
            }
            let before = engine.snapshot().stats();
            let status = engine.status();
            assert_eq!(
                engine.step(),
                Err(SearchError::InvalidState(InvalidState::Finished(status)))
            );
            assert_eq!(engine.snapshot().stats(), before);
        }
    }
}
