//! Click-driven exploration: the user picks which frontier cell to reveal.

use std::sync::Arc;

use log::trace;
use mazestep_core::{Cell, Connectivity, Grid};

use crate::error::SearchError;
use crate::state::{SearchState, Snapshot, Status};

/// Outcome of [`Explorer::reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reveal {
    /// The cell moved from the frontier to the visited set.
    Expanded(Cell),
    /// The revealed cell was the goal.
    Reached(Cell),
    /// The cell was not on the frontier; nothing changed.
    Ignored,
}

/// Naive frontier expansion.
///
/// There is no container: after every reveal the whole visited set is
/// rescanned and every unvisited open neighbor joins the frontier.
#[derive(Debug, Clone)]
pub struct Explorer {
    grid: Arc<Grid>,
    connectivity: Connectivity,
    state: SearchState,
}

impl Explorer {
    /// Start visited, its neighbors on the frontier.
    pub fn new(grid: Arc<Grid>, connectivity: Connectivity) -> Self {
        let mut state = SearchState::new(&grid);
        let start = grid.start();
        state.frontier.remove(start);
        state.visited.insert(start);
        let mut explorer = Self {
            grid,
            connectivity,
            state,
        };
        explorer.expand_frontier();
        explorer.check_exhausted();
        explorer
    }

    #[inline]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.state.status
    }

    /// Add every open neighbor of a visited cell that is not visited and
    /// not already on the frontier. Returns how many cells were added.
    pub fn expand_frontier(&mut self) -> usize {
        let visited: Vec<Cell> = self.state.visited.iter().collect();
        let mut added = 0;
        for cell in visited {
            for n in self.grid.neighbors(cell, self.connectivity) {
                if !self.state.visited.contains(n) && self.state.frontier.insert(n) {
                    added += 1;
                }
            }
        }
        self.state.num_expanded += added as u64;
        added
    }

    /// Reveal a frontier cell.
    ///
    /// Cells off the frontier are [`Reveal::Ignored`]. Revealing once the
    /// goal is found, or once the frontier is empty, is an error.
    pub fn reveal(&mut self, cell: Cell) -> Result<Reveal, SearchError> {
        self.state.ensure_running()?;
        if !self.state.frontier.contains(cell) {
            trace!("ignored reveal of {cell}: not on the frontier");
            return Ok(Reveal::Ignored);
        }

        self.state.steps += 1;
        self.state.frontier.remove(cell);
        self.state.visited.insert(cell);
        self.state.current = Some(cell);

        let reached = cell == self.grid.goal();
        let added = self.expand_frontier();
        trace!(
            "reveal {}: {cell}, {added} new frontier cells",
            self.state.steps
        );

        if reached {
            self.state.reach(cell);
            return Ok(Reveal::Reached(cell));
        }
        self.check_exhausted();
        Ok(Reveal::Expanded(cell))
    }

    /// Forget every reveal.
    pub fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.grid), self.connectivity);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state
            .snapshot(self.grid.goal(), self.state.frontier.len(), None)
    }

    fn check_exhausted(&mut self) {
        if self.state.status == Status::Running && self.state.frontier.is_empty() {
            self.state.exhaust();
        }
    }
}
