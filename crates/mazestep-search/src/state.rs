//! Per-run bookkeeping shared by every engine, and the read-only view handed
//! to renderers.

use std::fmt;

use log::debug;
use mazestep_core::{Cell, Grid};

use crate::cellset::CellSet;
use crate::error::{InvalidState, SearchError};

/// Lifecycle of a search run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    #[default]
    Running,
    /// The goal (or, bidirectionally, a meeting cell) was dequeued.
    Reached,
    /// The frontier emptied without reaching the goal.
    Exhausted,
}

impl Status {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Reached => "reached goal",
            Self::Exhausted => "exhausted",
        })
    }
}

/// What a single call to [`Search::step`](crate::Search::step) did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The cell was dequeued and its neighbors considered.
    Expanded(Cell),
    /// A stale priority-queue entry for an already-visited cell was dropped.
    Skipped(Cell),
    /// The run finished successfully at this cell.
    Reached(Cell),
    /// The container was empty; the run is over without success.
    Exhausted,
}

/// Visited/frontier sets, pointers and counters of one run.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub(crate) visited: CellSet,
    pub(crate) frontier: CellSet,
    pub(crate) current: Option<Cell>,
    pub(crate) next: Option<Cell>,
    pub(crate) steps: u64,
    pub(crate) num_expanded: u64,
    pub(crate) status: Status,
}

impl SearchState {
    /// Fresh state: nothing visited, `start` on the frontier and current.
    pub(crate) fn new(grid: &Grid) -> Self {
        let mut frontier = CellSet::new(grid);
        frontier.insert(grid.start());
        Self {
            visited: CellSet::new(grid),
            frontier,
            current: Some(grid.start()),
            next: None,
            steps: 0,
            num_expanded: 0,
            status: Status::Running,
        }
    }

    pub(crate) fn ensure_running(&self) -> Result<(), SearchError> {
        if self.status.is_terminal() {
            return Err(InvalidState::Finished(self.status).into());
        }
        Ok(())
    }

    pub(crate) fn exhaust(&mut self) -> Step {
        debug!(
            "frontier exhausted after {} steps, {} expanded",
            self.steps, self.num_expanded
        );
        self.status = Status::Exhausted;
        self.next = None;
        Step::Exhausted
    }

    pub(crate) fn reach(&mut self, cell: Cell) -> Step {
        debug!(
            "reached {cell} after {} steps, {} expanded",
            self.steps, self.num_expanded
        );
        self.status = Status::Reached;
        Step::Reached(cell)
    }

    pub fn visited(&self) -> &CellSet {
        &self.visited
    }

    pub fn frontier(&self) -> &CellSet {
        &self.frontier
    }

    pub fn current(&self) -> Option<Cell> {
        self.current
    }

    pub fn next(&self) -> Option<Cell> {
        self.next
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn num_expanded(&self) -> u64 {
        self.num_expanded
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn snapshot<'a>(
        &'a self,
        goal: Cell,
        frontier_size: usize,
        goal_frontier: Option<&'a CellSet>,
    ) -> Snapshot<'a> {
        Snapshot {
            visited: &self.visited,
            frontier: &self.frontier,
            goal_frontier,
            current: self.current,
            next: self.next,
            goal,
            reached_goal: self.status == Status::Reached,
            status: self.status,
            steps: self.steps,
            num_expanded: self.num_expanded,
            frontier_size,
        }
    }
}

/// Read-only view of an engine after a step.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub visited: &'a CellSet,
    /// The frontier (the start side's, for bidirectional search).
    pub frontier: &'a CellSet,
    /// The goal side's frontier of a bidirectional search.
    pub goal_frontier: Option<&'a CellSet>,
    pub current: Option<Cell>,
    /// What will be dequeued next; `None` when unknown or empty.
    pub next: Option<Cell>,
    pub goal: Cell,
    pub reached_goal: bool,
    pub status: Status,
    pub steps: u64,
    pub num_expanded: u64,
    /// Entries in the frontier container(s), stale ones included.
    pub frontier_size: usize,
}

impl Snapshot<'_> {
    /// Whether `cell` is on any frontier.
    pub fn on_frontier(&self, cell: Cell) -> bool {
        self.frontier.contains(cell) || self.goal_frontier.is_some_and(|g| g.contains(cell))
    }

    /// Frontier cells of every side, row-major per side.
    pub fn frontier_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.frontier
            .iter()
            .chain(self.goal_frontier.into_iter().flat_map(|g| g.iter()))
    }

    /// Owned summary of the counters.
    pub fn stats(&self) -> Stats {
        Stats {
            status: self.status,
            steps: self.steps,
            num_expanded: self.num_expanded,
            frontier_size: self.frontier_size,
            visited: self.visited.len(),
        }
    }
}

/// Counters of a run, detached from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub status: Status,
    pub steps: u64,
    pub num_expanded: u64,
    pub frontier_size: usize,
    pub visited: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} steps, {} on frontier, {} expanded ({})",
            self.steps, self.frontier_size, self.num_expanded, self.status
        )
    }
}
