//! Bidirectional breadth-first search: one queue grows from the start, one
//! from the goal, and they take strict turns.

use std::sync::Arc;

use log::trace;
use mazestep_core::{Cell, Connectivity, Grid};

use crate::cellset::CellSet;
use crate::config::Order;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::state::{SearchState, Snapshot, Status, Step};
use crate::traits::Search;

/// Which end a queue grows from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Start,
    Goal,
}

impl Side {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Self::Start => Self::Goal,
            Self::Goal => Self::Start,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Goal => 1,
        }
    }
}

/// Meet-in-the-middle BFS.
///
/// The start side's frontier lives in the shared [`SearchState`]; the goal
/// side keeps its own. The meeting test runs when a cell is popped, so the
/// reported meeting cell is always one that was actually dequeued.
#[derive(Debug, Clone)]
pub struct Bidirectional {
    grid: Arc<Grid>,
    connectivity: Connectivity,
    state: SearchState,
    goal_frontier: CellSet,
    queues: [Frontier<Cell>; 2],
    /// Per side, the cell each queued cell was discovered from.
    parents: [Vec<Option<Cell>>; 2],
    active: Side,
    meeting: Option<Cell>,
    nbuf: Vec<Cell>,
}

impl Bidirectional {
    pub fn new(grid: Arc<Grid>, connectivity: Connectivity) -> Self {
        let mut goal_frontier = CellSet::new(&grid);
        goal_frontier.insert(grid.goal());
        let mut queues = [Frontier::new(Order::Fifo), Frontier::new(Order::Fifo)];
        queues[Side::Start.index()].push(grid.start());
        queues[Side::Goal.index()].push(grid.goal());
        Self {
            state: SearchState::new(&grid),
            goal_frontier,
            queues,
            parents: [vec![None; grid.len()], vec![None; grid.len()]],
            grid,
            connectivity,
            active: Side::Start,
            meeting: None,
            nbuf: Vec::with_capacity(8),
        }
    }

    #[inline]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// The side that the next [`step`](Search::step) pops from.
    #[inline]
    pub fn active(&self) -> Side {
        self.active
    }

    /// Where the two searches met, once reached.
    #[inline]
    pub fn meeting(&self) -> Option<Cell> {
        self.meeting
    }

    /// Frontier set of one side.
    pub fn frontier(&self, side: Side) -> &CellSet {
        match side {
            Side::Start => &self.state.frontier,
            Side::Goal => &self.goal_frontier,
        }
    }

    fn frontier_mut(&mut self, side: Side) -> &mut CellSet {
        match side {
            Side::Start => &mut self.state.frontier,
            Side::Goal => &mut self.goal_frontier,
        }
    }

    /// Cells from `cell` back to the seed of `side`, `cell` first.
    fn chain(&self, side: Side, cell: Cell) -> Vec<Cell> {
        let parents = &self.parents[side.index()];
        let mut out = vec![cell];
        let mut at = cell;
        while let Some(p) = self.grid.index(at).and_then(|i| parents[i]) {
            out.push(p);
            at = p;
        }
        out
    }
}

impl Search for Bidirectional {
    fn step(&mut self) -> Result<Step, SearchError> {
        self.state.ensure_running()?;

        let side = self.active;
        let other = side.other();
        let Some(cell) = self.queues[side.index()].pop() else {
            return Ok(self.state.exhaust());
        };

        if self.frontier(other).contains(cell) {
            self.frontier_mut(side).remove(cell);
            self.meeting = Some(cell);
            return Ok(self.state.reach(cell));
        }

        self.state.current = Some(cell);
        self.state.visited.insert(cell);
        self.frontier_mut(side).remove(cell);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend(self.grid.neighbors(cell, self.connectivity));

        for &n in nbuf.iter() {
            if self.state.visited.contains(n) || self.frontier(side).contains(n) {
                continue;
            }
            self.frontier_mut(side).insert(n);
            self.queues[side.index()].push(n);
            if let Some(i) = self.grid.index(n) {
                self.parents[side.index()][i] = Some(cell);
            }
            self.state.num_expanded += 1;
        }

        self.nbuf = nbuf;

        self.state.next = self.queues[other.index()].peek().copied();
        self.active = other;
        self.state.steps += 1;
        trace!(
            "step {}: {side:?} side expanded {cell}, queues {}/{}",
            self.state.steps,
            self.queues[0].len(),
            self.queues[1].len()
        );
        Ok(Step::Expanded(cell))
    }

    fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.grid), self.connectivity);
    }

    fn snapshot(&self) -> Snapshot<'_> {
        let size = self.queues[0].len() + self.queues[1].len();
        self.state
            .snapshot(self.grid.goal(), size, Some(&self.goal_frontier))
    }

    #[inline]
    fn status(&self) -> Status {
        self.state.status
    }

    #[inline]
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn solution(&self) -> Option<Vec<Cell>> {
        let meeting = self.meeting?;
        let mut path = self.chain(Side::Start, meeting);
        path.reverse();
        path.extend(self.chain(Side::Goal, meeting).into_iter().skip(1));
        Some(path)
    }
}
