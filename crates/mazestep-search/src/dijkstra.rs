//! Uniform-cost (Dijkstra) search with lazy deletion.

use std::sync::Arc;

use log::trace;
use mazestep_core::{Cell, Connectivity, Grid};

use crate::error::SearchError;
use crate::frontier::CostQueue;
use crate::state::{SearchState, Snapshot, Status, Step};
use crate::traits::Search;

#[derive(Debug, Clone, Copy)]
struct Node {
    cell: Cell,
    cost: f64,
    parent: Option<usize>,
}

/// Uniform-cost search over Euclidean step distances.
///
/// Neighbors are pushed at every improvement candidate without a decrease-key;
/// a cell may sit in the queue several times at different costs. Only the
/// first pop of a cell expands it, later pops are discarded as stale.
#[derive(Debug)]
pub struct UniformCost {
    grid: Arc<Grid>,
    connectivity: Connectivity,
    state: SearchState,
    nodes: Vec<Node>,
    queue: CostQueue<usize>,
    goal_node: Option<usize>,
    nbuf: Vec<(Cell, f64)>,
}

impl UniformCost {
    pub fn new(grid: Arc<Grid>, connectivity: Connectivity) -> Self {
        let start = grid.start();
        let mut queue = CostQueue::new();
        queue.push(0, 0.0);
        Self {
            state: SearchState::new(&grid),
            grid,
            connectivity,
            nodes: vec![Node {
                cell: start,
                cost: 0.0,
                parent: None,
            }],
            queue,
            goal_node: None,
            nbuf: Vec::with_capacity(8),
        }
    }

    #[inline]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Accumulated cost at which the goal was popped.
    pub fn goal_cost(&self) -> Option<f64> {
        self.goal_node.map(|id| self.nodes[id].cost)
    }

    fn peek_cell(&self) -> Option<Cell> {
        self.queue.peek().map(|(&id, _)| self.nodes[id].cell)
    }
}

impl Search for UniformCost {
    fn step(&mut self) -> Result<Step, SearchError> {
        self.state.ensure_running()?;

        let Some((id, cost)) = self.queue.pop() else {
            return Ok(self.state.exhaust());
        };
        let cell = self.nodes[id].cell;

        if cell == self.grid.goal() {
            self.state.frontier.remove(cell);
            self.goal_node = Some(id);
            return Ok(self.state.reach(cell));
        }

        if self.state.visited.contains(cell) {
            self.state.next = self.peek_cell();
            trace!("skipped stale entry for {cell} at cost {cost:.3}");
            return Ok(Step::Skipped(cell));
        }

        self.state.current = Some(cell);
        self.state.visited.insert(cell);
        self.state.frontier.remove(cell);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend(self.grid.weighted_neighbors(cell, self.connectivity));

        for &(n, dist) in nbuf.iter() {
            if self.state.visited.contains(n) {
                continue;
            }
            let nid = self.nodes.len();
            self.nodes.push(Node {
                cell: n,
                cost: cost + dist,
                parent: Some(id),
            });
            self.queue.push(nid, cost + dist);
            self.state.frontier.insert(n);
            self.state.num_expanded += 1;
        }

        self.nbuf = nbuf;

        self.state.next = self.peek_cell();
        self.state.steps += 1;
        trace!(
            "step {}: expanded {cell} at cost {cost:.3}, {} queued",
            self.state.steps,
            self.queue.len()
        );
        Ok(Step::Expanded(cell))
    }

    fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.grid), self.connectivity);
    }

    fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot(self.grid.goal(), self.queue.len(), None)
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
        let mut at = self.goal_node;
        let mut path = Vec::new();
        while let Some(i) = at {
            path.push(self.nodes[i].cell);
            at = self.nodes[i].parent;
        }
        if path.is_empty() {
            return None;
        }
        path.reverse();
        Some(path)
    }
}
