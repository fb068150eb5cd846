//! Breadth-first and depth-first search, tree or graph, optionally
//! depth-limited and path-checked, driven one dequeue at a time.

use std::sync::Arc;

use log::trace;
use mazestep_core::{Cell, Connectivity, Grid};

use crate::config::{Mode, Variant};
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::state::{SearchState, Snapshot, Status, Step};
use crate::traits::Search;

/// A queued unit of work. `parent` indexes the node arena, so the path back
/// to the start is a parent walk rather than a copied vector.
#[derive(Debug, Clone, Copy)]
struct Node {
    cell: Cell,
    depth: u32,
    parent: Option<usize>,
}

/// The unified BFS/DFS engine, polymorphic over a [`Variant`].
///
/// In [`Mode::Tree`] nothing is ever marked visited, so on a cyclic grid a
/// run without a depth limit or path check may never terminate.
#[derive(Debug, Clone)]
pub struct FirstSearch {
    grid: Arc<Grid>,
    variant: Variant,
    connectivity: Connectivity,
    state: SearchState,
    nodes: Vec<Node>,
    queue: Frontier<usize>,
    /// Per-cell count of queued nodes, indexed like the grid.
    queued: Vec<u32>,
    goal_node: Option<usize>,
    nbuf: Vec<Cell>,
}

impl FirstSearch {
    /// Build an engine with the start cell queued at depth 0.
    pub fn new(grid: Arc<Grid>, variant: Variant, connectivity: Connectivity) -> Self {
        let len = grid.len();
        let mut search = Self {
            state: SearchState::new(&grid),
            grid,
            variant,
            connectivity,
            nodes: Vec::new(),
            queue: Frontier::new(variant.order),
            queued: vec![0; len],
            goal_node: None,
            nbuf: Vec::with_capacity(8),
        };
        let start = search.grid.start();
        search.enqueue(start, 0, None);
        search
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    #[inline]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Depth of the goal node once reached.
    pub fn goal_depth(&self) -> Option<u32> {
        self.goal_node.map(|id| self.nodes[id].depth)
    }

    fn enqueue(&mut self, cell: Cell, depth: u32, parent: Option<usize>) {
        let id = self.nodes.len();
        self.nodes.push(Node {
            cell,
            depth,
            parent,
        });
        self.queue.push(id);
        if let Some(i) = self.grid.index(cell) {
            self.queued[i] += 1;
        }
        self.state.frontier.insert(cell);
    }

    /// Drop one queued reference to `cell`, returning how many remain.
    fn dequeued(&mut self, cell: Cell) -> u32 {
        match self.grid.index(cell) {
            Some(i) => {
                self.queued[i] = self.queued[i].saturating_sub(1);
                self.queued[i]
            }
            None => 0,
        }
    }

    /// Whether `cell` lies on the path from node `id` back to the start.
    fn on_path(&self, id: usize, cell: Cell) -> bool {
        let mut at = Some(id);
        while let Some(i) = at {
            let node = &self.nodes[i];
            if node.cell == cell {
                return true;
            }
            at = node.parent;
        }
        false
    }

    fn path_to(&self, id: usize) -> Vec<Cell> {
        let mut path = Vec::with_capacity(self.nodes[id].depth as usize + 1);
        let mut at = Some(id);
        while let Some(i) = at {
            path.push(self.nodes[i].cell);
            at = self.nodes[i].parent;
        }
        path.reverse();
        path
    }
}

impl Search for FirstSearch {
    fn step(&mut self) -> Result<Step, SearchError> {
        self.state.ensure_running()?;

        let Some(id) = self.queue.pop() else {
            return Ok(self.state.exhaust());
        };
        let Node { cell, depth, .. } = self.nodes[id];
        let still_queued = self.dequeued(cell);

        if cell == self.grid.goal() {
            if still_queued == 0 {
                self.state.frontier.remove(cell);
            }
            self.goal_node = Some(id);
            return Ok(self.state.reach(cell));
        }

        self.state.current = Some(cell);
        match self.variant.mode {
            Mode::Graph => {
                self.state.visited.insert(cell);
                self.state.frontier.remove(cell);
            }
            Mode::Tree => {
                if still_queued == 0 {
                    self.state.frontier.remove(cell);
                }
            }
        }

        let child_depth = depth + 1;
        if self.variant.allows_depth(child_depth) {
            let mut nbuf = std::mem::take(&mut self.nbuf);
            nbuf.clear();
            nbuf.extend(self.grid.neighbors(cell, self.connectivity));

            for &n in nbuf.iter() {
                if self.state.visited.contains(n) || self.state.frontier.contains(n) {
                    continue;
                }
                if self.variant.check_path_to_start && self.on_path(id, n) {
                    continue;
                }
                self.enqueue(n, child_depth, Some(id));
                self.state.num_expanded += 1;
            }

            self.nbuf = nbuf;
        }

        self.state.next = self.queue.peek().map(|&i| self.nodes[i].cell);
        self.state.steps += 1;
        trace!(
            "step {}: expanded {cell} at depth {depth}, {} queued",
            self.state.steps,
            self.queue.len()
        );
        Ok(Step::Expanded(cell))
    }

    fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.grid), self.variant, self.connectivity);
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
        self.goal_node.map(|id| self.path_to(id))
    }
}
