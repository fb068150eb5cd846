//! Shared pieces of the `mazestep` terminal front-end.
//!
//! Demonstrates: random maze generation, text rendering of search snapshots,
//! and loading mazes from text files.

use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    cursor, execute,
    terminal::{self, ClearType},
};
use mazestep_core::{Cell, Grid, GridError};
use mazestep_search::{SearchError, Snapshot};
use rand::{Rng, RngExt};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("encoding stats: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a maze file in the `#`/`.`/`S`/`G` text layout.
pub fn load_maze(path: &Path) -> Result<Grid, DemoError> {
    let text = std::fs::read_to_string(path)?;
    Ok(Grid::parse(&text)?)
}

// ---------------------------------------------------------------------------
// Maze generation
// ---------------------------------------------------------------------------

/// Carves perfect mazes by randomized depth-first backtracking, then knocks
/// out a fraction of the remaining inner walls to add cycles.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// A maze of `rooms_h`×`rooms_w` rooms, rendered on a
    /// `(2·rooms_h − 1)`×`(2·rooms_w − 1)` grid. Rooms sit on even
    /// coordinates; odd rows/columns hold the walls between them.
    ///
    /// Start is the top-left room and goal the bottom-right one. Each inner
    /// wall that survives carving is removed with probability `loops`.
    pub fn generate(
        &mut self,
        rooms_h: usize,
        rooms_w: usize,
        loops: f64,
    ) -> Result<Grid, GridError> {
        let height = (2 * rooms_h).saturating_sub(1);
        let width = (2 * rooms_w).saturating_sub(1);
        let mut open = vec![false; width * height];
        let idx = |c: Cell| c.row as usize * width + c.col as usize;

        if rooms_h > 0 && rooms_w > 0 {
            let mut seen = vec![false; rooms_h * rooms_w];
            let mut stack = vec![(0usize, 0usize)];
            seen[0] = true;
            open[0] = true;
            let mut choices = Vec::with_capacity(4);

            while let Some(&(r, c)) = stack.last() {
                choices.clear();
                if r > 0 && !seen[(r - 1) * rooms_w + c] {
                    choices.push((r - 1, c));
                }
                if r + 1 < rooms_h && !seen[(r + 1) * rooms_w + c] {
                    choices.push((r + 1, c));
                }
                if c > 0 && !seen[r * rooms_w + c - 1] {
                    choices.push((r, c - 1));
                }
                if c + 1 < rooms_w && !seen[r * rooms_w + c + 1] {
                    choices.push((r, c + 1));
                }
                if choices.is_empty() {
                    stack.pop();
                    continue;
                }
                let (nr, nc) = choices[self.rng.random_range(0..choices.len())];
                seen[nr * rooms_w + nc] = true;
                let room = Cell::new(2 * nr as i32, 2 * nc as i32);
                let wall = Cell::new((r + nr) as i32, (c + nc) as i32);
                open[idx(room)] = true;
                open[idx(wall)] = true;
                stack.push((nr, nc));
            }

            if loops > 0.0 {
                for row in 0..height {
                    for col in 0..width {
                        // Exactly one odd coordinate: a wall between two rooms.
                        if (row % 2 == 1) != (col % 2 == 1)
                            && !open[row * width + col]
                            && self.rng.random_bool(loops.min(1.0))
                        {
                            open[row * width + col] = true;
                        }
                    }
                }
            }
        }

        let start = Cell::new(0, 0);
        let goal = Cell::new(height as i32 - 1, width as i32 - 1);
        Grid::new(width, height, open, start, goal)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub const CURRENT: char = '@';
pub const NEXT: char = '+';
pub const VISITED: char = 'o';
pub const FRONTIER: char = '*';
pub const PATH: char = 'x';

/// Draw `snap` over `grid`, one line per row.
///
/// Precedence: current, next, goal, start, visited, frontier, then the grid
/// itself.
pub fn render(grid: &Grid, snap: &Snapshot<'_>) -> String {
    render_with(grid, |cell| {
        if snap.current == Some(cell) {
            Some(CURRENT)
        } else if snap.next == Some(cell) {
            Some(NEXT)
        } else if cell == grid.goal() {
            Some(mazestep_core::grid::GOAL)
        } else if cell == grid.start() {
            Some(mazestep_core::grid::START)
        } else if snap.visited.contains(cell) {
            Some(VISITED)
        } else if snap.on_frontier(cell) {
            Some(FRONTIER)
        } else {
            None
        }
    })
}

/// Draw `path` over `grid`, keeping the start and goal markers.
pub fn render_path(grid: &Grid, path: &[Cell]) -> String {
    render_with(grid, |cell| {
        (cell != grid.start() && cell != grid.goal() && path.contains(&cell)).then_some(PATH)
    })
}

fn render_with(grid: &Grid, mut overlay: impl FnMut(Cell) -> Option<char>) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let cell = Cell::new(row as i32, col as i32);
            let ch = overlay(cell).unwrap_or(if grid.is_open(cell) {
                mazestep_core::grid::OPEN
            } else {
                mazestep_core::grid::WALL
            });
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// One status line under a frame.
pub fn status_line(snap: &Snapshot<'_>) -> String {
    match snap.current {
        Some(cur) => format!("{}, at {cur}", snap.stats()),
        None => snap.stats().to_string(),
    }
}

/// Clear the terminal, home the cursor and write `frame` followed by
/// `status`.
pub fn draw_frame(out: &mut impl Write, frame: &str, status: &str) -> io::Result<()> {
    execute!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    writeln!(out, "{frame}{status}")?;
    out.flush()
}
