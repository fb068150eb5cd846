//! An immutable occupancy grid with start and goal markers.
//!
//! [`Grid`] stores a dense row-major `bool` matrix (`true` = open) and is
//! never mutated after construction. Search engines share it behind an
//! `Arc`.

use std::fmt;

use crate::error::GridError;
use crate::geom::Cell;
use crate::neighbors::{Connectivity, Neighbors, WeightedNeighbors};

/// Characters accepted by [`Grid::parse`].
pub const WALL: char = '#';
pub const OPEN: char = '.';
pub const START: char = 'S';
pub const GOAL: char = 'G';

/// A rectangular maze: open/blocked cells plus a start and a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    open: Vec<bool>,
    start: Cell,
    goal: Cell,
}

impl Grid {
    /// Build a grid from a row-major occupancy buffer (`true` = open).
    pub fn new(
        width: usize,
        height: usize,
        open: Vec<bool>,
        start: Cell,
        goal: Cell,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        let expected = width * height;
        if open.len() != expected {
            return Err(GridError::SizeMismatch {
                len: open.len(),
                expected,
            });
        }
        let grid = Self {
            width,
            height,
            open,
            start,
            goal,
        };
        grid.check_marker("start", start)?;
        grid.check_marker("goal", goal)?;
        if start == goal {
            return Err(GridError::StartIsGoal(start));
        }
        Ok(grid)
    }

    /// Build a grid from nested rows (`rows[row][col]`, `true` = open).
    ///
    /// Every row must be as wide as the first.
    pub fn from_rows(rows: &[Vec<bool>], start: Cell, goal: Cell) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut open = Vec::with_capacity(width * height);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != width {
                return Err(GridError::NotRectangular {
                    row,
                    width: r.len(),
                    expected: width,
                });
            }
            open.extend_from_slice(r);
        }
        Self::new(width, height, open, start, goal)
    }

    /// Parse a text layout.
    ///
    /// `#` is a wall, `.` or a space is open, `S` marks the start and `G` the
    /// goal (both open). Trailing blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }

        let mut rows = Vec::with_capacity(lines.len());
        let mut start = None;
        let mut goal = None;
        for (r, line) in lines.iter().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (c, ch) in line.chars().enumerate() {
                let cell = Cell::new(r as i32, c as i32);
                match ch {
                    WALL => row.push(false),
                    OPEN | ' ' => row.push(true),
                    START => {
                        set_marker(&mut start, "start", cell)?;
                        row.push(true);
                    }
                    GOAL => {
                        set_marker(&mut goal, "goal", cell)?;
                        row.push(true);
                    }
                    _ => return Err(GridError::InvalidChar { ch, cell }),
                }
            }
            rows.push(row);
        }

        let start = start.ok_or(GridError::MissingMarker("start"))?;
        let goal = goal.ok_or(GridError::MissingMarker("goal"))?;
        Self::from_rows(&rows, start, goal)
    }

    fn check_marker(&self, what: &'static str, cell: Cell) -> Result<(), GridError> {
        if !self.contains(cell) {
            return Err(GridError::OutOfBounds {
                what,
                cell,
                width: self.width,
                height: self.height,
            });
        }
        if !self.is_open(cell) {
            return Err(GridError::Blocked { what, cell });
        }
        Ok(())
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Whether `cell` lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.height
            && (cell.col as usize) < self.width
    }

    /// Whether `cell` is in bounds and passable.
    #[inline]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.open[i])
    }

    /// Row-major flat index of `cell`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(cell.row as usize * self.width + cell.col as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn cell(&self, idx: usize) -> Cell {
        Cell::new((idx / self.width) as i32, (idx % self.width) as i32)
    }

    /// Open in-bounds neighbors of `cell`, in fixed order: up, down, left,
    /// right, then (for [`Connectivity::Eight`]) up-left, up-right,
    /// down-left, down-right.
    #[inline]
    pub fn neighbors(&self, cell: Cell, connectivity: Connectivity) -> Neighbors<'_> {
        Neighbors::new(self, cell, connectivity)
    }

    /// Like [`neighbors`](Self::neighbors), paired with the Euclidean step
    /// distance.
    #[inline]
    pub fn weighted_neighbors(
        &self,
        cell: Cell,
        connectivity: Connectivity,
    ) -> WeightedNeighbors<'_> {
        self.neighbors(cell, connectivity).weighted()
    }

    /// Row-major iterator over every cell.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).map(|i| self.cell(i))
    }

    /// Row-major iterator over the open cells.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.open
            .iter()
            .enumerate()
            .filter(|&(_, &o)| o)
            .map(|(i, _)| self.cell(i))
    }
}

fn set_marker(slot: &mut Option<Cell>, what: &'static str, cell: Cell) -> Result<(), GridError> {
    if slot.is_some() {
        return Err(GridError::DuplicateMarker { what, cell });
    }
    *slot = Some(cell);
    Ok(())
}

impl fmt::Display for Grid {
    /// Renders the layout accepted by [`Grid::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width {
                let cell = Cell::new(row as i32, col as i32);
                let ch = if cell == self.start {
                    START
                } else if cell == self.goal {
                    GOAL
                } else if self.is_open(cell) {
                    OPEN
                } else {
                    WALL
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    const RING: &str = "\
S..
.#.
..G";

    #[test]
    fn parse_and_size() {
        let g = Grid::parse(RING).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert_eq!(g.start(), Cell::new(0, 0));
        assert_eq!(g.goal(), Cell::new(2, 2));
        assert!(!g.is_open(Cell::new(1, 1)));
        assert_eq!(g.open_cells().count(), 8);
    }

    #[test]
    fn display_round_trips_layout() {
        let g = Grid::parse(RING).unwrap();
        assert_eq!(g.to_string(), RING);
        assert_eq!(Grid::parse(&g.to_string()).unwrap(), g);
    }

    #[test]
    fn four_neighbors_fixed_order() {
        let g = Grid::parse("...\n.S.\n..G").unwrap();
        let ns: Vec<_> = g.neighbors(Cell::new(1, 1), Connectivity::Four).collect();
        assert_eq!(
            ns,
            vec![
                Cell::new(0, 1),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(1, 2)
            ]
        );
    }

    #[test]
    fn eight_neighbors_append_diagonals() {
        let g = Grid::parse("...\n.S.\n..G").unwrap();
        let ns: Vec<_> = g.neighbors(Cell::new(1, 1), Connectivity::Eight).collect();
        assert_eq!(ns.len(), 8);
        assert_eq!(
            &ns[4..],
            &[
                Cell::new(0, 0),
                Cell::new(0, 2),
                Cell::new(2, 0),
                Cell::new(2, 2)
            ]
        );
    }

    #[test]
    fn neighbors_filter_bounds_and_walls() {
        let g = Grid::parse(RING).unwrap();
        let ns: Vec<_> = g.neighbors(Cell::new(0, 0), Connectivity::Eight).collect();
        // up/left/diagonals are out of bounds, (1, 1) is a wall.
        assert_eq!(ns, vec![Cell::new(1, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn weighted_neighbors_distances() {
        let g = Grid::parse("S..\n...\n..G").unwrap();
        let ws: Vec<_> = g
            .weighted_neighbors(Cell::new(0, 0), Connectivity::Eight)
            .collect();
        assert_eq!(
            ws,
            vec![
                (Cell::new(1, 0), 1.0),
                (Cell::new(0, 1), 1.0),
                (Cell::new(1, 1), SQRT_2)
            ]
        );
    }

    #[test]
    fn index_round_trip() {
        let g = Grid::parse(RING).unwrap();
        for c in g.cells() {
            assert_eq!(g.cell(g.index(c).unwrap()), c);
        }
        assert_eq!(g.index(Cell::new(-1, 0)), None);
        assert_eq!(g.index(Cell::new(0, 3)), None);
    }

    #[test]
    fn rejects_non_rectangular_rows() {
        let err = Grid::parse("S..\n.G").unwrap_err();
        assert_eq!(
            err,
            GridError::NotRectangular {
                row: 1,
                width: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn rejects_bad_markers() {
        assert_eq!(
            Grid::parse("...\n..G").unwrap_err(),
            GridError::MissingMarker("start")
        );
        assert!(matches!(
            Grid::parse("SS.\n..G").unwrap_err(),
            GridError::DuplicateMarker { what: "start", .. }
        ));
        assert!(matches!(
            Grid::parse("S.x\n..G").unwrap_err(),
            GridError::InvalidChar { ch: 'x', .. }
        ));
    }

    #[test]
    fn rejects_invalid_start_goal() {
        let open = vec![true, false, true, true];
        assert!(matches!(
            Grid::new(2, 2, open.clone(), Cell::new(0, 0), Cell::new(5, 0)),
            Err(GridError::OutOfBounds { what: "goal", .. })
        ));
        assert!(matches!(
            Grid::new(2, 2, open.clone(), Cell::new(0, 1), Cell::new(1, 1)),
            Err(GridError::Blocked { what: "start", .. })
        ));
        assert_eq!(
            Grid::new(2, 2, open.clone(), Cell::new(1, 1), Cell::new(1, 1)),
            Err(GridError::StartIsGoal(Cell::new(1, 1)))
        );
        assert!(matches!(
            Grid::new(2, 3, open, Cell::new(0, 0), Cell::new(1, 1)),
            Err(GridError::SizeMismatch { len: 4, expected: 6 })
        ));
        assert!(matches!(
            Grid::new(0, 2, Vec::new(), Cell::new(0, 0), Cell::new(1, 0)),
            Err(GridError::Empty { .. })
        ));
    }

    #[test]
    fn from_rows_matches_parse() {
        let rows = vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ];
        let g = Grid::from_rows(&rows, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
        assert_eq!(g, Grid::parse(RING).unwrap());
    }
}
