use std::f64::consts::SQRT_2;

use crate::geom::Cell;
use crate::grid::Grid;

/// Orthogonal steps in enumeration order: up, down, left, right.
const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal steps, enumerated after the orthogonal ones under
/// [`Connectivity::Eight`].
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Adjacency rule used when enumerating neighbors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Up, down, left, right.
    #[default]
    Four,
    /// The four orthogonal neighbors plus the four diagonals.
    Eight,
}

impl Connectivity {
    /// Number of candidate neighbors per cell.
    #[inline]
    pub(crate) const fn degree(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    #[inline]
    fn delta(self, k: usize) -> Option<(i32, i32)> {
        match k {
            0..4 => Some(ORTHOGONAL[k]),
            4..8 if self == Self::Eight => Some(DIAGONAL[k - 4]),
            _ => None,
        }
    }
}

/// Iterator over the open, in-bounds neighbors of a cell.
///
/// Produced by [`Grid::neighbors`]. The enumeration order is fixed (see
/// [`Connectivity`]), so identical inputs always yield identical sequences.
#[derive(Clone, Debug)]
pub struct Neighbors<'a> {
    grid: &'a Grid,
    origin: Cell,
    connectivity: Connectivity,
    k: usize,
}

impl<'a> Neighbors<'a> {
    pub(crate) fn new(grid: &'a Grid, origin: Cell, connectivity: Connectivity) -> Self {
        Self {
            grid,
            origin,
            connectivity,
            k: 0,
        }
    }

    /// Attach the Euclidean step distance to every neighbor.
    pub fn weighted(self) -> WeightedNeighbors<'a> {
        WeightedNeighbors { inner: self }
    }
}

impl Iterator for Neighbors<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        while let Some((dr, dc)) = self.connectivity.delta(self.k) {
            self.k += 1;
            let n = self.origin.shift(dr, dc);
            if self.grid.is_open(n) {
                return Some(n);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.connectivity.degree().saturating_sub(self.k)))
    }
}

/// Neighbors paired with their step distance: 1.0 orthogonally, √2
/// diagonally.
#[derive(Clone, Debug)]
pub struct WeightedNeighbors<'a> {
    inner: Neighbors<'a>,
}

impl Iterator for WeightedNeighbors<'_> {
    type Item = (Cell, f64);

    fn next(&mut self) -> Option<(Cell, f64)> {
        let n = self.inner.next()?;
        let dist = if n.is_diagonal_to(self.inner.origin) {
            SQRT_2
        } else {
            1.0
        };
        Some((n, dist))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_hint_bounds_remaining_candidates() {
        let grid = Grid::parse("S..\n...\n..G").unwrap();
        let centre = Cell::new(1, 1);
        let mut four = grid.neighbors(centre, Connectivity::Four);
        assert_eq!(four.size_hint(), (0, Some(4)));
        four.next();
        assert_eq!(four.size_hint(), (0, Some(3)));

        let eight = grid.neighbors(centre, Connectivity::Eight).weighted();
        assert_eq!(eight.size_hint(), (0, Some(8)));
        assert_eq!(eight.count(), 8);
    }
}
