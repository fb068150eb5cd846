use mazestep_core::{Cell, Grid};

/// Dense membership index over the cells of one grid.
///
/// Backs both the visited set and the frontier set: every query is a flat
/// index lookup, so frontier membership never requires scanning a queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSet {
    width: usize,
    height: usize,
    bits: Vec<bool>,
    len: usize,
}

impl CellSet {
    /// Create an empty set sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            bits: vec![false; grid.len()],
            len: 0,
        }
    }

    #[inline]
    fn idx(&self, cell: Cell) -> Option<usize> {
        if cell.row < 0 || cell.col < 0 {
            return None;
        }
        let (r, c) = (cell.row as usize, cell.col as usize);
        if r >= self.height || c >= self.width {
            return None;
        }
        Some(r * self.width + c)
    }

    /// Add `cell`. Returns `true` if it was not already present.
    ///
    /// Out-of-bounds cells are ignored.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let Some(i) = self.idx(cell) else {
            return false;
        };
        if self.bits[i] {
            return false;
        }
        self.bits[i] = true;
        self.len += 1;
        true
    }

    /// Remove `cell`. Returns `true` if it was present.
    pub fn remove(&mut self, cell: Cell) -> bool {
        match self.idx(cell) {
            Some(i) if self.bits[i] => {
                self.bits[i] = false;
                self.len -= 1;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.idx(cell).is_some_and(|i| self.bits[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Members in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        let w = self.width;
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(move |(i, _)| Cell::new((i / w) as i32, (i % w) as i32))
    }

    /// Whether any cell is in both `self` and `other`.
    pub fn intersects(&self, other: &CellSet) -> bool {
        self.bits.iter().zip(&other.bits).any(|(&a, &b)| a && b)
    }
}
