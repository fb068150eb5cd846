use thiserror::Error;

use crate::geom::Cell;

/// Reasons a grid cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height is zero.
    #[error("grid is empty ({width}x{height})")]
    Empty { width: usize, height: usize },

    /// The occupancy buffer does not match `width * height`.
    #[error("occupancy holds {len} cells, expected {expected}")]
    SizeMismatch { len: usize, expected: usize },

    /// A row is not as wide as the first row.
    #[error("row {row} has width {width}, expected {expected}")]
    NotRectangular {
        row: usize,
        width: usize,
        expected: usize,
    },

    /// The start or goal lies outside the grid.
    #[error("{what} {cell} is outside the {width}x{height} grid")]
    OutOfBounds {
        what: &'static str,
        cell: Cell,
        width: usize,
        height: usize,
    },

    /// The start or goal lies on a wall.
    #[error("{what} {cell} is not an open cell")]
    Blocked { what: &'static str, cell: Cell },

    /// Start and goal are the same cell.
    #[error("start and goal are both {0}")]
    StartIsGoal(Cell),

    /// A text layout has no start or no goal marker.
    #[error("layout has no {0} marker")]
    MissingMarker(&'static str),

    /// A text layout has more than one start or goal marker.
    #[error("layout has a second {what} marker at {cell}")]
    DuplicateMarker { what: &'static str, cell: Cell },

    /// A text layout contains a character outside the allowed set.
    #[error("invalid character \u{201c}{ch}\u{201d} at {cell}")]
    InvalidChar { ch: char, cell: Cell },
}
