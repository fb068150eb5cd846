use mazestep_core::{Cell, Grid};

use crate::error::SearchError;
use crate::state::{Snapshot, Status, Step};

/// An incrementally steppable search over a [`Grid`].
///
/// Construction plays the role of `initialize`: a freshly built engine has
/// its container seeded with the start and is ready for [`step`](Self::step).
pub trait Search {
    /// Dequeue and process exactly one entry.
    ///
    /// Fails with [`InvalidState::Finished`](crate::InvalidState::Finished)
    /// once the run is terminal, leaving the state untouched.
    fn step(&mut self) -> Result<Step, SearchError>;

    /// Discard all run state and reseed from the grid's start.
    fn reset(&mut self);

    /// Read-only view for renderers.
    fn snapshot(&self) -> Snapshot<'_>;

    fn status(&self) -> Status;

    fn grid(&self) -> &Grid;

    /// The start→goal path once [`Status::Reached`], else `None`.
    fn solution(&self) -> Option<Vec<Cell>>;

    #[inline]
    fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }
}
