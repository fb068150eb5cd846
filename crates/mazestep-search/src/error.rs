use mazestep_core::GridError;
use thiserror::Error;

use crate::state::Status;

/// Misuse of the step contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    /// `step`/`reset`/`run` before a grid was loaded.
    #[error("no grid has been loaded")]
    NotInitialized,
    /// `step` after the search reached its goal or ran out of frontier.
    #[error("search has already finished ({0})")]
    Finished(Status),
}

/// Errors surfaced to callers of the search engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid grid: {0}")]
    Config(#[from] GridError),
    #[error(transparent)]
    InvalidState(#[from] InvalidState),
}
