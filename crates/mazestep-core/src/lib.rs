//! Grid types for step-observable maze search.
//!
//! This crate provides the immutable inputs shared by every search engine in
//! the *mazestep* workspace: the [`Cell`] coordinate, the occupancy
//! [`Grid`] with its start and goal, and neighbor enumeration under
//! [`Connectivity::Four`] or [`Connectivity::Eight`].

pub mod error;
pub mod geom;
pub mod grid;
pub mod neighbors;

pub use error::GridError;
pub use geom::Cell;
pub use grid::Grid;
pub use neighbors::{Connectivity, Neighbors, WeightedNeighbors};
