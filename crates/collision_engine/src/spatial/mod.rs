//! Spatial partitioning data structures
//!
//! Provides the broad-phase index used to prune collision candidates
//! before the exact SAT test.

mod uniform_grid;

pub use uniform_grid::{validate_dimensions, CellSpan, GridError, UniformGrid};
