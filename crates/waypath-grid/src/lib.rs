//! Weighted 2D grids for the [`waypath`] solvers.
//!
//! A [`CostGrid`] stores the cost of entering each cell, with 0 for walls,
//! and can be parsed from a compact text form:
//!
//! ```text
//! 1219
//! 1#92
//! 1131
//! ```
//!
//! Search it with [`GridTraverser`] (nodes are plain [`Point`]s) or with
//! [`GridNode`], which carries a reference to its grid and needs no
//! traverser.

mod grid;
mod point;
mod traverse;

#[cfg(test)]
mod fixture;

pub use grid::{CostGrid, ParseError};
pub use point::{Point, chebyshev, manhattan};
pub use traverse::{Adjacency, GridNode, GridTraverser};
