//! Searching a [`CostGrid`] with the waypath solvers.

use std::hash::{Hash, Hasher};

use waypath::{SelfTraversable, TraverseError, Traverser};

use crate::grid::CostGrid;
use crate::point::{Point, chebyshev, manhattan};

/// Which moves are allowed between cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Adjacency {
    /// Four moves, estimated with Manhattan distance.
    Cardinal,
    /// Eight moves, estimated with Chebyshev distance.
    #[default]
    Diagonal,
}

impl Adjacency {
    #[inline]
    fn distance(self, a: Point, b: Point) -> f64 {
        f64::from(match self {
            Self::Cardinal => manhattan(a, b),
            Self::Diagonal => chebyshev(a, b),
        })
    }

    #[inline]
    fn extend(self, p: Point, grid: &CostGrid, buf: &mut Vec<Point>) {
        match self {
            Self::Cardinal => buf.extend(p.neighbors_4().into_iter().filter(|&n| grid.contains(n))),
            Self::Diagonal => buf.extend(p.neighbors_8().into_iter().filter(|&n| grid.contains(n))),
        }
    }
}

/// Cost of stepping into `to`: the cell's cost, or -1 for walls and
/// cells off the grid.
#[inline]
fn step_cost(grid: &CostGrid, to: Point) -> f64 {
    match grid.cost(to) {
        Some(c) if c > 0 => f64::from(c),
        _ => -1.0,
    }
}

/// A [`Traverser`] over the cells of a [`CostGrid`].
///
/// Every in-bounds neighbor is reported, walls included; walls are then
/// refused through a negative [`real_cost`](Traverser::real_cost).
/// Neighbors come clockwise starting from the cell above.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridTraverser {
    grid: CostGrid,
    #[cfg_attr(feature = "serde", serde(default))]
    adjacency: Adjacency,
}

impl GridTraverser {
    /// An 8-connected traverser.
    pub fn new(grid: CostGrid) -> Self {
        Self::with_adjacency(grid, Adjacency::Diagonal)
    }

    pub fn with_adjacency(grid: CostGrid, adjacency: Adjacency) -> Self {
        Self { grid, adjacency }
    }

    #[inline]
    pub fn grid(&self) -> &CostGrid {
        &self.grid
    }

    /// Mutable access, for editing costs between solves.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut CostGrid {
        &mut self.grid
    }

    #[inline]
    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }
}

impl Traverser<Point> for GridTraverser {
    #[inline]
    fn estimated_cost(&self, from: &Point, to: &Point) -> f64 {
        self.adjacency.distance(*from, *to)
    }

    #[inline]
    fn real_cost(&self, _from: &Point, to: &Point) -> f64 {
        step_cost(&self.grid, *to)
    }

    fn traversable_nodes(&self, from: &Point, buf: &mut Vec<Point>) -> Result<(), TraverseError> {
        self.adjacency.extend(*from, &self.grid, buf);
        Ok(())
    }

    fn contains(&self, node: &Point) -> bool {
        self.grid.contains(*node)
    }
}

/// A grid cell that carries its grid along, for use with
/// [`Solver::for_nodes`](waypath::Solver::for_nodes).
///
/// Two nodes are equal when their positions are; the grid is not
/// compared.
#[derive(Debug, Clone, Copy)]
pub struct GridNode<'a> {
    grid: &'a CostGrid,
    pos: Point,
    adjacency: Adjacency,
}

impl<'a> GridNode<'a> {
    /// An 8-connected node at `pos`.
    pub fn new(grid: &'a CostGrid, pos: Point) -> Self {
        Self {
            grid,
            pos,
            adjacency: Adjacency::Diagonal,
        }
    }

    #[must_use]
    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
        self.adjacency = adjacency;
        self
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    fn at(&self, pos: Point) -> Self {
        Self { pos, ..*self }
    }
}

impl PartialEq for GridNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for GridNode<'_> {}

impl Hash for GridNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl SelfTraversable for GridNode<'_> {
    fn estimated_cost(&self, to: &Self) -> f64 {
        self.adjacency.distance(self.pos, to.pos)
    }

    fn real_cost(&self, to: &Self) -> f64 {
        step_cost(self.grid, to.pos)
    }

    fn traversable_nodes(&self, buf: &mut Vec<Self>) -> Result<(), TraverseError> {
        match self.adjacency {
            Adjacency::Cardinal => buf.extend(
                self.pos
                    .neighbors_4()
                    .into_iter()
                    .filter(|&n| self.grid.contains(n))
                    .map(|n| self.at(n)),
            ),
            Adjacency::Diagonal => buf.extend(
                self.pos
                    .neighbors_8()
                    .into_iter()
                    .filter(|&n| self.grid.contains(n))
                    .map(|n| self.at(n)),
            ),
        }
        Ok(())
    }
}
