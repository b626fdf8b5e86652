//! Solver configuration.

use crate::astar::AStar;
use crate::bfs::BreadthFirst;
use crate::error::SolveResult;
use crate::greedy::Greedy;
use crate::solver::{Outcome, solve};
use crate::traverser::{GraphNode, Traverser};

/// Limits applied to a whole solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolveOptions {
    /// Total number of expansions before the solve gives up with
    /// [`Failure`](crate::SolveState::Failure). `None` means unbounded.
    pub max_ticks: Option<u64>,
}

impl SolveOptions {
    /// Builder: cap the total number of ticks.
    #[must_use]
    pub fn max_ticks(mut self, max: u64) -> Self {
        self.max_ticks = Some(max);
        self
    }
}

/// An algorithm choice described as data, e.g. for batch jobs read from a
/// file.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Algorithm {
    /// A* with the given greed factor.
    AStar { greed: f64 },
    /// Greedy best-first search.
    Greedy,
    /// Breadth-first search over accumulated cost.
    BreadthFirst,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::AStar { greed: 1.0 }
    }
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AStar { .. } => "astar",
            Self::Greedy => "greedy",
            Self::BreadthFirst => "breadth-first",
        }
    }

    /// Run a one-shot solve with the matching policy.
    pub fn solve<N, T>(
        self,
        origin: N,
        destination: N,
        traverser: T,
        options: SolveOptions,
    ) -> SolveResult<Outcome<N>>
    where
        N: GraphNode,
        T: Traverser<N>,
    {
        match self {
            Self::AStar { greed } => {
                solve(origin, destination, AStar::new(greed)?, traverser, options)
            }
            Self::Greedy => solve(origin, destination, Greedy, traverser, options),
            Self::BreadthFirst => solve(origin, destination, BreadthFirst, traverser, options),
        }
    }
}
