//! Running many independent solves in parallel.

use rayon::prelude::*;

use crate::error::SolveResult;
use crate::options::{Algorithm, SolveOptions};
use crate::solver::Outcome;
use crate::traverser::{GraphNode, Traverser};

/// One origin/destination query with its algorithm and limits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job<N> {
    pub origin: N,
    pub destination: N,
    #[cfg_attr(feature = "serde", serde(default))]
    pub algorithm: Algorithm,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: SolveOptions,
}

impl<N> Job<N> {
    /// A job using A* with greed 1 and no tick limit.
    pub fn new(origin: N, destination: N) -> Self {
        Self {
            origin,
            destination,
            algorithm: Algorithm::default(),
            options: SolveOptions::default(),
        }
    }

    #[must_use]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn options(mut self, options: SolveOptions) -> Self {
        self.options = options;
        self
    }
}

/// Solve every job against the same traverser, one solver per job, spread
/// over the rayon thread pool. Results come back in job order.
pub fn solve_all<N, T>(jobs: &[Job<N>], traverser: &T) -> Vec<SolveResult<Outcome<N>>>
where
    N: GraphNode + Send + Sync,
    T: Traverser<N> + Sync,
{
    log::debug!("solving {} independent job(s)", jobs.len());
    jobs.par_iter()
        .map(|job| {
            job.algorithm.solve(
                job.origin.clone(),
                job.destination.clone(),
                traverser,
                job.options,
            )
        })
        .collect()
}
