//! Error types for solver construction and execution.
//!
//! Search failure (no path, tick limit) is not an error: it is reported
//! through [`SolveState::Failure`]. The variants here are precondition
//! violations that abort a solve.

use std::fmt;

use thiserror::Error;

use crate::solver::SolveState;

/// Result alias used throughout the crate.
pub type SolveResult<T> = Result<T, SolveError>;

/// Which end of a search an [`SolveError::UnknownEndpoint`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => f.write_str("origin"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Fatal errors raised by a solver.
#[derive(Debug, Error)]
pub enum SolveError {
    /// `start` was called on a solver that is running or already finished.
    #[error("solver is {0}, only a waiting solver can be started")]
    NotWaiting(SolveState),

    /// The greed factor was negative or not a finite number.
    #[error("greed factor must be finite and non-negative, got {0}")]
    InvalidGreedFactor(f64),

    /// The greed factor can only change before the first tick.
    #[error("greed factor cannot change after {ticks} tick(s)")]
    AlreadyStarted { ticks: u64 },

    /// The traverser does not know the origin or destination.
    #[error("{0} is not part of the traversed graph")]
    UnknownEndpoint(Endpoint),

    /// Neighbor enumeration failed during a tick.
    #[error(transparent)]
    Traverse(#[from] TraverseError),
}

/// Errors a [`Traverser`](crate::Traverser) may report while enumerating
/// neighbors.
#[derive(Debug, Error)]
pub enum TraverseError {
    /// An edge points at a node that does not exist.
    #[error("neighbor enumeration yielded a missing node")]
    MissingNeighbor,

    /// Any other failure raised by the traverser.
    #[error("neighbor enumeration failed: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TraverseError {
    /// Wrap an arbitrary error raised by a traverser.
    pub fn other<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Other(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = SolveError::NotWaiting(SolveState::Success);
        assert_eq!(
            e.to_string(),
            "solver is success, only a waiting solver can be started"
        );
        let e = SolveError::UnknownEndpoint(Endpoint::Destination);
        assert_eq!(e.to_string(), "destination is not part of the traversed graph");
        let e: SolveError = TraverseError::other("boom").into();
        assert_eq!(e.to_string(), "neighbor enumeration failed: boom");
    }
}
