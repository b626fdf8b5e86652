use crate::error::SolveResult;
use crate::metadata::NodeMetadata;
use crate::open_set::OpenKey;
use crate::policy::SearchPolicy;
use crate::solver::Solver;
use crate::traverser::{GraphNode, Traverser};

/// Breadth-first search over accumulated cost.
///
/// Expands nodes in order of their cost from the origin and ignores the
/// heuristic. The first path found to a node is kept, so on weighted
/// graphs the result is not guaranteed to be the cheapest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreadthFirst;

impl BreadthFirst {
    /// A solver using this policy.
    pub fn solver<N: GraphNode, T: Traverser<N>>(
        self,
        origin: N,
        destination: N,
        traverser: T,
    ) -> SolveResult<Solver<N, T, Self>> {
        Solver::new(origin, destination, self, traverser)
    }
}

impl SearchPolicy for BreadthFirst {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    #[inline]
    fn total_cost(&self, from_cost: f64, _to_cost: f64) -> f64 {
        from_cost
    }

    #[inline]
    fn open_key<N>(&self, meta: &NodeMetadata<N>) -> OpenKey {
        OpenKey::new(meta.from_cost(), 0.0, meta.id())
    }
}

impl<N, T> Solver<N, T, BreadthFirst>
where
    N: GraphNode,
    T: Traverser<N>,
{
    /// Build a breadth-first solver.
    pub fn breadth_first(origin: N, destination: N, traverser: T) -> SolveResult<Self> {
        Self::new(origin, destination, BreadthFirst, traverser)
    }
}
