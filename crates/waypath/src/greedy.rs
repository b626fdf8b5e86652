use crate::error::SolveResult;
use crate::metadata::NodeMetadata;
use crate::open_set::OpenKey;
use crate::policy::SearchPolicy;
use crate::solver::Solver;
use crate::traverser::{GraphNode, Traverser};

/// Greedy best-first search: always expands the node that looks closest
/// to the destination, breaking ties on accumulated cost.
///
/// Fast on open terrain but blind to cost, so the path it returns can be
/// far from optimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Greedy;

impl Greedy {
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

impl SearchPolicy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    #[inline]
    fn total_cost(&self, _from_cost: f64, to_cost: f64) -> f64 {
        to_cost
    }

    #[inline]
    fn open_key<N>(&self, meta: &NodeMetadata<N>) -> OpenKey {
        OpenKey::new(meta.to_cost(), meta.from_cost(), meta.id())
    }
}

impl<N, T> Solver<N, T, Greedy>
where
    N: GraphNode,
    T: Traverser<N>,
{
    /// Build a greedy best-first solver.
    pub fn greedy(origin: N, destination: N, traverser: T) -> SolveResult<Self> {
        Self::new(origin, destination, Greedy, traverser)
    }
}
