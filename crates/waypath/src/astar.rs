use crate::error::{SolveError, SolveResult};
use crate::metadata::{NodeId, NodeMetadata, NodeStatus};
use crate::open_set::OpenKey;
use crate::policy::{Frontier, SearchPolicy};
use crate::solver::{SolveState, Solver};
use crate::traverser::{GraphNode, Traverser};

/// A* search with a tunable weight on the heuristic.
///
/// Nodes are ordered by `from + to * greed`, then by the estimate alone.
/// A greed factor of 0 ignores the heuristic (Dijkstra), 1 is classic A*,
/// and larger values trade path quality for fewer expansions.
///
/// Unlike the other policies, A* re-routes nodes that are still open when
/// a cheaper way to them turns up. Closed nodes are never reopened, so
/// optimality relies on a consistent heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AStar {
    greed: f64,
}

impl Default for AStar {
    fn default() -> Self {
        Self { greed: 1.0 }
    }
}

impl AStar {
    /// Create an A* policy. `greed` must be finite and non-negative.
    pub fn new(greed: f64) -> SolveResult<Self> {
        check_greed(greed)?;
        Ok(Self { greed })
    }

    #[inline]
    pub fn greed_factor(&self) -> f64 {
        self.greed
    }

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

fn check_greed(greed: f64) -> SolveResult<()> {
    if greed.is_finite() && greed >= 0.0 {
        Ok(())
    } else {
        Err(SolveError::InvalidGreedFactor(greed))
    }
}

impl SearchPolicy for AStar {
    fn name(&self) -> &'static str {
        "astar"
    }

    #[inline]
    fn total_cost(&self, from_cost: f64, to_cost: f64) -> f64 {
        from_cost + to_cost * self.greed
    }

    #[inline]
    fn open_key<N>(&self, meta: &NodeMetadata<N>) -> OpenKey {
        OpenKey::new(meta.total_cost(), meta.to_cost(), meta.id())
    }

    fn process_neighbor<N: GraphNode>(
        &self,
        frontier: &mut Frontier<N>,
        current: NodeId,
        neighbor: NodeId,
        step_cost: f64,
    ) {
        match frontier.store()[neighbor].status() {
            NodeStatus::New => {
                frontier.open_new(self, current, neighbor, step_cost);
            }
            NodeStatus::Open => {
                frontier.reroute(self, current, neighbor, step_cost);
            }
            NodeStatus::Closed => {}
        }
    }
}

impl<N, T> Solver<N, T, AStar>
where
    N: GraphNode,
    T: Traverser<N>,
{
    /// Build an A* solver.
    pub fn astar(origin: N, destination: N, greed: f64, traverser: T) -> SolveResult<Self> {
        Self::new(origin, destination, AStar::new(greed)?, traverser)
    }

    #[inline]
    pub fn greed_factor(&self) -> f64 {
        self.policy().greed_factor()
    }

    /// Change the greed factor. Only allowed before the first tick.
    pub fn set_greed_factor(&mut self, greed: f64) -> SolveResult<()> {
        check_greed(greed)?;
        if self.ticks() > 0 || self.state() != SolveState::Waiting {
            return Err(SolveError::AlreadyStarted {
                ticks: self.ticks(),
            });
        }
        self.policy_mut().greed = greed;
        self.requeue_open();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TraverseError;

    /// Nodes 0..=4 on a line; every step costs 1 and the estimate is the
    /// distance to the destination doubled.
    struct Ruler;

    impl Traverser<i32> for Ruler {
        fn estimated_cost(&self, from: &i32, to: &i32) -> f64 {
            f64::from((to - from).abs() * 2)
        }

        fn real_cost(&self, _: &i32, _: &i32) -> f64 {
            1.0
        }

        fn traversable_nodes(&self, from: &i32, buf: &mut Vec<i32>) -> Result<(), TraverseError> {
            buf.extend([from - 1, from + 1].into_iter().filter(|n| (0..=4).contains(n)));
            Ok(())
        }
    }

    #[test]
    fn greed_is_validated() {
        assert!(AStar::new(0.0).is_ok());
        assert!(AStar::new(8.0).is_ok());
        for bad in [-0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(AStar::new(bad), Err(SolveError::InvalidGreedFactor(_))));
        }
    }

    #[test]
    fn total_cost_weights_heuristic() {
        let a = AStar::new(2.0).unwrap();
        assert_eq!(a.total_cost(3.0, 4.0), 11.0);
        assert_eq!(AStar::new(0.0).unwrap().total_cost(3.0, 4.0), 3.0);
    }

    #[test]
    fn solver_shorthand_keeps_greed() {
        let mut s = AStar::new(2.0).unwrap().solver(4, 0, Ruler).unwrap();
        assert_eq!(s.greed_factor(), 2.0);
        assert_eq!(s.run().unwrap(), SolveState::Success);
        assert_eq!(s.path_cost(), Some(4.0));
    }

    #[test]
    fn set_greed_before_start_rekeys_origin() {
        let mut s = Solver::astar(0, 4, 1.0, Ruler).unwrap();
        assert_eq!(s.metadata(&0).map(|m| m.total_cost()), Some(8.0));
        s.set_greed_factor(0.5).unwrap();
        assert_eq!(s.greed_factor(), 0.5);
        assert_eq!(s.metadata(&0).map(|m| m.total_cost()), Some(4.0));
        assert_eq!(s.open_count(), 1);
        assert_eq!(s.run().unwrap(), SolveState::Success);
        assert_eq!(s.path(), Some(&[0, 1, 2, 3, 4][..]));
    }

    #[test]
    fn set_greed_after_start_is_refused() {
        let mut s = Solver::astar(0, 4, 1.0, Ruler).unwrap();
        s.start(Some(1)).unwrap();
        assert!(matches!(
            s.set_greed_factor(2.0),
            Err(SolveError::AlreadyStarted { ticks: 1 })
        ));
        assert!(matches!(
            s.set_greed_factor(-2.0),
            Err(SolveError::InvalidGreedFactor(_))
        ));
        assert_eq!(s.greed_factor(), 1.0);
    }
}
