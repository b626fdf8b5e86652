use std::hash::Hash;

use crate::error::TraverseError;

/// A value usable as a search node: cloned into the metadata store and
/// looked up by equality.
pub trait GraphNode: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> GraphNode for T {}

/// Adjacency and cost provider for a node type.
///
/// A traverser lets callers search over node types they do not own, or
/// search the same nodes under different movement rules.
pub trait Traverser<N> {
    /// Heuristic estimate of the cost from `from` to `to`. Must not
    /// overestimate the true cost for A* to stay optimal.
    fn estimated_cost(&self, from: &N, to: &N) -> f64;

    /// Cost of the edge from `from` to its neighbor `to`. A negative value
    /// means the edge cannot be traversed.
    fn real_cost(&self, from: &N, to: &N) -> f64;

    /// Append the neighbors of `from` into `buf`. The caller clears `buf`
    /// before calling.
    fn traversable_nodes(&self, from: &N, buf: &mut Vec<N>) -> Result<(), TraverseError>;

    /// Whether `node` belongs to the traversed graph. Checked for the
    /// origin and destination when a solver is built.
    fn contains(&self, _node: &N) -> bool {
        true
    }
}

impl<N, T: Traverser<N> + ?Sized> Traverser<N> for &T {
    fn estimated_cost(&self, from: &N, to: &N) -> f64 {
        (**self).estimated_cost(from, to)
    }

    fn real_cost(&self, from: &N, to: &N) -> f64 {
        (**self).real_cost(from, to)
    }

    fn traversable_nodes(&self, from: &N, buf: &mut Vec<N>) -> Result<(), TraverseError> {
        (**self).traversable_nodes(from, buf)
    }

    fn contains(&self, node: &N) -> bool {
        (**self).contains(node)
    }
}

/// A node type that knows its own costs and neighbors.
pub trait SelfTraversable: GraphNode {
    /// Heuristic estimate of the cost from `self` to `to`.
    fn estimated_cost(&self, to: &Self) -> f64;

    /// Cost of moving from `self` to the neighbor `to`; negative if blocked.
    fn real_cost(&self, to: &Self) -> f64;

    /// Append the neighbors of `self` into `buf`.
    fn traversable_nodes(&self, buf: &mut Vec<Self>) -> Result<(), TraverseError>;
}

/// The default traverser: forwards every query to the node itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeTraverser;

impl<N: SelfTraversable> Traverser<N> for NodeTraverser {
    #[inline]
    fn estimated_cost(&self, from: &N, to: &N) -> f64 {
        from.estimated_cost(to)
    }

    #[inline]
    fn real_cost(&self, from: &N, to: &N) -> f64 {
        from.real_cost(to)
    }

    #[inline]
    fn traversable_nodes(&self, from: &N, buf: &mut Vec<N>) -> Result<(), TraverseError> {
        from.traversable_nodes(buf)
    }
}
