use crate::metadata::{MetadataStore, NodeId, NodeMetadata, NodeStatus};
use crate::open_set::{OpenKey, OpenSet};
use crate::traverser::GraphNode;

/// Ordering and relaxation rules that turn the generic engine into a
/// concrete algorithm.
pub trait SearchPolicy {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Combine accumulated and estimated cost into the node's total cost.
    fn total_cost(&self, from_cost: f64, to_cost: f64) -> f64;

    /// Key a node is queued under. Called after `total_cost` is assigned.
    fn open_key<N>(&self, meta: &NodeMetadata<N>) -> OpenKey;

    /// Relax `neighbor`, reached from `current` over an edge of
    /// `step_cost`. The engine has already skipped closed neighbors and
    /// blocked edges.
    ///
    /// The default adopts only nodes never queued before: the first path
    /// found to a node is final.
    fn process_neighbor<N: GraphNode>(
        &self,
        frontier: &mut Frontier<N>,
        current: NodeId,
        neighbor: NodeId,
        step_cost: f64,
    ) where
        Self: Sized,
    {
        frontier.open_new(self, current, neighbor, step_cost);
    }
}

/// The metadata store together with the open set built over it.
#[derive(Debug, Clone)]
pub struct Frontier<N> {
    pub(crate) store: MetadataStore<N>,
    pub(crate) open: OpenSet,
}

impl<N: GraphNode> Frontier<N> {
    pub(crate) fn new() -> Self {
        Self {
            store: MetadataStore::new(),
            open: OpenSet::new(),
        }
    }

    #[inline]
    pub fn store(&self) -> &MetadataStore<N> {
        &self.store
    }

    #[inline]
    pub fn open_set(&self) -> &OpenSet {
        &self.open
    }

    /// Assign the node's total cost under `policy`, mark it open and queue
    /// it.
    pub fn enqueue<P: SearchPolicy>(&mut self, policy: &P, id: NodeId) {
        let meta = &mut self.store[id];
        assert!(meta.queued.is_none(), "{id} is already queued");
        meta.total_cost = policy.total_cost(meta.from_cost, meta.to_cost());
        meta.status = NodeStatus::Open;
        let key = policy.open_key(meta);
        meta.queued = Some(key);
        self.open.insert(key);
    }

    /// Take a node out of the open set, keeping its status. No-op if it is
    /// not queued.
    pub fn dequeue(&mut self, id: NodeId) {
        if let Some(key) = self.store[id].queued.take() {
            self.open.remove(&key);
        }
    }

    pub(crate) fn pop_min(&mut self) -> Option<NodeId> {
        let key = self.open.pop_min()?;
        self.store[key.id].queued = None;
        Some(key.id)
    }

    /// Queue a [`New`](NodeStatus::New) node as a child of `current`.
    /// Returns `false` and does nothing for any other status.
    pub fn open_new<P: SearchPolicy>(
        &mut self,
        policy: &P,
        current: NodeId,
        neighbor: NodeId,
        step_cost: f64,
    ) -> bool {
        if self.store[neighbor].status() != NodeStatus::New {
            return false;
        }
        let from_cost = self.store[current].from_cost + step_cost;
        let meta = &mut self.store[neighbor];
        meta.parent = Some(current);
        meta.from_cost = from_cost;
        self.enqueue(policy, neighbor);
        true
    }

    /// Route an [`Open`](NodeStatus::Open) node through `current` if that
    /// is strictly cheaper, re-sorting it in the open set. Returns whether
    /// the node improved.
    pub fn reroute<P: SearchPolicy>(
        &mut self,
        policy: &P,
        current: NodeId,
        neighbor: NodeId,
        step_cost: f64,
    ) -> bool {
        let candidate = self.store[current].from_cost + step_cost;
        let meta = &self.store[neighbor];
        if meta.status() != NodeStatus::Open || candidate >= meta.from_cost() {
            return false;
        }
        self.dequeue(neighbor);
        let meta = &mut self.store[neighbor];
        meta.parent = Some(current);
        meta.from_cost = candidate;
        self.enqueue(policy, neighbor);
        true
    }

    /// Take every queued node out and queue it again, e.g. after the
    /// policy's weighting changed.
    pub(crate) fn requeue_all<P: SearchPolicy>(&mut self, policy: &P) {
        let ids: Vec<NodeId> = self.open.iter().map(|k| k.id).collect();
        for id in ids {
            self.dequeue(id);
            self.enqueue(policy, id);
        }
    }
}
