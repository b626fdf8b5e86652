//! Per-node search bookkeeping and the arena that owns it.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::open_set::OpenKey;
use crate::traverser::{GraphNode, Traverser};

/// Stable identifier of a node within one solve.
///
/// Ids are handed out in discovery order starting at zero and double as
/// indices into the [`MetadataStore`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a node stands in the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeStatus {
    /// Discovered but never queued.
    #[default]
    New,
    /// Waiting in the open set.
    Open,
    /// Expanded, or discovered through a non-traversable edge.
    Closed,
}

/// Search state of a single node.
#[derive(Debug, Clone)]
pub struct NodeMetadata<N> {
    node: N,
    id: NodeId,
    pub(crate) from_cost: f64,
    to_cost: f64,
    pub(crate) total_cost: f64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) status: NodeStatus,
    // Key the node was queued with; `Some` exactly while it is open.
    pub(crate) queued: Option<OpenKey>,
}

impl<N> NodeMetadata<N> {
    /// The wrapped node.
    #[inline]
    pub fn node(&self) -> &N {
        &self.node
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Best known accumulated cost from the origin (g).
    #[inline]
    pub fn from_cost(&self) -> f64 {
        self.from_cost
    }

    /// Heuristic estimate to the destination (h), fixed at discovery.
    #[inline]
    pub fn to_cost(&self) -> f64 {
        self.to_cost
    }

    /// Policy-specific combination of `from_cost` and `to_cost` (f).
    #[inline]
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Predecessor on the best known path; `None` for the origin.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn status(&self) -> NodeStatus {
        self.status
    }
}

/// Owns the metadata of every node discovered during one solve.
#[derive(Debug, Clone)]
pub struct MetadataStore<N> {
    nodes: Vec<NodeMetadata<N>>,
    index: FxHashMap<N, NodeId>,
}

impl<N: GraphNode> Default for MetadataStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> MetadataStore<N> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Number of nodes discovered so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up the id of an already discovered node.
    #[inline]
    pub fn id_of(&self, node: &N) -> Option<NodeId> {
        self.index.get(node).copied()
    }

    /// Metadata of an already discovered node.
    pub fn find(&self, node: &N) -> Option<&NodeMetadata<N>> {
        self.id_of(node).map(|id| &self.nodes[id.index()])
    }

    /// Seed the store with the search origin: zero accumulated cost and
    /// no parent.
    pub(crate) fn insert_origin(&mut self, origin: N, to_cost: f64) -> NodeId {
        debug_assert!(self.nodes.is_empty(), "origin must be the first node");
        self.push(origin, to_cost, 0.0, None, NodeStatus::New)
    }

    /// Return the metadata id for `node`, creating it on first sight.
    ///
    /// A new entry is costed through `current`: its accumulated cost is
    /// `current`'s plus the edge cost, and `current` becomes its parent. An
    /// edge with negative cost closes the new node immediately. Existing
    /// entries are returned untouched.
    pub(crate) fn get_or_create<T: Traverser<N>>(
        &mut self,
        node: N,
        current: NodeId,
        traverser: &T,
        destination: &N,
    ) -> NodeId {
        if let Some(id) = self.id_of(&node) {
            return id;
        }
        let parent = &self.nodes[current.index()];
        let step = traverser.real_cost(&parent.node, &node);
        let from_cost = parent.from_cost + step;
        let to_cost = traverser.estimated_cost(&node, destination);
        let status = if step < 0.0 {
            NodeStatus::Closed
        } else {
            NodeStatus::New
        };
        self.push(node, to_cost, from_cost, Some(current), status)
    }

    fn push(
        &mut self,
        node: N,
        to_cost: f64,
        from_cost: f64,
        parent: Option<NodeId>,
        status: NodeStatus,
    ) -> NodeId {
        assert!(self.nodes.len() < u32::MAX as usize, "node id space exhausted");
        let id = NodeId(self.nodes.len() as u32);
        self.index.insert(node.clone(), id);
        self.nodes.push(NodeMetadata {
            node,
            id,
            from_cost,
            to_cost,
            total_cost: from_cost + to_cost,
            parent,
            status,
            queued: None,
        });
        id
    }

    /// Iterate over all metadata in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeMetadata<N>> {
        self.nodes.iter()
    }
}

impl<N> std::ops::Index<NodeId> for MetadataStore<N> {
    type Output = NodeMetadata<N>;

    #[inline]
    fn index(&self, id: NodeId) -> &NodeMetadata<N> {
        &self.nodes[id.index()]
    }
}

impl<N> std::ops::IndexMut<NodeId> for MetadataStore<N> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut NodeMetadata<N> {
        &mut self.nodes[id.index()]
    }
}
