use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::metadata::NodeId;

/// Sort key of a queued node.
///
/// Ordered by `primary`, then `secondary` (both ascending, compared with
/// [`f64::total_cmp`]), then by `id` **descending**, so the most recently
/// discovered node wins a cost tie. Ids are unique within a solve, which
/// makes this a strict total order: two distinct nodes never collide.
#[derive(Debug, Clone, Copy)]
pub struct OpenKey {
    pub primary: f64,
    pub secondary: f64,
    pub id: NodeId,
}

impl OpenKey {
    #[inline]
    pub fn new(primary: f64, secondary: f64, id: NodeId) -> Self {
        Self {
            primary,
            secondary,
            id,
        }
    }
}

impl Ord for OpenKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OpenKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenKey {}

/// Ordered set of nodes awaiting expansion.
///
/// Keys must not change while queued: callers remove an entry, update the
/// node, then insert it again under its new key.
#[derive(Debug, Clone, Default)]
pub struct OpenSet {
    keys: BTreeSet<OpenKey>,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a key.
    ///
    /// # Panics
    ///
    /// If an equal key is already queued.
    pub fn insert(&mut self, key: OpenKey) {
        let inserted = self.keys.insert(key);
        assert!(inserted, "open set already holds {}", key.id);
    }

    /// Remove a queued key.
    ///
    /// # Panics
    ///
    /// If the key is not queued.
    pub fn remove(&mut self, key: &OpenKey) {
        let removed = self.keys.remove(key);
        assert!(removed, "open set does not hold {}", key.id);
    }

    /// Remove and return the least key.
    #[inline]
    pub fn pop_min(&mut self) -> Option<OpenKey> {
        self.keys.pop_first()
    }

    /// The least key, without removing it.
    #[inline]
    pub fn peek_min(&self) -> Option<&OpenKey> {
        self.keys.first()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Queued keys in pop order.
    pub fn iter(&self) -> impl Iterator<Item = &OpenKey> {
        self.keys.iter()
    }
}
