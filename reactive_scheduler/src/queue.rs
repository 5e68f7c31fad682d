// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single phase's dirty queue: priority-index buckets, a dedup heap, and per-node events.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use reactive_graph::NodeId;

use crate::heap::IndexHeap;

/// One phase's accumulated dirty state between drains.
///
/// `present` stands in for the word-packed per-node dirty bitmask the design notes describe: a
/// node is a member of at most one bucket at a time within this queue, checked and cleared in
/// `O(1)`. Using a set rather than a bit per node avoids committing to a maximum phase count at
/// compile time, which a real bitmask would require.
pub struct DirtyQueue<E> {
    buckets: HashMap<i64, Vec<NodeId>>,
    heap: IndexHeap,
    present: HashSet<NodeId>,
    events: HashMap<NodeId, Vec<E>>,
}

impl<E> Default for DirtyQueue<E> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
            heap: IndexHeap::new(),
            present: HashSet::new(),
            events: HashMap::new(),
        }
    }
}

impl<E> DirtyQueue<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Marks `node` dirty at `priority`, appending `event` to its per-tick event list regardless
    /// of whether the node was already dirty this phase. Returns `false` if the node was already
    /// dirty (the phase bit was already set) — no new bucket/heap entry is created in that case.
    pub fn mark(&mut self, node: NodeId, priority: i64, event: Option<E>) -> bool {
        if let Some(event) = event {
            self.events.entry(node).or_default().push(event);
        }
        if !self.present.insert(node) {
            return false;
        }
        self.buckets.entry(priority).or_default().push(node);
        self.heap.push(priority);
        true
    }

    /// Removes and returns the lowest-priority non-empty bucket, if any.
    pub fn pop_bucket(&mut self) -> Option<(i64, Vec<NodeId>)> {
        let index = self.heap.pop_min()?;
        let nodes = self.buckets.remove(&index).unwrap_or_default();
        Some((index, nodes))
    }

    /// Clears the phase bit for `node`, allowing it to be marked dirty again.
    pub fn clear_node(&mut self, node: NodeId) {
        self.present.remove(&node);
    }

    /// Takes (and clears) `node`'s accumulated events for this phase.
    pub fn take_events(&mut self, node: NodeId) -> Vec<E> {
        self.events.remove(&node).unwrap_or_default()
    }

    /// Drains every bucket in ascending priority order, without invoking any executor — used by
    /// `all`-phase draining, which needs the whole snapshot before a single batched call.
    pub fn drain_all_sorted(&mut self) -> Vec<(i64, Vec<NodeId>)> {
        let mut out = Vec::new();
        while let Some(bucket) = self.pop_bucket() {
            out.push(bucket);
        }
        out
    }

    /// Clears every remaining phase bit and drops any leftover event lists. Called after an
    /// `all`-phase batch, and defensively after an `each`-phase drain completes.
    pub fn clear_all(&mut self) {
        self.present.clear();
        self.events.clear();
        self.heap.clear();
        self.buckets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_mark_dedups_but_keeps_recording_events() {
        let mut q: DirtyQueue<&'static str> = DirtyQueue::new();
        let n = NodeId::new(1);
        assert!(q.mark(n, 0, Some("first")));
        assert!(!q.mark(n, 0, Some("second")));
        assert_eq!(q.take_events(n), alloc::vec!["first", "second"]);
    }

    #[test]
    fn buckets_drain_in_ascending_priority_order() {
        let mut q: DirtyQueue<()> = DirtyQueue::new();
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        let c = NodeId::new(3);
        q.mark(a, 10, None);
        q.mark(b, 0, None);
        q.mark(c, 5, None);
        let order: Vec<_> = core::iter::from_fn(|| q.pop_bucket())
            .map(|(_, nodes)| nodes)
            .collect();
        assert_eq!(order, alloc::vec![alloc::vec![b], alloc::vec![c], alloc::vec![a]]);
    }

    #[test]
    fn clearing_a_node_allows_it_to_be_marked_again() {
        let mut q: DirtyQueue<()> = DirtyQueue::new();
        let n = NodeId::new(1);
        q.mark(n, 0, None);
        assert!(!q.mark(n, 0, None));
        q.clear_node(n);
        assert!(q.mark(n, 0, None));
    }

    #[test]
    fn insertion_order_preserved_within_a_bucket() {
        let mut q: DirtyQueue<()> = DirtyQueue::new();
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        q.mark(a, 0, None);
        q.mark(b, 0, None);
        let (_, nodes) = q.pop_bucket().unwrap();
        assert_eq!(nodes, alloc::vec![a, b]);
    }
}
