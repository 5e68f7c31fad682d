// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable traversal buffers, so cycle checks, depth cascades, and `expand_by_traversal` don't
//! allocate a fresh queue/visited-set on every call.

use alloc::collections::VecDeque;

use hashbrown::HashSet;

use crate::NodeId;

/// Scratch space reused across [`crate::Graph`] traversals.
///
/// Every user of these buffers clears them at the start of its own call and leaves them empty
/// when it returns, so callers never observe partial state from a previous traversal.
#[derive(Default)]
pub(crate) struct Scratch {
    pub(crate) queue: VecDeque<NodeId>,
    pub(crate) seen: HashSet<NodeId>,
}

impl Scratch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self) {
        self.queue.clear();
        self.seen.clear();
    }
}
