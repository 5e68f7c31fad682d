// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scheduler: an ordered set of phase dirty-queues, a deferral policy, and the `max_ups`
//! throttle. Draining a phase's queue (deciding between `each`/`all` executor contracts) is
//! `reactive_phase`'s job; this crate owns the bucketing, priority ordering, and when-to-drain
//! bookkeeping that the phase runner drives.

use alloc::vec::Vec;

use hashbrown::HashMap;
use reactive_graph::NodeId;

use crate::clock::Clock;
use crate::policy::{SchedulerPolicy, Throttle};
use crate::queue::DirtyQueue;

/// Identifies one declared phase, in the order phases were declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhaseId(u32);

impl PhaseId {
    /// Wraps a raw phase id. Host code typically keeps its own `name -> PhaseId` table.
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Result of a `dirty(phase, node, ...)` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The phase has not been declared; the caller should log a warning and move on. An unknown
    /// phase is never a hard error.
    UnknownPhase,
    /// The phase accepted the mark. `inserted` is `false` when the node was already dirty this
    /// phase (its event was still recorded).
    Marked { inserted: bool },
}

/// Owns every phase's dirty queue plus the policy/throttle deciding when a pending drain fires.
pub struct Scheduler<E> {
    order: Vec<PhaseId>,
    queues: HashMap<PhaseId, DirtyQueue<E>>,
    policy: SchedulerPolicy,
    throttle: Throttle,
    pending_drain: bool,
    loop_mode: bool,
}

impl<E> Scheduler<E> {
    #[must_use]
    pub fn new(policy: SchedulerPolicy, max_ups: u32) -> Self {
        Self {
            order: Vec::new(),
            queues: HashMap::new(),
            policy,
            throttle: Throttle::new(max_ups),
            pending_drain: false,
            loop_mode: false,
        }
    }

    /// Declares `phase`, placing it at the end of drain order if not already declared. Idempotent.
    pub fn declare_phase(&mut self, phase: PhaseId) {
        self.queues.entry(phase).or_insert_with(|| {
            self.order.push(phase);
            DirtyQueue::new()
        });
    }

    #[must_use]
    pub fn phases_in_order(&self) -> &[PhaseId] {
        &self.order
    }

    pub fn queue_mut(&mut self, phase: PhaseId) -> Option<&mut DirtyQueue<E>> {
        self.queues.get_mut(&phase)
    }

    #[must_use]
    pub fn queue(&self, phase: PhaseId) -> Option<&DirtyQueue<E>> {
        self.queues.get(&phase)
    }

    /// Implements `dirty(phase, node, {invalidate, event})` (steps 1, 3-7; the phase's own node
    /// filter, step 2, is applied by the caller before this is reached, since the filter is a
    /// phase-definition concern owned by `reactive_phase`).
    pub fn mark(
        &mut self,
        phase: PhaseId,
        node: NodeId,
        priority: i64,
        event: Option<E>,
        invalidate: bool,
    ) -> MarkOutcome {
        let Some(queue) = self.queues.get_mut(&phase) else {
            return MarkOutcome::UnknownPhase;
        };
        let inserted = queue.mark(node, priority, event);
        if invalidate {
            self.pending_drain = true;
        }
        MarkOutcome::Marked { inserted }
    }

    #[must_use]
    pub fn policy(&self) -> SchedulerPolicy {
        self.policy
    }

    pub fn set_loop_mode(&mut self, enabled: bool) {
        self.loop_mode = enabled;
    }

    #[must_use]
    pub fn loop_mode(&self) -> bool {
        self.loop_mode
    }

    /// Requests a drain without marking any node dirty — used by "loop" mode's per-tick
    /// `invalidate`, and by hosts that want to force a drain (e.g. flushing before teardown).
    pub fn request_drain(&mut self) {
        self.pending_drain = true;
    }

    #[must_use]
    pub fn has_pending_drain(&self) -> bool {
        self.pending_drain
    }

    /// Whether every phase's queue is currently empty.
    #[must_use]
    pub fn all_queues_empty(&self) -> bool {
        self.queues.values().all(DirtyQueue::is_empty)
    }

    /// Consults the throttle and, if a drain is due, clears the pending flag and records the
    /// drain time. Returns whether the caller should run a drain now.
    pub fn should_drain_now(&mut self, clock: &impl Clock) -> bool {
        if !self.pending_drain || !self.throttle.allows_now(clock) {
            return false;
        }
        self.pending_drain = false;
        self.throttle.record_drain(clock.now_ms());
        true
    }
}
