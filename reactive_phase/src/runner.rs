// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives a [`PhaseTable`]'s phases over a [`Scheduler`], invoking each phase's executor.

use alloc::vec::Vec;

use reactive_graph::NodeId;
use reactive_scheduler::{MarkOutcome, PhaseId, Scheduler, SchedulerPolicy};

use crate::dispatch::{Dispatcher, InlineDispatcher};
use crate::event::PhaseEvent;
use crate::executor::{EachCtx, Executor};
use crate::table::PhaseTable;

/// Ties a [`PhaseTable`] to a [`Scheduler`] and drains phases in declared order on `run`.
pub struct PhaseRunner {
    table: PhaseTable,
    scheduler: Scheduler<PhaseEvent>,
    dispatcher: InlineDispatcher,
}

impl PhaseRunner {
    #[must_use]
    pub fn new(policy: SchedulerPolicy, max_ups: u32) -> Self {
        Self {
            table: PhaseTable::empty(),
            scheduler: Scheduler::new(policy, max_ups),
            dispatcher: InlineDispatcher,
        }
    }

    /// Installs `table` and declares a scheduler queue for every phase it contains, in order.
    pub fn install_table(&mut self, table: PhaseTable) {
        for phase in table.phases_in_order() {
            self.scheduler.declare_phase(phase.id);
        }
        self.table = table;
    }

    #[must_use]
    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler<PhaseEvent> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler<PhaseEvent> {
        &mut self.scheduler
    }

    /// Implements `dirty(phase, node, {invalidate, event})`: applies the phase's node filter
    /// (step 2) before handing off to the scheduler (steps 1, 3-7). An unfiltered-out node that
    /// targets an unknown phase still reports [`MarkOutcome::UnknownPhase`].
    pub fn mark(
        &mut self,
        phase: PhaseId,
        node: NodeId,
        type_tag: Option<&str>,
        priority: i64,
        event: Option<PhaseEvent>,
        invalidate: bool,
    ) -> Option<MarkOutcome> {
        let def = self.table.phase(phase)?;
        if !def.admits(node, type_tag) {
            return None;
        }
        Some(
            self.scheduler
                .mark(phase, node, priority, event, invalidate),
        )
    }

    /// Drains every phase currently holding dirty nodes, in declared order, invoking each
    /// phase's executor exactly as its definition specifies.
    pub fn run(&mut self) {
        let phase_ids: Vec<PhaseId> = self.table.phases_in_order().iter().map(|p| p.id).collect();
        for id in phase_ids {
            self.run_phase(id);
        }
    }

    fn run_phase(&mut self, id: PhaseId) {
        let Some(queue) = self.scheduler.queue_mut(id) else {
            return;
        };
        if queue.is_empty() {
            return;
        }
        let Some(def) = self.table.phase_mut(id) else {
            return;
        };
        match &mut def.executor {
            Executor::All(all) => {
                let queue = self
                    .scheduler
                    .queue_mut(id)
                    .expect("checked non-empty above");
                let buckets = queue.drain_all_sorted();
                let ctxs: Vec<EachCtx> = buckets
                    .into_iter()
                    .flat_map(|(_, nodes)| nodes)
                    .map(|node| {
                        queue.clear_node(node);
                        let events = queue.take_events(node);
                        EachCtx {
                            phase: id,
                            node,
                            events,
                        }
                    })
                    .collect();
                queue.clear_all();
                self.dispatcher.dispatch_all(ctxs, all.as_mut());
            }
            Executor::Each(each) => loop {
                let queue = self
                    .scheduler
                    .queue_mut(id)
                    .expect("checked non-empty above");
                let Some((_, nodes)) = queue.pop_bucket() else {
                    queue.clear_all();
                    break;
                };
                let ctxs: Vec<EachCtx> = nodes
                    .into_iter()
                    .map(|node| {
                        queue.clear_node(node);
                        let events = queue.take_events(node);
                        EachCtx {
                            phase: id,
                            node,
                            events,
                        }
                    })
                    .collect();
                self.dispatcher.dispatch_each(ctxs, each.as_mut());
            },
        }
    }
}
