// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Internal dispatch interface for running a drained phase's contexts.
//!
//! This stays a seam between "what to run" (the drained, priority-ordered context list) and "how
//! to run it" (serial inline execution today), so a future concurrent dispatcher does not need to
//! reshape [`crate::PhaseRunner`]'s public API.

use alloc::vec::Vec;

use crate::executor::EachCtx;

pub(crate) trait Dispatcher {
    fn dispatch_each(&mut self, ctxs: Vec<EachCtx>, run: &mut dyn FnMut(EachCtx));
    fn dispatch_all(&mut self, ctxs: Vec<EachCtx>, run: &mut dyn FnMut(Vec<EachCtx>));
}

/// Runs contexts serially, in the order they were handed over.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct InlineDispatcher;

impl Dispatcher for InlineDispatcher {
    fn dispatch_each(&mut self, ctxs: Vec<EachCtx>, run: &mut dyn FnMut(EachCtx)) {
        for ctx in ctxs {
            run(ctx);
        }
    }

    fn dispatch_all(&mut self, ctxs: Vec<EachCtx>, run: &mut dyn FnMut(Vec<EachCtx>)) {
        run(ctxs);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use reactive_graph::NodeId;
    use reactive_scheduler::PhaseId;
    use std::vec;

    fn ctx(n: u64) -> EachCtx {
        EachCtx {
            phase: PhaseId::new(0),
            node: NodeId::new(n),
            events: Vec::new(),
        }
    }

    #[test]
    fn inline_dispatcher_runs_each_in_order() {
        let mut d = InlineDispatcher;
        let mut seen = vec![];
        d.dispatch_each(alloc::vec![ctx(1), ctx(2)], &mut |c| seen.push(c.node.as_u64()));
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn inline_dispatcher_runs_all_as_one_batch() {
        let mut d = InlineDispatcher;
        let mut batches = 0;
        d.dispatch_all(alloc::vec![ctx(1), ctx(2)], &mut |batch| {
            batches += 1;
            assert_eq!(batch.len(), 2);
        });
        assert_eq!(batches, 1);
    }
}
