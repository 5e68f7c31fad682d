// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `each`/`all` executor contract a phase is defined with.

use alloc::boxed::Box;
use alloc::vec::Vec;

use reactive_graph::NodeId;
use reactive_scheduler::PhaseId;

use crate::event::PhaseEvent;

/// The context passed to a phase executor for one dirty node.
#[derive(Clone, Debug, PartialEq)]
pub struct EachCtx {
    pub phase: PhaseId,
    pub node: NodeId,
    /// Every event this node accumulated for this phase since the last drain, in occurrence
    /// order.
    pub events: Vec<PhaseEvent>,
}

/// Exactly one of these is supplied per phase definition.
pub enum Executor {
    /// Invoked once per dirty node, in priority order.
    Each(Box<dyn FnMut(EachCtx)>),
    /// Invoked once per tick with the full batch, in priority order.
    All(Box<dyn FnMut(Vec<EachCtx>)>),
}
