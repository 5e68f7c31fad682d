// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thin signal/effect/watch wrappers over [`App`]'s node/phase primitives.
//!
//! These are convenience node registrations, not a second reactive runtime: a [`Signal`] is a
//! tracked path plus a graph node; [`Effect`] and [`Watch`] are node registrations driven by two
//! built-in phases (`__computed`, `__watch`) a host installs alongside its own phases.

use alloc::boxed::Box;
use alloc::vec::Vec;

use reactive_data::Value;
use reactive_graph::{NodeId, TraversalPolicy};
use reactive_phase::{EachCtx, Executor, NodeFilter, PhaseDef};
use reactive_scheduler::PhaseId;

use crate::adapter::DataAdapter;
use crate::app::App;
use crate::error::AppError;

/// Phase name a computed [`Effect`] recomputes under.
pub const COMPUTED_PHASE: &str = "__computed";
/// Phase name a [`Watch`] callback runs under.
pub const WATCH_PHASE: &str = "__watch";

/// A tracked document path with a `get`/`set` surface. The source side of the reactivity glue:
/// reading one while a node is on the compute stack wires a dependency edge automatically.
pub struct Signal {
    node: NodeId,
    path: Box<str>,
}

impl Signal {
    /// Creates a signal at `path`, writing `initial` and registering a graph node for it.
    pub fn new<A: DataAdapter>(app: &mut App<A>, path: &str, initial: Value) -> Result<Self, AppError> {
        app.set(path, initial)?;
        let node = app.add_node(0, Some("signal"));
        Ok(Self {
            node,
            path: Box::from(path),
        })
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the current value, auto-wiring a dependency edge from this signal to whatever node
    /// is currently computing (see [`App::current_compute_node`]).
    pub fn get<A: DataAdapter>(&self, app: &mut App<A>) -> Result<Option<Value>, AppError> {
        if let Some(consumer) = app.current_compute_node() {
            app.connect(self.node, consumer);
        }
        Ok(app.get(&self.path)?.cloned())
    }

    pub fn set<A: DataAdapter>(&self, app: &mut App<A>, value: Value) -> Result<(), AppError> {
        app.set(&self.path, value)
    }
}

/// A node that recomputes in the `__computed` phase whenever a dependency it read last time
/// changes. The recompute closure is supplied to [`computed_phase`] when the host defines phases;
/// `Effect` itself is just the node handle and dependency registration.
pub struct Effect {
    node: NodeId,
}

impl Effect {
    /// Registers an effect node tracking `mask`. Its recompute body lives in the
    /// [`computed_phase`] executor the host installs, dispatched by node-type filtering.
    pub fn new<A: DataAdapter>(app: &mut App<A>, mask: &str) -> Result<Self, AppError> {
        let node = app.add_node(0, Some("effect"));
        app.track(node, mask)?;
        Ok(Self { node })
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// A node that runs a callback in the `__watch` phase whenever `mask` is mutated, without
/// producing a value of its own.
pub struct Watch {
    node: NodeId,
}

impl Watch {
    pub fn new<A: DataAdapter>(app: &mut App<A>, mask: &str) -> Result<Self, AppError> {
        let node = app.add_node(0, Some("watch"));
        app.track(node, mask)?;
        Ok(Self { node })
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Builds the `__computed` [`PhaseDef`]: every `effect`-tagged node, traversed downward so a
/// changed signal's dependents recompute in turn. The mask is the deep wildcard (matches any
/// mutation); per-node interest is narrowed by each effect's own tracked mask in the node router.
#[must_use]
pub fn computed_phase(executor: impl FnMut(EachCtx) + 'static) -> PhaseDef {
    PhaseDef {
        name: Box::from(COMPUTED_PHASE),
        id: PhaseId::new(0),
        traversal: TraversalPolicy::DirtyAndDown,
        masks: alloc_vec_deep_wildcard(),
        filter: Some(NodeFilter::Types(alloc_vec_box("effect"))),
        executor: Executor::Each(Box::new(executor)),
    }
}

/// Builds the `__watch` [`PhaseDef`]; see [`computed_phase`] for the masking rationale.
#[must_use]
pub fn watch_phase(executor: impl FnMut(EachCtx) + 'static) -> PhaseDef {
    PhaseDef {
        name: Box::from(WATCH_PHASE),
        id: PhaseId::new(0),
        traversal: TraversalPolicy::DirtyOnly,
        masks: alloc_vec_deep_wildcard(),
        filter: Some(NodeFilter::Types(alloc_vec_box("watch"))),
        executor: Executor::Each(Box::new(executor)),
    }
}

fn alloc_vec_deep_wildcard() -> Vec<Box<str>> {
    let mut v = Vec::with_capacity(1);
    v.push(Box::from("*"));
    v
}

fn alloc_vec_box(tag: &str) -> Vec<Box<str>> {
    let mut v = Vec::with_capacity(1);
    v.push(Box::from(tag));
    v
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec;

    use reactive_data::Document;
    use reactive_scheduler::SchedulerPolicy;

    use super::*;
    use crate::options::AppOptions;

    #[test]
    fn watch_runs_when_its_mask_is_mutated() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_c = Rc::clone(&seen);
        let mut app: App<Document> = App::new(AppOptions {
            scheduler_policy: SchedulerPolicy::Sync,
            ..AppOptions::default()
        });
        let watch = Watch::new(&mut app, "count").unwrap();
        app.define_phases(vec![watch_phase(move |ctx: EachCtx| {
            seen_c.borrow_mut().push(ctx.node.as_u64());
        })])
        .unwrap();

        app.set("count", Value::Int(1)).unwrap();

        assert_eq!(*seen.borrow(), vec![watch.node().as_u64()]);
    }

    #[test]
    fn signal_get_auto_wires_a_dependency_edge_while_computing() {
        let mut app: App<Document> = App::new(AppOptions {
            scheduler_policy: SchedulerPolicy::Sync,
            ..AppOptions::default()
        });
        let signal = Signal::new(&mut app, "count", Value::Int(1)).unwrap();
        let effect = Effect::new(&mut app, "derived").unwrap();

        app.with_compute_context(effect.node(), |app| {
            signal.get(app).unwrap();
        });

        assert!(app.depends_on(signal.node(), effect.node()));
    }
}
