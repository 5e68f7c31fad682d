// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The façade: wires the path router, dependency graph, scheduler, phase runner, and a data
//! adapter into one `get`/`set`/`merge`/`delete` -> `notify` -> `tick` pipeline.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use hashbrown::HashSet;
use reactive_data::{Document, Value};
use reactive_graph::{Graph, NodeId, TraversalPolicy};
use reactive_path::{ParamRhs, ParseOptions, Segment, parse, serialize};
use reactive_phase::{EachCtx, Executor, PhaseDef, PhaseEvent, PhaseRunner, ResolvedEntry};
use reactive_router::Trie;
use reactive_scheduler::{PhaseId, SchedulerPolicy, priority_index};

use crate::adapter::DataAdapter;
use crate::clock::AppClock;
use crate::error::AppError;
use crate::options::AppOptions;
use crate::report::{NodeRunDetail, ReportDetailMask, RunSummary};
use crate::telemetry::{Event, NoopSink, Sink};

fn mask_path(mask: &str) -> Result<reactive_path::Path, AppError> {
    Ok(parse(mask, ParseOptions::default())?)
}

/// Wraps a host-defined phase's executor so a drain also records per-node detail when the
/// caller has asked for it via [`App::set_detail_mask`]. Always installed, cheap when the mask
/// is [`ReportDetailMask::NONE`].
fn instrument(
    def: PhaseDef,
    mask: Rc<Cell<ReportDetailMask>>,
    buf: Rc<RefCell<Vec<NodeRunDetail>>>,
    notified: Rc<Cell<usize>>,
) -> PhaseDef {
    let name = def.name.clone();
    let record = move |node: NodeId, events: &[PhaseEvent]| {
        notified.set(notified.get() + 1);
        let want = mask.get();
        if want == ReportDetailMask::NONE {
            return;
        }
        let notified_via = want
            .contains(ReportDetailMask::NOTIFIED_VIA)
            .then(|| name.clone());
        let cause_path = want
            .contains(ReportDetailMask::CAUSE_PATH)
            .then(|| events.first().map(|e| e.path.clone()))
            .flatten();
        buf.borrow_mut().push(NodeRunDetail {
            node,
            notified_via,
            cause_path,
        });
    };
    let executor = match def.executor {
        Executor::Each(mut f) => Executor::Each(Box::new(move |ctx: EachCtx| {
            record(ctx.node, &ctx.events);
            f(ctx);
        })),
        Executor::All(mut f) => Executor::All(Box::new(move |ctxs: Vec<EachCtx>| {
            for ctx in &ctxs {
                record(ctx.node, &ctx.events);
            }
            f(ctxs);
        })),
    };
    PhaseDef {
        name: def.name,
        id: def.id,
        traversal: def.traversal,
        masks: def.masks,
        filter: def.filter,
        executor,
    }
}

fn resolved_entries<A: DataAdapter>(document: &mut A, segments: &[Segment]) -> Vec<ResolvedEntry> {
    let mut entries = Vec::new();
    for (i, seg) in segments.iter().enumerate() {
        let Segment::Param { key, rhs } = seg else {
            continue;
        };
        let value = match rhs {
            ParamRhs::Literal(v) => v.clone(),
            // A placeholder can only appear in a mask, never in a path an adapter op was given.
            ParamRhs::Placeholder(_) => continue,
        };
        let container_key = match i.checked_sub(1).and_then(|j| segments.get(j)) {
            Some(Segment::Key(k)) => k.clone(),
            _ => Box::from(""),
        };
        let sub_path = reactive_path::Path::from_segments(segments[..=i].to_vec());
        let resolved_index = document.index_of(&sub_path);
        entries.push(ResolvedEntry {
            container_key,
            param_key: key.clone(),
            value,
            resolved_index,
        });
    }
    entries
}

/// Ties a data adapter, dependency graph, and phase runner into one reactive pipeline.
///
/// `A` defaults to [`Document`]; a host may substitute its own [`DataAdapter`].
pub struct App<A: DataAdapter = Document> {
    document: A,
    graph: Graph<()>,
    phase_router: Trie<PhaseId>,
    node_router: Trie<NodeId>,
    phase_runner: PhaseRunner,
    clock: AppClock,
    options: AppOptions,
    sink: Box<dyn Sink>,
    detail_mask: Rc<Cell<ReportDetailMask>>,
    detail_buf: Rc<RefCell<Vec<NodeRunDetail>>>,
    notified_count: Rc<Cell<usize>>,
    compute_stack: Vec<NodeId>,
}

impl<A: DataAdapter> core::fmt::Debug for App<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("App")
            .field("options", &self.options)
            .field("compute_stack_depth", &self.compute_stack.len())
            .finish_non_exhaustive()
    }
}

impl App<Document> {
    /// Builds an app backed by the default in-memory [`Document`] adapter.
    #[must_use]
    pub fn new(options: AppOptions) -> Self {
        Self::with_adapter(Document::new(options.adapter), options)
    }
}

impl<A: DataAdapter> App<A> {
    /// Builds an app over a caller-supplied data adapter.
    #[must_use]
    pub fn with_adapter(document: A, options: AppOptions) -> Self {
        Self {
            document,
            graph: Graph::new(),
            phase_router: Trie::new(),
            node_router: Trie::new(),
            phase_runner: PhaseRunner::new(options.scheduler_policy, options.max_ups.max(1)),
            clock: AppClock::default(),
            options,
            sink: Box::new(NoopSink),
            detail_mask: Rc::new(Cell::new(ReportDetailMask::NONE)),
            detail_buf: Rc::new(RefCell::new(Vec::new())),
            notified_count: Rc::new(Cell::new(0)),
            compute_stack: Vec::new(),
        }
    }

    /// Replaces the telemetry sink. Only consulted when `AppOptions::debug` is set.
    pub fn set_sink(&mut self, sink: Box<dyn Sink>) {
        self.sink = sink;
    }

    /// Replaces the clock an app-driven drain is timed against.
    pub fn set_clock(&mut self, clock: AppClock) {
        self.clock = clock;
    }

    /// Advances a manual clock; a no-op if the app is using a wall clock.
    pub fn advance_clock(&mut self, millis: u64) {
        self.clock.advance(millis);
    }

    /// Controls how much per-node detail [`Self::last_run_detail`] reports after a drain. Cheap
    /// to leave at [`ReportDetailMask::NONE`].
    pub fn set_detail_mask(&mut self, mask: ReportDetailMask) {
        self.detail_mask.set(mask);
    }

    /// The underlying data adapter.
    #[must_use]
    pub fn document(&self) -> &A {
        &self.document
    }

    /// The underlying data adapter, mutably. Bypasses `notify` — only for host code that needs
    /// adapter-specific methods `DataAdapter` doesn't expose.
    pub fn document_mut(&mut self) -> &mut A {
        &mut self.document
    }

    /// Registers a new dependency-graph node, with the given scheduling weight and optional type
    /// tag for node-filter dispatch.
    pub fn add_node(&mut self, weight: i64, type_tag: Option<&str>) -> NodeId {
        self.graph.add_node(weight, type_tag, None)
    }

    /// Declares that `parent` must run before `child` (rejected silently on cycle/self-loop, per
    /// the dependency graph's own contract).
    pub fn connect(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.graph.add_edge(parent, child)
    }

    /// Whether `parent` is a direct dependency of `child`.
    #[must_use]
    pub fn depends_on(&self, parent: NodeId, child: NodeId) -> bool {
        self.graph.parents_iter(child).any(|p| p == parent)
    }

    /// The node currently computing, if any. Reading a [`crate::reactivity::Signal`] while a node
    /// is on the compute stack auto-wires a dependency edge from the signal to that node, rather
    /// than requiring the caller to `connect` every read explicitly. An explicit stack (as
    /// opposed to a thread-local) keeps nested/concurrent computations from clobbering each
    /// other's notion of "who's computing right now".
    #[must_use]
    pub fn current_compute_node(&self) -> Option<NodeId> {
        self.compute_stack.last().copied()
    }

    /// Runs `f` with `node` pushed as the current compute context, auto-wiring any signal reads
    /// inside `f` as dependency edges into `node`.
    pub fn with_compute_context<R>(&mut self, node: NodeId, f: impl FnOnce(&mut Self) -> R) -> R {
        self.compute_stack.push(node);
        let result = f(self);
        self.compute_stack.pop();
        result
    }

    /// Registers `node` as interested in mutations matching `mask`.
    pub fn track(&mut self, node: NodeId, mask: &str) -> Result<(), AppError> {
        if !self.graph.has_node(node) {
            return Err(AppError::UnknownNode);
        }
        let path = mask_path(mask)?;
        self.node_router.add(&path, node);
        if self.options.debug {
            self.sink.emit(Event::NodeTracked {
                node,
                mask: Box::from(mask),
            });
        }
        Ok(())
    }

    /// Replaces the whole phase table. Each phase's masks are (re)registered into the phase
    /// router and its id is reassigned to its position in `defs`, exactly as
    /// [`reactive_phase::PhaseTable::define_phases`] does.
    pub fn define_phases(&mut self, defs: Vec<PhaseDef>) -> Result<(), AppError> {
        let mut router = Trie::new();
        let mut instrumented = Vec::with_capacity(defs.len());
        for (position, def) in defs.into_iter().enumerate() {
            let id = PhaseId::new(u32::try_from(position).unwrap_or(u32::MAX));
            for mask in &def.masks {
                router.add(&mask_path(mask)?, id);
            }
            instrumented.push(instrument(
                def,
                Rc::clone(&self.detail_mask),
                Rc::clone(&self.detail_buf),
                Rc::clone(&self.notified_count),
            ));
        }
        let mut table = reactive_phase::PhaseTable::empty();
        table.define_phases(instrumented);
        self.phase_router = router;
        self.phase_runner.install_table(table);
        if self.options.debug {
            self.sink.emit(Event::PhasesReinit);
        }
        Ok(())
    }

    /// Reads the value at `path`. Never notifies.
    #[must_use]
    pub fn get(&mut self, path: &str) -> Result<Option<&Value>, AppError> {
        let parsed = mask_path(path)?;
        Ok(self.document.get(&parsed)?)
    }

    /// Writes `value` at `path`, then notifies every node whose tracked mask and phase match it.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), AppError> {
        let parsed = mask_path(path)?;
        self.document.set(&parsed, value)?;
        self.notify(path, &parsed);
        Ok(())
    }

    /// Shallow-merges `value` at `path`, then notifies as [`Self::set`] does.
    pub fn merge(&mut self, path: &str, value: Value) -> Result<(), AppError> {
        let parsed = mask_path(path)?;
        self.document.merge(&parsed, value)?;
        self.notify(path, &parsed);
        Ok(())
    }

    /// Deletes the value at `path`, then notifies as [`Self::set`] does.
    pub fn delete(&mut self, path: &str) -> Result<(), AppError> {
        let parsed = mask_path(path)?;
        self.document.delete(&parsed)?;
        self.notify(path, &parsed);
        Ok(())
    }

    /// Forces a drain regardless of the throttle; used by hosts flushing before teardown.
    pub fn flush(&mut self) -> RunSummary {
        self.phase_runner.scheduler_mut().request_drain();
        self.run_now()
    }

    /// Consults the scheduler policy/throttle and, if a drain is due, runs it.
    pub fn tick(&mut self) -> Option<RunSummary> {
        let due = self.phase_runner.scheduler_mut().should_drain_now(&self.clock);
        due.then(|| self.run_now())
    }

    /// Returns the per-node detail recorded by the most recent drain, per the mask set with
    /// [`Self::set_detail_mask`]. Cleared at the start of every drain.
    #[must_use]
    pub fn last_run_detail(&self) -> Vec<NodeRunDetail> {
        self.detail_buf.borrow().clone()
    }

    fn run_now(&mut self) -> RunSummary {
        self.detail_buf.borrow_mut().clear();
        self.notified_count.set(0);
        self.phase_runner.run();
        let notified_nodes = self.notified_count.get();
        if self.options.debug {
            self.sink.emit(Event::NodesNotified {
                count: notified_nodes,
            });
            self.sink.record_nodes_processed(notified_nodes);
        }
        RunSummary { notified_nodes }
    }

    fn notify(&mut self, path_str: &str, path: &reactive_path::Path) {
        let canonical_path: String = serialize(path);
        let entries = resolved_entries(&mut self.document, path.segments());
        let event = PhaseEvent {
            path: Box::from(path_str),
            canonical_path: canonical_path.into_boxed_str(),
            canonical: path.clone(),
            entries,
        };

        let phases: HashSet<PhaseId> = self.phase_router.matched_set(path);
        if phases.is_empty() {
            return;
        }
        let base: Vec<NodeId> = self.node_router.matched_set(path).into_iter().collect();
        if base.is_empty() {
            return;
        }

        if self.options.debug {
            self.sink.emit(Event::NodesChanged { count: base.len() });
            self.sink.record_update();
        }

        for phase_id in phases {
            let Some((traversal, phase_name)) = self
                .phase_runner
                .table()
                .phase(phase_id)
                .map(|def| (def.traversal, def.name.clone()))
            else {
                continue;
            };
            let expanded = self.graph.expand_by_traversal(&base, traversal);
            for node in expanded {
                let Some(n) = self.graph.get_node(node) else {
                    continue;
                };
                let priority = priority_index(n.depth(), n.weight());
                let type_tag = n.type_tag().map(Box::<str>::from);
                self.phase_runner.mark(
                    phase_id,
                    node,
                    type_tag.as_deref(),
                    priority,
                    Some(event.clone()),
                    true,
                );
                if self.options.debug {
                    self.sink.emit(Event::NodeNotified {
                        node,
                        phase: phase_name.clone(),
                    });
                }
            }
        }

        if self.phase_runner.scheduler().policy() == SchedulerPolicy::Sync {
            self.run_now();
        }
    }

    /// The node ids currently tracking `mask`, including already-registered nodes whose mask
    /// matches this one's prefix. Mostly for tests and debug tooling.
    #[must_use]
    pub fn tracked_nodes(&self, target: &str) -> Result<HashSet<NodeId>, AppError> {
        let path = mask_path(target)?;
        Ok(self.node_router.matched_set(&path))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::rc::Rc as StdRc;
    use std::vec;

    use core::cell::RefCell as StdRefCell;

    use super::*;

    fn recording_each(order: StdRc<StdRefCell<Vec<u64>>>) -> Box<dyn FnMut(EachCtx)> {
        Box::new(move |ctx: EachCtx| {
            order.borrow_mut().push(ctx.node.as_u64());
        })
    }

    fn app() -> App<Document> {
        App::new(AppOptions {
            scheduler_policy: SchedulerPolicy::Sync,
            ..AppOptions::default()
        })
    }

    #[test]
    fn chain_order_runs_by_depth_then_weight_ascending() {
        let order = StdRc::new(StdRefCell::new(Vec::new()));
        let mut app = app();

        let a = app.add_node(0, None);
        let d = app.add_node(10, None);
        let b = app.add_node(5, None);
        app.connect(a, d);
        app.connect(a, b);
        for n in [a, b, d] {
            app.track(n, "orders").unwrap();
        }

        app.define_phases(vec![PhaseDef {
            name: Box::from("watch"),
            id: PhaseId::new(0),
            traversal: TraversalPolicy::DirtyAndDown,
            masks: vec![Box::from("orders")],
            filter: None,
            executor: Executor::Each(recording_each(StdRc::clone(&order))),
        }])
        .unwrap();

        app.set("orders", Value::Str(Box::from("placed"))).unwrap();

        let got: Vec<u64> = order.borrow().clone();
        assert_eq!(got[0], a.as_u64());
        assert!(got.contains(&b.as_u64()));
        assert!(got.contains(&d.as_u64()));
    }

    #[test]
    fn a_mutation_matching_no_mask_never_panics_and_runs_nothing() {
        let order = StdRc::new(StdRefCell::new(Vec::new()));
        let mut app = app();
        let a = app.add_node(0, None);
        app.track(a, "orders").unwrap();
        app.define_phases(vec![PhaseDef {
            name: Box::from("watch"),
            id: PhaseId::new(0),
            traversal: TraversalPolicy::DirtyOnly,
            masks: vec![Box::from("orders")],
            filter: None,
            executor: Executor::Each(recording_each(StdRc::clone(&order))),
        }])
        .unwrap();

        app.set("unrelated", Value::Bool(true)).unwrap();

        assert!(order.borrow().is_empty());
    }

    #[test]
    fn resolved_entries_capture_the_matched_element_index() {
        let mut app = app();
        let a = app.add_node(0, None);
        app.track(a, "orders[id=1]").unwrap();
        app.define_phases(vec![PhaseDef {
            name: Box::from("watch"),
            id: PhaseId::new(0),
            traversal: TraversalPolicy::DirtyOnly,
            masks: vec![Box::from("orders[id=1]")],
            filter: None,
            executor: Executor::Each(Box::new(|_| {})),
        }])
        .unwrap();

        app.set("orders[id=1].status", Value::Str(Box::from("shipped")))
            .unwrap();
        // auto_create leaves the element at index 0 since the sequence started empty.
        let detail = app.last_run_detail();
        assert_eq!(detail.len(), 1);
    }

    #[test]
    fn detail_mask_none_records_nothing() {
        let mut app = app();
        let a = app.add_node(0, None);
        app.track(a, "x").unwrap();
        app.define_phases(vec![PhaseDef {
            name: Box::from("p"),
            id: PhaseId::new(0),
            traversal: TraversalPolicy::DirtyOnly,
            masks: vec![Box::from("x")],
            filter: None,
            executor: Executor::Each(Box::new(|_| {})),
        }])
        .unwrap();
        app.set("x", Value::Int(1)).unwrap();
        assert!(app.last_run_detail().is_empty());
    }

    #[test]
    fn full_detail_mask_records_cause_path_and_phase_name() {
        let mut app = app();
        app.set_detail_mask(ReportDetailMask::FULL);
        let a = app.add_node(0, None);
        app.track(a, "x").unwrap();
        app.define_phases(vec![PhaseDef {
            name: Box::from("p"),
            id: PhaseId::new(0),
            traversal: TraversalPolicy::DirtyOnly,
            masks: vec![Box::from("x")],
            filter: None,
            executor: Executor::Each(Box::new(|_| {})),
        }])
        .unwrap();
        app.set("x", Value::Int(1)).unwrap();
        let detail = app.last_run_detail();
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].node, a);
        assert_eq!(detail[0].notified_via.as_deref(), Some("p"));
        assert_eq!(detail[0].cause_path.as_deref(), Some("x"));
    }
}
