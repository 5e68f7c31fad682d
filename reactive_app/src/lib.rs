// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wires the path router, dependency graph, scheduler, phase runner, and a data adapter into one
//! `get`/`set`/`merge`/`delete` -> `notify` -> `tick` pipeline.
//!
//! [`App`] is the entry point. It owns a [`reactive_data::Document`] (or a caller-supplied
//! [`adapter::DataAdapter`]), a [`reactive_graph::Graph`] of dependency nodes, two
//! [`reactive_router::Trie`]s (one for phase masks, one for per-node tracked masks), and a
//! [`reactive_phase::PhaseRunner`]. A mutation through `set`/`merge`/`delete` resolves both tries
//! against the mutated path, widens the matched nodes per phase traversal policy, and marks them
//! dirty on the scheduler; `tick` (or `flush`) then drains whichever phases the scheduler's
//! policy says are due.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod adapter;
mod app;
mod clock;
mod error;
mod options;
pub mod reactivity;
pub mod report;
pub mod telemetry;

pub use adapter::DataAdapter;
pub use app::App;
pub use clock::AppClock;
pub use error::AppError;
pub use options::AppOptions;

pub use reactive_data::{AdapterOptions, DeletePolicy, Document, Value};
pub use reactive_graph::{NodeId, TraversalPolicy};
pub use reactive_phase::{EachCtx, Executor, NodeFilter, PhaseDef};
pub use reactive_scheduler::SchedulerPolicy;
