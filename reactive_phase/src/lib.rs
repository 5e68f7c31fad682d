// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Phase definitions and the each/all executor contract.
//!
//! A [`PhaseTable`] holds an app's declared phases in drain order; a [`PhaseRunner`] pairs that
//! table with a `reactive_scheduler::Scheduler` and drives the per-phase drain loop, dispatching
//! each phase's executor through the internal [`Dispatcher`](dispatch::Dispatcher) seam.

#![no_std]

extern crate alloc;

mod dispatch;
mod event;
mod executor;
mod filter;
mod runner;
mod table;

pub use event::{PhaseEvent, ResolvedEntry};
pub use executor::{EachCtx, Executor};
pub use filter::NodeFilter;
pub use runner::PhaseRunner;
pub use table::{PhaseDef, PhaseTable};
