// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependency DAG with incremental depth maintenance and traversal expansion.
//!
//! Nodes carry a weight (consulted by `reactive_scheduler`'s priority index), an optional type
//! tag, and opaque metadata. Edge cycles are rejected rather than signalled as errors, matching
//! `add_edge`'s boolean-success contract.

#![no_std]

extern crate alloc;

mod graph;
mod scratch;

pub use graph::{Graph, Node, NodeId, TraversalPolicy};
