// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The named events and rate counters an [`crate::App`] reports when `debug` is enabled.

use alloc::boxed::Box;
use alloc::vec::Vec;

use reactive_graph::NodeId;

/// One debug-observable occurrence in the notify pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A node was registered against a mask.
    NodeTracked { node: NodeId, mask: Box<str> },
    /// A node's phase bit was marked dirty.
    NodeNotified { node: NodeId, phase: Box<str> },
    /// A mutation reached `notify` and matched at least one tracked node.
    NodesChanged { count: usize },
    /// A drain finished; `count` nodes were actually invoked across all phases.
    NodesNotified { count: usize },
    /// `define_phases` replaced the phase table.
    PhasesReinit,
}

/// Where [`Event`]s and rate counters go. `App` calls this only when `AppOptions::debug` is set.
pub trait Sink {
    fn emit(&mut self, event: Event);
    fn record_update(&mut self);
    fn record_nodes_processed(&mut self, count: usize);
}

/// Drops everything. The default sink for a non-debug app.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl Sink for NoopSink {
    fn emit(&mut self, _event: Event) {}
    fn record_update(&mut self) {}
    fn record_nodes_processed(&mut self, _count: usize) {}
}

/// Keeps every event and the three cumulative counts the host derives per-second rates from
/// (updates, events, nodes processed). Rate computation itself is the host's job: this sink only
/// tracks the running totals a host samples over its own wall-clock window.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<Event>,
    updates: u64,
    nodes_processed: u64,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    #[must_use]
    pub fn nodes_processed_count(&self) -> u64 {
        self.nodes_processed
    }
}

impl Sink for RecordingSink {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    fn record_update(&mut self) {
        self.updates += 1;
    }

    fn record_nodes_processed(&mut self, count: usize) {
        self.nodes_processed += count as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_accumulates_events_and_counters() {
        let mut sink = RecordingSink::new();
        sink.emit(Event::PhasesReinit);
        sink.record_update();
        sink.record_nodes_processed(3);
        sink.record_nodes_processed(2);
        assert_eq!(sink.events(), [Event::PhasesReinit]);
        assert_eq!(sink.update_count(), 1);
        assert_eq!(sink.nodes_processed_count(), 5);
    }
}
