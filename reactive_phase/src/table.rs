// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A phase definition and the ordered table `define_phases` installs.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use reactive_graph::{NodeId, TraversalPolicy};
use reactive_scheduler::PhaseId;

use crate::executor::Executor;
use crate::filter::NodeFilter;

/// One phase: its interests (masks), traversal, optional node filter, and executor.
pub struct PhaseDef {
    pub name: Box<str>,
    pub id: PhaseId,
    pub traversal: TraversalPolicy,
    pub masks: Vec<Box<str>>,
    pub filter: Option<NodeFilter>,
    pub executor: Executor,
}

impl PhaseDef {
    /// Whether `node` passes this phase's filter (no filter admits everything).
    #[must_use]
    pub fn admits(&self, node: NodeId, type_tag: Option<&str>) -> bool {
        self.filter
            .as_ref()
            .is_none_or(|f| f.admits(node, type_tag))
    }
}

/// The installed set of phases, in declared order, with masks rebuilt as phase-router entries.
///
/// `define_phases` replaces the whole table: phase ids are reassigned to each phase's position,
/// giving every phase a unique bit index equal to its position.
pub struct PhaseTable {
    phases: Vec<PhaseDef>,
    by_name: HashMap<Box<str>, PhaseId>,
}

impl PhaseTable {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            phases: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Replaces the phase table. Each phase's `id` is overwritten with its position in `list`.
    pub fn define_phases(&mut self, mut list: Vec<PhaseDef>) {
        self.by_name.clear();
        for (i, phase) in list.iter_mut().enumerate() {
            phase.id = PhaseId::new(u32::try_from(i).unwrap_or(u32::MAX));
            self.by_name.insert(phase.name.clone(), phase.id);
        }
        self.phases = list;
    }

    #[must_use]
    pub fn phases_in_order(&self) -> &[PhaseDef] {
        &self.phases
    }

    #[must_use]
    pub fn phase(&self, id: PhaseId) -> Option<&PhaseDef> {
        self.phases.iter().find(|p| p.id == id)
    }

    pub fn phase_mut(&mut self, id: PhaseId) -> Option<&mut PhaseDef> {
        self.phases.iter_mut().find(|p| p.id == id)
    }

    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<PhaseId> {
        self.by_name.get(name).copied()
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(name: &str) -> PhaseDef {
        PhaseDef {
            name: Box::from(name),
            id: PhaseId::new(0),
            traversal: TraversalPolicy::DirtyOnly,
            masks: Vec::new(),
            filter: None,
            executor: Executor::Each(Box::new(|_| {})),
        }
    }

    #[test]
    fn define_phases_assigns_ids_by_position() {
        let mut table = PhaseTable::empty();
        table.define_phases(alloc::vec![phase("a"), phase("b")]);
        assert_eq!(table.id_of("a"), Some(PhaseId::new(0)));
        assert_eq!(table.id_of("b"), Some(PhaseId::new(1)));
    }

    #[test]
    fn redefining_replaces_the_whole_table() {
        let mut table = PhaseTable::empty();
        table.define_phases(alloc::vec![phase("a")]);
        table.define_phases(alloc::vec![phase("b")]);
        assert_eq!(table.id_of("a"), None);
        assert_eq!(table.id_of("b"), Some(PhaseId::new(0)));
    }
}
