// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drain-run reporting: a cheap summary by default, with opt-in per-node detail.

use alloc::boxed::Box;
use alloc::vec::Vec;

use reactive_graph::NodeId;

/// The count a `run`/`tick` call always returns, regardless of detail level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub notified_nodes: usize,
}

/// Which fields of [`NodeRunDetail`] a caller wants populated. Bits compose: requesting
/// `CAUSE_PATH` without `NOTIFIED_VIA` still only walks the phase that ran, never causing an
/// extra traversal pass on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportDetailMask(u8);

impl ReportDetailMask {
    pub const NONE: Self = Self(0);
    /// Which phase notified each node.
    pub const NOTIFIED_VIA: Self = Self(1 << 0);
    /// The path string that triggered the notification.
    pub const CAUSE_PATH: Self = Self(1 << 1);
    pub const FULL: Self = Self(Self::NOTIFIED_VIA.0 | Self::CAUSE_PATH.0);

    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for ReportDetailMask {
    fn default() -> Self {
        Self::NONE
    }
}

/// Per-node detail for one drain, populated according to the [`ReportDetailMask`] requested.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRunDetail {
    pub node: NodeId,
    pub notified_via: Option<Box<str>>,
    pub cause_path: Option<Box<str>>,
}

/// The full per-node breakdown of one drain, present only when detail was requested.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunDetailReport {
    pub nodes: Vec<NodeRunDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_mask_contains_both_fields() {
        assert!(ReportDetailMask::FULL.contains(ReportDetailMask::NOTIFIED_VIA));
        assert!(ReportDetailMask::FULL.contains(ReportDetailMask::CAUSE_PATH));
        assert!(!ReportDetailMask::NONE.contains(ReportDetailMask::CAUSE_PATH));
    }
}
