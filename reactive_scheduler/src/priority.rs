// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Priority index: the single integer a phase's dirty queue orders nodes by.

/// Large enough to dominate any legitimate node weight, so depth strictly orders first.
pub const PRIORITY_SCALE: i64 = 1 << 20;

/// `depth(node) * SCALE - weight(node)`: orders by depth ascending, then weight descending.
#[must_use]
pub fn priority_index(depth: u32, weight: i64) -> i64 {
    i64::from(depth) * PRIORITY_SCALE - weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_dominates_weight() {
        let deep_light = priority_index(1, 0);
        let shallow_heavy = priority_index(0, -1_000_000);
        assert!(shallow_heavy < deep_light);
    }

    #[test]
    fn higher_weight_sorts_first_at_equal_depth() {
        assert!(priority_index(0, 10) < priority_index(0, 5));
    }
}
