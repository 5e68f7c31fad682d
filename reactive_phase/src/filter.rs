// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A phase's optional admission test over candidate nodes.

use alloc::boxed::Box;
use alloc::vec::Vec;

use reactive_graph::NodeId;

/// Restricts which nodes a phase accepts, beyond mask routing.
pub enum NodeFilter {
    /// Admits a node iff the predicate returns `true`.
    Predicate(Box<dyn Fn(NodeId, Option<&str>) -> bool>),
    /// Admits a node iff its type tag is one of the listed types.
    Types(Vec<Box<str>>),
}

impl NodeFilter {
    #[must_use]
    pub fn admits(&self, node: NodeId, type_tag: Option<&str>) -> bool {
        match self {
            Self::Predicate(f) => f(node, type_tag),
            Self::Types(types) => match type_tag {
                Some(tag) => types.iter().any(|t| t.as_ref() == tag),
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_filter_admits_only_listed_tags() {
        let filter = NodeFilter::Types(alloc::vec![Box::from("watch"), Box::from("computed")]);
        assert!(filter.admits(NodeId::new(1), Some("watch")));
        assert!(!filter.admits(NodeId::new(1), Some("effect")));
        assert!(!filter.admits(NodeId::new(1), None));
    }

    #[test]
    fn predicate_filter_runs_the_closure() {
        let filter = NodeFilter::Predicate(Box::new(|n: NodeId, _: Option<&str>| n.as_u64() % 2 == 0));
        assert!(filter.admits(NodeId::new(2), None));
        assert!(!filter.admits(NodeId::new(3), None));
    }
}
