// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event a dirty node accumulates once per matching mutation, per tick.

use alloc::boxed::Box;
use alloc::vec::Vec;

use reactive_path::{ParamValue, Path};

/// One `Param` segment of a notified path, resolved against the document at notify time.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedEntry {
    /// The key of the array this `Param` segment addressed.
    pub container_key: Box<str>,
    /// The `Param` segment's own field name (the left side of `key=value`).
    pub param_key: Box<str>,
    /// The captured or literal value compared against `param_key`.
    pub value: ParamValue,
    /// The element index the param resolved to, or `-1` if no element matched.
    pub resolved_index: i64,
}

/// Describes one mutation a node was notified about.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseEvent {
    /// The path string as given to `set`/`merge`/`delete`.
    pub path: Box<str>,
    /// The canonical path: dynamic components widened to wildcards, used for routing.
    pub canonical_path: Box<str>,
    /// The parsed form of `canonical_path`.
    pub canonical: Path,
    /// One entry per `Param` segment in the original path, in segment order.
    pub entries: Vec<ResolvedEntry>,
}
