// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter-wide configuration.

use crate::index::IndexStrategy;

/// How `delete` handles a removed array element's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Compact the sequence, shifting later elements down and invalidating the whole secondary
    /// index (position replacement can change many `(key,value) -> index` pairs at once).
    Splice,
    /// Leave a `Null` hole at the deleted position; only the deleted value's own index entry is
    /// removed.
    Unset,
}

impl Default for DeletePolicy {
    fn default() -> Self {
        Self::Unset
    }
}

/// Construction-time policy for a [`crate::Document`].
#[derive(Clone, Copy, Debug)]
pub struct AdapterOptions {
    /// Whether missing intermediate containers are created on `set`/`merge`.
    pub auto_create: bool,
    /// How `delete` handles array element removal.
    pub delete_policy: DeletePolicy,
    /// Whether `Param` lookups use the secondary index at all. When `false`, every `Param`
    /// lookup falls back to a linear scan and no bucket is ever built — same results, no index
    /// upkeep cost.
    pub index_enabled: bool,
    /// When secondary-index buckets get built (only consulted if `index_enabled`).
    pub index_strategy: IndexStrategy,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            auto_create: true,
            delete_policy: DeletePolicy::default(),
            index_enabled: true,
            index_strategy: IndexStrategy::default(),
        }
    }
}
