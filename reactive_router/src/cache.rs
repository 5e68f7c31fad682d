// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Versioned result caches for the trie router.
//!
//! Unlike `reactive_path::PathCache` (capacity-capped), these caches are invalidated by a
//! monotonic structural version counter: every [`Trie`](crate::trie::Trie) mutation bumps the
//! version, and a cached entry recorded against a stale version is simply re-computed. To bound
//! memory held by entries that will never be read again, the whole cache is wholesale-cleared
//! every 1024 version bumps rather than tracked and evicted per entry — the same "don't bother
//! with fine-grained invalidation" trade-off `reactive_path::PathCache` makes for capacity.

use alloc::boxed::Box;
use alloc::string::String;

use hashbrown::HashMap;

/// The number of structural version bumps between wholesale cache clears.
pub(crate) const CLEAR_EVERY: u32 = 1024;

struct Entry<T> {
    version: u32,
    value: T,
}

/// A `string -> T` cache keyed by a structural version stamp.
pub(crate) struct VersionedCache<T> {
    entries: HashMap<Box<str>, Entry<T>>,
}

impl<T: Clone> VersionedCache<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns a clone of the cached value for `key`, if present and not stale.
    pub(crate) fn get(&self, key: &str, version: u32) -> Option<T> {
        let entry = self.entries.get(key)?;
        if entry.version == version {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub(crate) fn insert(&mut self, key: &str, version: u32, value: T) {
        self.entries.insert(
            String::from(key).into_boxed_str(),
            Entry { version, value },
        );
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
