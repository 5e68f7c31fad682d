// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The lazy secondary array index: `(param key, param value) -> last-seen element index`.
//!
//! Built lazily on first parameterised lookup rather than maintained unconditionally, since most
//! arrays in a document are never addressed by `[key=value]` at all.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use reactive_path::ParamValue;

use crate::value::{Value, value_to_param_value};

/// When and how buckets are built for an array's secondary index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexStrategy {
    /// First access builds buckets for every simple-typed field of every element.
    EagerAllKeys,
    /// Buckets are built on demand, one field at a time, for the key actually queried.
    LazyKeyOnly,
}

impl Default for IndexStrategy {
    fn default() -> Self {
        Self::EagerAllKeys
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct SecondaryIndex {
    buckets: HashMap<Box<str>, HashMap<ParamValue, usize>>,
    built_eager: bool,
}

impl SecondaryIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the element whose `key` field equals `value`, building the relevant
    /// bucket(s) first if they don't exist yet.
    pub(crate) fn lookup(
        &mut self,
        items: &[Value],
        key: &str,
        value: &ParamValue,
        strategy: IndexStrategy,
    ) -> Option<usize> {
        self.ensure_key(items, key, strategy);
        self.buckets.get(key)?.get(value).copied()
    }

    /// Finds the element whose `key` field equals `value`, using the index when `enabled` and
    /// falling back to a linear scan (touching no bucket state) otherwise.
    pub(crate) fn find(
        &mut self,
        items: &[Value],
        key: &str,
        value: &ParamValue,
        strategy: IndexStrategy,
        enabled: bool,
    ) -> Option<usize> {
        if enabled {
            self.lookup(items, key, value, strategy)
        } else {
            items.iter().position(|item| {
                item.as_map()
                    .and_then(|m| m.get(key))
                    .and_then(value_to_param_value)
                    .as_ref()
                    == Some(value)
            })
        }
    }

    fn ensure_key(&mut self, items: &[Value], key: &str, strategy: IndexStrategy) {
        match strategy {
            IndexStrategy::EagerAllKeys => {
                if !self.built_eager {
                    self.rebuild_all(items);
                    self.built_eager = true;
                }
            }
            IndexStrategy::LazyKeyOnly => {
                if !self.buckets.contains_key(key) {
                    self.build_key(items, key);
                }
            }
        }
    }

    fn rebuild_all(&mut self, items: &[Value]) {
        self.buckets.clear();
        for (i, item) in items.iter().enumerate() {
            let Some(map) = item.as_map() else { continue };
            for (k, v) in map {
                if let Some(pv) = value_to_param_value(v) {
                    self.buckets.entry(k.clone()).or_default().insert(pv, i);
                }
            }
        }
    }

    fn build_key(&mut self, items: &[Value], key: &str) {
        let mut bucket = HashMap::new();
        for (i, item) in items.iter().enumerate() {
            if let Some(v) = item.as_map().and_then(|m| m.get(key)) {
                if let Some(pv) = value_to_param_value(v) {
                    bucket.insert(pv, i);
                }
            }
        }
        self.buckets
            .insert(String::from(key).into_boxed_str(), bucket);
    }

    /// Upserts `(key, value) -> idx` into an already-built bucket. If the bucket for `key`
    /// hasn't been built yet, this is a no-op: the next lookup builds it from current state,
    /// which already reflects this write.
    pub(crate) fn upsert(&mut self, key: &str, value: ParamValue, idx: usize) {
        if let Some(bucket) = self.buckets.get_mut(key) {
            bucket.insert(value, idx);
        }
    }

    pub(crate) fn unset(&mut self, key: &str, value: &ParamValue) {
        if let Some(bucket) = self.buckets.get_mut(key) {
            bucket.remove(value);
        }
    }

    /// Invalidates every bucket: used after a splice or a position-replacing `set`-by-`Index`,
    /// either of which can change many `(key, value) -> index` pairs at once.
    pub(crate) fn invalidate_all(&mut self) {
        self.buckets.clear();
        self.built_eager = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Seq;

    fn seq_of(maps: Vec<(&str, ParamValue)>) -> Vec<Value> {
        maps.into_iter()
            .map(|(k, v)| {
                let mut m = HashMap::new();
                m.insert(String::from(k).into_boxed_str(), Value::from(v));
                Value::Map(m)
            })
            .collect()
    }

    #[test]
    fn lazy_strategy_builds_only_queried_key() {
        let items = seq_of(alloc::vec![
            ("id", ParamValue::Int(1)),
            ("id", ParamValue::Int(2)),
        ]);
        let mut idx = SecondaryIndex::new();
        let found = idx.lookup(&items, "id", &ParamValue::Int(2), IndexStrategy::LazyKeyOnly);
        assert_eq!(found, Some(1));
    }

    #[test]
    fn invalidate_all_clears_every_bucket() {
        let items = seq_of(alloc::vec![("id", ParamValue::Int(1))]);
        let mut idx = SecondaryIndex::new();
        assert_eq!(
            idx.lookup(&items, "id", &ParamValue::Int(1), IndexStrategy::EagerAllKeys),
            Some(0)
        );
        idx.invalidate_all();
        assert!(idx.buckets.is_empty());
        assert!(!idx.built_eager);
    }

    #[test]
    fn find_with_index_disabled_never_builds_a_bucket() {
        let items = seq_of(alloc::vec![("id", ParamValue::Int(1))]);
        let mut idx = SecondaryIndex::new();
        let found = idx.find(
            &items,
            "id",
            &ParamValue::Int(1),
            IndexStrategy::EagerAllKeys,
            false,
        );
        assert_eq!(found, Some(0));
        assert!(idx.buckets.is_empty());
    }

    #[test]
    fn unused_seq_default_has_no_buckets() {
        let seq = Seq::new();
        assert!(seq.is_empty());
    }
}
