// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size-capped, wholesale-eviction path caches.
//!
//! These caches never perform fine-grained LRU bookkeeping: once full, the next insert clears the
//! whole cache. This is a deliberate simplicity/throughput trade-off, not an oversight — see
//! `understory_dirty`'s router cache idiom carried into `reactive_router`.
//!
//! Caching here is only valid for strings parsed without per-call `vars` (i.e. static masks and
//! already-canonicalised targets); callers that pass `vars` should call [`crate::parse`]
//! directly.

use alloc::boxed::Box;
use alloc::string::String;

use hashbrown::HashMap;

use crate::parse::{ParseError, ParseOptions, parse};
use crate::segment::Path;

/// A capped `string -> parsed path` cache.
#[derive(Debug)]
pub struct PathCache {
    entries: HashMap<Box<str>, Path>,
    cap: usize,
}

impl PathCache {
    /// Creates a cache that holds at most `cap` entries before wholesale eviction.
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            entries: HashMap::new(),
            cap: cap.max(1),
        }
    }

    /// Returns the cached parse of `s`, parsing and inserting it if absent.
    pub fn get_or_parse(&mut self, s: &str) -> Result<&Path, ParseError> {
        if !self.entries.contains_key(s) {
            let parsed = parse(s, ParseOptions::default())?;
            if self.entries.len() >= self.cap {
                self.entries.clear();
            }
            self.entries.insert(String::from(s).into_boxed_str(), parsed);
        }
        Ok(self.entries.get(s).expect("just inserted"))
    }

    /// Removes all cached entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
