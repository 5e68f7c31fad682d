// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parameterised pattern-matching trie router.
//!
//! Registers path masks (`orders[id=$oid].items[id=$iid].price`) against payloads, and resolves
//! concrete target paths against every registered mask in one traversal, capturing placeholder
//! values along the way. Building on `reactive_path`'s segment grammar rather than
//! `reactive_path::matches`'s pairwise comparison lets many masks be resolved against one target
//! in a single pass instead of one comparison per registered mask.

#![no_std]

extern crate alloc;

mod cache;
mod token;
mod trie;

pub use trie::{Matched, Params, Trie};
