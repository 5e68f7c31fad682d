// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path expressions: parsing, serialization, variable interpolation and pairwise matching.
//!
//! A small dot/bracket grammar with keys, integer indices, wildcards, and array-element
//! parameters (literal or placeholder-captured). It does not implement pattern routing with
//! multiple registered masks — see `reactive_router` for the trie that layers on top of this
//! crate.

#![no_std]

extern crate alloc;

mod cache;
mod interpolate;
mod matcher;
mod parse;
mod segment;
mod serialize;

pub use cache::PathCache;
pub use interpolate::interpolate;
pub use matcher::matches;
pub use parse::{ParseError, ParseErrorKind, ParseOptions, parse};
pub use segment::{ParamRhs, ParamValue, Path, Segment, VarMap};
pub use serialize::serialize;
