// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A hierarchical, path-addressed document with a lazy secondary array index.
//!
//! This crate is the reactive engine's data adapter: a tree of maps, sequences, and scalars
//! navigated with `reactive_path::Path` values, plus the `[key=value]` array lookup that the
//! engine's dependency tracking relies on staying cheap even as sequences grow.

#![no_std]

extern crate alloc;

mod document;
mod error;
mod index;
mod options;
mod value;

pub use document::Document;
pub use error::AdapterError;
pub use index::IndexStrategy;
pub use options::{AdapterOptions, DeletePolicy};
pub use value::{Seq, Value};
