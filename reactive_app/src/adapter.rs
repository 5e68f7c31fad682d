// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The adapter seam: [`App`](crate::App) is generic over anything implementing [`DataAdapter`],
//! not hard-wired to [`Document`]. A host that wants a different storage backend for the
//! document (e.g. one backed by a database instead of an in-memory tree) can supply its own.

use reactive_data::{AdapterError, Document, Value};
use reactive_path::Path;

/// The document CRUD surface `App` drives. [`Document`] is the default, in-memory
/// implementation; a host may substitute its own via `App`'s adapter type parameter.
pub trait DataAdapter {
    /// Reads the value at `path`.
    fn get(&mut self, path: &Path) -> Result<Option<&Value>, AdapterError>;
    /// Writes `value` at `path`.
    fn set(&mut self, path: &Path, value: Value) -> Result<(), AdapterError>;
    /// Shallow-merges `value` into the map at `path`, or falls back to `set`.
    fn merge(&mut self, path: &Path, value: Value) -> Result<(), AdapterError>;
    /// Deletes the value at `path`.
    fn delete(&mut self, path: &Path) -> Result<(), AdapterError>;
    /// The element index addressed by `path`'s last segment, or `-1` if unresolved.
    fn index_of(&mut self, path: &Path) -> i64;
}

impl DataAdapter for Document {
    fn get(&mut self, path: &Path) -> Result<Option<&Value>, AdapterError> {
        Self::get(self, path)
    }

    fn set(&mut self, path: &Path, value: Value) -> Result<(), AdapterError> {
        Self::set(self, path, value)
    }

    fn merge(&mut self, path: &Path, value: Value) -> Result<(), AdapterError> {
        Self::merge(self, path, value)
    }

    fn delete(&mut self, path: &Path) -> Result<(), AdapterError> {
        Self::delete(self, path)
    }

    fn index_of(&mut self, path: &Path) -> i64 {
        Self::index_of(self, path)
    }
}
