// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! App-level errors: adapter failures plus the notify pipeline's own hard-error conditions.

use core::fmt;

use reactive_data::AdapterError;
use reactive_path::ParseError;

/// Errors an [`crate::App`] method can report to its caller.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// `path` failed to parse.
    Parse(ParseError),
    /// The data adapter rejected the operation.
    Adapter(AdapterError),
    /// A node id was not registered in this app's graph.
    UnknownNode,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "path parse error: {e}"),
            Self::Adapter(e) => write!(f, "adapter error: {e}"),
            Self::UnknownNode => write!(f, "node id not registered in this app"),
        }
    }
}

impl core::error::Error for AppError {}

impl From<ParseError> for AppError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<AdapterError> for AppError {
    fn from(e: AdapterError) -> Self {
        Self::Adapter(e)
    }
}
