// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hard errors the adapter reports rather than silently swallowing.

use core::fmt;

/// A CRUD operation failed for a reason the caller must see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdapterError {
    /// A wildcard segment appeared in a concrete CRUD path.
    WildcardInPath,
    /// A `Param` segment stepped into a value that isn't a sequence.
    ParamOnNonSequence,
    /// A parent container was absent and `auto_create` is disabled.
    ParentMissing,
    /// A `Param` element was absent and `auto_create` is disabled.
    ParamElementMissing,
    /// A `Param` leaf target (or the assigned value) is not a mapping.
    ParamTargetNotMapping,
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::WildcardInPath => "wildcard segment in a concrete data path",
            Self::ParamOnNonSequence => "parameterised access on a non-sequence value",
            Self::ParentMissing => "parent container absent and auto_create is disabled",
            Self::ParamElementMissing => "parameterised element absent and auto_create is disabled",
            Self::ParamTargetNotMapping => "parameterised leaf target or value is not a mapping",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for AdapterError {}
