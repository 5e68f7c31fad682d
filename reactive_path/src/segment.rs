// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path segments: the parsed form of one step of a path expression.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

/// A concrete, resolved value used as a literal parameter or a captured variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamValue {
    /// A signed integer literal.
    Int(i64),
    /// A string literal.
    Str(Box<str>),
    /// A boolean literal.
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// The right-hand side of a `[key=value]` parameter segment.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamRhs {
    /// `[key=literal]`: matches elements whose `key` field equals `value`.
    Literal(ParamValue),
    /// `[key=$name]`: matches any element, capturing the field's actual value as `name`.
    Placeholder(Box<str>),
}

/// One step of a parsed path.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// A named field step, e.g. `foo` in `foo.bar`.
    Key(Box<str>),
    /// A non-negative integer index into an ordered sequence, e.g. `[3]`.
    Index(u64),
    /// A wildcard that matches exactly one segment (or, if `deep` and final, any suffix).
    Wildcard {
        /// Whether this wildcard occupies an index-bracket position (`[*]`) rather than a
        /// bareword key position (`.*`). Index wildcards are never deep.
        as_index: bool,
        /// Whether this is a trailing key-wildcard matching any remaining tail (including
        /// empty). Only valid when `as_index` is `false` and this is the final segment.
        deep: bool,
    },
    /// `[key=value]` or `[key=$name]`: selects the array element whose `key` field matches.
    Param {
        /// The field name compared against.
        key: Box<str>,
        /// The literal value or placeholder variable to match against `key`.
        rhs: ParamRhs,
    },
    /// `[$name]`: an index-placeholder, capturing the matched element's array index as `name`.
    ///
    /// This only ever appears in a mask; concrete target paths always use [`Segment::Index`].
    IndexPlaceholder(Box<str>),
}

impl Segment {
    /// Returns `true` if this segment is a (possibly deep) wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard { .. })
    }

    /// Returns `true` if this segment contains an unresolved placeholder (used by masks only).
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(
            self,
            Self::Param {
                rhs: ParamRhs::Placeholder(_),
                ..
            } | Self::IndexPlaceholder(_)
        )
    }
}

/// A parsed path: an ordered sequence of [`Segment`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub(crate) segments: alloc::vec::Vec<Segment>,
}

impl Path {
    /// Creates a path from already-parsed segments.
    #[must_use]
    pub fn from_segments(segments: alloc::vec::Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Returns the segments of this path.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` if this path has no segments (addresses the whole document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if the final segment is a deep (trailing) key-wildcard.
    #[must_use]
    pub fn is_deep(&self) -> bool {
        matches!(
            self.segments.last(),
            Some(Segment::Wildcard { deep: true, .. })
        )
    }

    /// Returns `true` if any segment of this path is a placeholder (mask-only construct).
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.segments.iter().any(Segment::is_placeholder)
    }
}

/// A map from variable name to a resolved value, used by [`crate::parse`] and
/// [`crate::interpolate`].
pub type VarMap = hashbrown::HashMap<Box<str>, ParamValue>;

pub(crate) fn param_value_as_index(v: &ParamValue) -> Option<u64> {
    match v {
        ParamValue::Int(i) if *i >= 0 => Some(*i as u64),
        _ => None,
    }
}

pub(crate) fn owned(s: &str) -> Box<str> {
    String::from(s).into_boxed_str()
}
