// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dynamic value type stored in a [`crate::Document`].

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use reactive_path::ParamValue;

use crate::index::SecondaryIndex;

/// A dynamically-typed leaf or container value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Box<str>),
    Seq(Seq),
    Map(HashMap<Box<str>, Value>),
}

impl Value {
    #[must_use]
    pub fn map() -> Self {
        Self::Map(HashMap::new())
    }

    #[must_use]
    pub fn seq() -> Self {
        Self::Seq(Seq::new())
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&HashMap<Box<str>, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map_mut(&mut self) -> Option<&mut HashMap<Box<str>, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_seq(&self) -> Option<&Seq> {
        match self {
            Self::Seq(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_seq_mut(&mut self) -> Option<&mut Seq> {
        match self {
            Self::Seq(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }
}

impl From<ParamValue> for Value {
    fn from(v: ParamValue) -> Self {
        match v {
            ParamValue::Int(i) => Self::Int(i),
            ParamValue::Str(s) => Self::Str(s),
            ParamValue::Bool(b) => Self::Bool(b),
        }
    }
}

/// An ordered sequence, paired with its (possibly unbuilt) secondary parameter index.
#[derive(Clone, Debug)]
pub struct Seq {
    pub(crate) items: Vec<Value>,
    pub(crate) index: SecondaryIndex,
}

impl PartialEq for Seq {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Seq {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: SecondaryIndex::new(),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, i: usize) -> Option<&Value> {
        self.items.get(i)
    }
}

impl Default for Seq {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a [`Value`] to a [`ParamValue`] for secondary-index bucketing, if it's one of the
/// simple types a param literal can take. `Float`, `Null`, `Seq`, and `Map` values are never
/// indexed.
pub(crate) fn value_to_param_value(v: &Value) -> Option<ParamValue> {
    match v {
        Value::Bool(b) => Some(ParamValue::Bool(*b)),
        Value::Int(i) => Some(ParamValue::Int(*i)),
        Value::Str(s) => Some(ParamValue::Str(s.clone())),
        _ => None,
    }
}
