// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hierarchical document and its path-addressed CRUD operations.
//!
//! Every operation here takes an already-parsed `reactive_path::Path`. Variable substitution
//! (`$name` in key, index, and param-value positions) is entirely `reactive_path::parse`'s job —
//! by the time a `Path` reaches the adapter its segments are concrete (`Key`/`Index`/`Param` with
//! a literal right-hand side). A `Wildcard`, `IndexPlaceholder`, or `Param` with a
//! `Placeholder` right-hand side appearing here means the caller handed the adapter a mask
//! instead of a concrete target, which is always a hard error.

use alloc::boxed::Box;

use hashbrown::HashMap;
use reactive_path::{ParamRhs, ParamValue, Path, Segment};

use crate::error::AdapterError;
use crate::options::{AdapterOptions, DeletePolicy};
use crate::value::Value;

fn concrete_param_value(rhs: &ParamRhs) -> Result<&ParamValue, AdapterError> {
    match rhs {
        ParamRhs::Literal(v) => Ok(v),
        ParamRhs::Placeholder(_) => Err(AdapterError::WildcardInPath),
    }
}

fn container_for(seg: &Segment) -> Value {
    match seg {
        Segment::Key(_) => Value::map(),
        _ => Value::seq(),
    }
}

/// A hierarchical, path-addressed document.
pub struct Document {
    root: Value,
    options: AdapterOptions,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(AdapterOptions::default())
    }
}

impl Document {
    /// Creates an empty document (an empty map at the root) with the given policy.
    #[must_use]
    pub fn new(options: AdapterOptions) -> Self {
        Self {
            root: Value::map(),
            options,
        }
    }

    /// The policy this document was constructed with.
    #[must_use]
    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    /// Reads the value at `path`. A `Key` or `Index` step through a value of the wrong shape
    /// returns `Ok(None)` (absent); a `Param` step through a non-sequence is a hard error, as is
    /// any wildcard segment.
    pub fn get(&mut self, path: &Path) -> Result<Option<&Value>, AdapterError> {
        let opts = self.options;
        Ok(get_rec(&mut self.root, path.segments(), &opts)?.map(|v| &*v))
    }

    /// Writes `value` at `path`, creating missing intermediate containers when `auto_create` is
    /// enabled. An empty path replaces the whole document.
    pub fn set(&mut self, path: &Path, value: Value) -> Result<(), AdapterError> {
        let opts = self.options;
        set_rec(&mut self.root, path.segments(), value, &opts)
    }

    /// Shallow key-wise merges `value` into the map at `path` if both are maps; otherwise
    /// behaves exactly like [`Self::set`].
    pub fn merge(&mut self, path: &Path, value: Value) -> Result<(), AdapterError> {
        let opts = self.options;
        let existing = get_rec(&mut self.root, path.segments(), &opts)?;
        match (existing, &value) {
            (Some(Value::Map(m)), Value::Map(incoming)) => {
                m.extend(incoming.clone());
                Ok(())
            }
            _ => self.set(path, value),
        }
    }

    /// Deletes the value at `path`. Deleting through a path that doesn't resolve (a missing
    /// intermediate container, or no element matching a `Param` step) is a silent no-op, not an
    /// error — only a structurally invalid path (a wildcard, or a `Param` step into a
    /// non-sequence) is reported.
    pub fn delete(&mut self, path: &Path) -> Result<(), AdapterError> {
        let segs = path.segments();
        let Some((last, parent_segs)) = segs.split_last() else {
            self.root = Value::map();
            return Ok(());
        };
        if matches!(last, Segment::Wildcard { .. } | Segment::IndexPlaceholder(_)) {
            return Err(AdapterError::WildcardInPath);
        }
        let opts = self.options;
        let Some(parent) = navigate_parent(&mut self.root, parent_segs, &opts)? else {
            return Ok(());
        };
        let delete_policy = self.options.delete_policy;
        match last {
            Segment::Key(k) => {
                if let Some(map) = parent.as_map_mut() {
                    map.remove(k.as_ref());
                }
            }
            Segment::Index(i) => {
                let Some(seq) = parent.as_seq_mut() else {
                    return Ok(());
                };
                let i = *i as usize;
                if i >= seq.items.len() {
                    return Ok(());
                }
                match delete_policy {
                    DeletePolicy::Splice => {
                        seq.items.remove(i);
                        seq.index.invalidate_all();
                    }
                    DeletePolicy::Unset => seq.items[i] = Value::Null,
                }
            }
            Segment::Param { key, rhs } => {
                let pv = concrete_param_value(rhs)?.clone();
                let Some(seq) = parent.as_seq_mut() else {
                    return Err(AdapterError::ParamOnNonSequence);
                };
                let Some(idx) = seq
                    .index
                    .find(&seq.items, key, &pv, opts.index_strategy, opts.index_enabled)
                else {
                    return Ok(());
                };
                match delete_policy {
                    DeletePolicy::Splice => {
                        seq.items.remove(idx);
                        seq.index.invalidate_all();
                    }
                    DeletePolicy::Unset => {
                        seq.items[idx] = Value::Null;
                        seq.index.unset(key, &pv);
                    }
                }
            }
            Segment::Wildcard { .. } | Segment::IndexPlaceholder(_) => {
                unreachable!("rejected above")
            }
        }
        Ok(())
    }

    /// The element index addressed by `path`'s last segment (`Index` trivially, `Param` via the
    /// secondary index), or `-1` if any step fails to resolve. Never errors.
    pub fn index_of(&mut self, path: &Path) -> i64 {
        let segs = path.segments();
        let Some((last, parent_segs)) = segs.split_last() else {
            return -1;
        };
        let opts = self.options;
        let Ok(Some(parent)) = navigate_parent(&mut self.root, parent_segs, &opts) else {
            return -1;
        };
        match last {
            Segment::Index(i) => *i as i64,
            Segment::Param { key, rhs } => {
                let Ok(pv) = concrete_param_value(rhs) else {
                    return -1;
                };
                let pv = pv.clone();
                let Some(seq) = parent.as_seq_mut() else {
                    return -1;
                };
                seq.index
                    .find(&seq.items, key, &pv, opts.index_strategy, opts.index_enabled)
                    .map(|i| i as i64)
                    .unwrap_or(-1)
            }
            _ => -1,
        }
    }
}

fn get_rec<'v>(
    cur: &'v mut Value,
    segs: &[Segment],
    opts: &AdapterOptions,
) -> Result<Option<&'v mut Value>, AdapterError> {
    let Some((seg, rest)) = segs.split_first() else {
        return Ok(Some(cur));
    };
    match seg {
        Segment::Key(k) => match cur.as_map_mut().and_then(|m| m.get_mut(k.as_ref())) {
            Some(v) => get_rec(v, rest, opts),
            None => Ok(None),
        },
        Segment::Index(i) => match cur.as_seq_mut().and_then(|s| s.items.get_mut(*i as usize)) {
            Some(v) => get_rec(v, rest, opts),
            None => Ok(None),
        },
        Segment::Param { key, rhs } => {
            let pv = concrete_param_value(rhs)?.clone();
            let Some(seq) = cur.as_seq_mut() else {
                return Err(AdapterError::ParamOnNonSequence);
            };
            match seq
                .index
                .find(&seq.items, key, &pv, opts.index_strategy, opts.index_enabled)
            {
                Some(i) => get_rec(&mut seq.items[i], rest, opts),
                None => Ok(None),
            }
        }
        Segment::Wildcard { .. } | Segment::IndexPlaceholder(_) => {
            Err(AdapterError::WildcardInPath)
        }
    }
}

fn navigate_parent<'v>(
    mut cur: &'v mut Value,
    segs: &[Segment],
    opts: &AdapterOptions,
) -> Result<Option<&'v mut Value>, AdapterError> {
    for seg in segs {
        match seg {
            Segment::Key(k) => {
                let Some(v) = cur.as_map_mut().and_then(|m| m.get_mut(k.as_ref())) else {
                    return Ok(None);
                };
                cur = v;
            }
            Segment::Index(i) => {
                let Some(v) = cur.as_seq_mut().and_then(|s| s.items.get_mut(*i as usize)) else {
                    return Ok(None);
                };
                cur = v;
            }
            Segment::Param { key, rhs } => {
                let pv = concrete_param_value(rhs)?.clone();
                let Some(seq) = cur.as_seq_mut() else {
                    return Err(AdapterError::ParamOnNonSequence);
                };
                match seq
                    .index
                    .find(&seq.items, key, &pv, opts.index_strategy, opts.index_enabled)
                {
                    Some(i) => cur = &mut seq.items[i],
                    None => return Ok(None),
                }
            }
            Segment::Wildcard { .. } | Segment::IndexPlaceholder(_) => {
                return Err(AdapterError::WildcardInPath);
            }
        }
    }
    Ok(Some(cur))
}

fn set_rec(
    cur: &mut Value,
    segs: &[Segment],
    value: Value,
    opts: &AdapterOptions,
) -> Result<(), AdapterError> {
    let Some((seg, rest)) = segs.split_first() else {
        *cur = value;
        return Ok(());
    };
    if rest.is_empty() {
        return set_leaf(cur, seg, value, opts);
    }
    let next_seg = &rest[0];
    match seg {
        Segment::Key(k) => {
            if !cur.is_map() {
                if opts.auto_create {
                    *cur = Value::map();
                } else {
                    return Err(AdapterError::ParentMissing);
                }
            }
            let map = cur.as_map_mut().expect("just ensured map");
            if !map.contains_key(k.as_ref()) {
                if !opts.auto_create {
                    return Err(AdapterError::ParentMissing);
                }
                map.insert(k.clone(), container_for(next_seg));
            }
            let child = map.get_mut(k.as_ref()).expect("just inserted or present");
            set_rec(child, rest, value, opts)
        }
        Segment::Index(i) => {
            if cur.as_seq().is_none() {
                if opts.auto_create {
                    *cur = Value::seq();
                } else {
                    return Err(AdapterError::ParentMissing);
                }
            }
            let seq = cur.as_seq_mut().expect("just ensured seq");
            let i = *i as usize;
            if i >= seq.items.len() {
                if !opts.auto_create {
                    return Err(AdapterError::ParentMissing);
                }
                while seq.items.len() < i {
                    seq.items.push(Value::Null);
                }
                seq.items.push(container_for(next_seg));
            }
            set_rec(&mut seq.items[i], rest, value, opts)
        }
        Segment::Param { key, rhs } => {
            let pv = concrete_param_value(rhs)?.clone();
            let Some(seq) = cur.as_seq_mut() else {
                return Err(AdapterError::ParamOnNonSequence);
            };
            let found = seq
                .index
                .find(&seq.items, key, &pv, opts.index_strategy, opts.index_enabled);
            let idx = match found {
                Some(i) => i,
                None => {
                    if !opts.auto_create {
                        return Err(AdapterError::ParamElementMissing);
                    }
                    let mut seed = HashMap::new();
                    seed.insert(key.clone(), Value::from(pv.clone()));
                    seq.items.push(Value::Map(seed));
                    let i = seq.items.len() - 1;
                    seq.index.upsert(key, pv, i);
                    i
                }
            };
            set_rec(&mut seq.items[idx], rest, value, opts)
        }
        Segment::Wildcard { .. } | Segment::IndexPlaceholder(_) => Err(AdapterError::WildcardInPath),
    }
}

fn set_leaf(
    cur: &mut Value,
    seg: &Segment,
    value: Value,
    opts: &AdapterOptions,
) -> Result<(), AdapterError> {
    match seg {
        Segment::Key(k) => {
            if !cur.is_map() {
                if opts.auto_create {
                    *cur = Value::map();
                } else {
                    return Err(AdapterError::ParentMissing);
                }
            }
            cur.as_map_mut()
                .expect("just ensured map")
                .insert(k.clone(), value);
            Ok(())
        }
        Segment::Index(i) => {
            if cur.as_seq().is_none() {
                if opts.auto_create {
                    *cur = Value::seq();
                } else {
                    return Err(AdapterError::ParentMissing);
                }
            }
            let seq = cur.as_seq_mut().expect("just ensured seq");
            let i = *i as usize;
            if i >= seq.items.len() {
                if !opts.auto_create {
                    return Err(AdapterError::ParentMissing);
                }
                while seq.items.len() < i {
                    seq.items.push(Value::Null);
                }
                seq.items.push(Value::Null);
            }
            seq.items[i] = value;
            // A position replacement can change many (key, value) -> index tuples at once.
            seq.index.invalidate_all();
            Ok(())
        }
        Segment::Param { key, rhs } => {
            let pv = concrete_param_value(rhs)?.clone();
            let Value::Map(incoming) = &value else {
                return Err(AdapterError::ParamTargetNotMapping);
            };
            let incoming = incoming.clone();
            let Some(seq) = cur.as_seq_mut() else {
                return Err(AdapterError::ParamOnNonSequence);
            };
            let found = seq
                .index
                .find(&seq.items, key, &pv, opts.index_strategy, opts.index_enabled);
            let idx = match found {
                Some(i) => i,
                None => {
                    if !opts.auto_create {
                        return Err(AdapterError::ParamElementMissing);
                    }
                    let mut seed = HashMap::new();
                    seed.insert(key.clone(), Value::from(pv.clone()));
                    seq.items.push(Value::Map(seed));
                    seq.items.len() - 1
                }
            };
            let Some(Value::Map(existing)) = seq.items.get_mut(idx) else {
                return Err(AdapterError::ParamTargetNotMapping);
            };
            existing.clear();
            existing.extend(incoming);
            existing.insert(key.clone(), Value::from(pv.clone()));
            seq.index.upsert(key, pv, idx);
            Ok(())
        }
        Segment::Wildcard { .. } | Segment::IndexPlaceholder(_) => Err(AdapterError::WildcardInPath),
    }
}
