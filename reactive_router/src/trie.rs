// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pattern-matching trie itself.
//!
//! Each node holds up to five kinds of outgoing edge, mirroring the segment kinds a mask can
//! register:
//!
//! - `exact`: a literal key or index step (`foo`, `[3]`).
//! - `wc`: a single wildcard step (`.*` non-deep, or `[*]`) matching exactly one target segment
//!   of any kind. The trie deliberately does not distinguish key-wildcards from index-wildcards
//!   here — both widen to "any one segment" once registered, which is looser than
//!   `reactive_path::matches`'s pairwise rules but keeps the trie's edge set small.
//! - `param`: a literal `[key=value]` step, keyed by field name then by value.
//! - `param_any`: a capturing `[key=$name]` or `[$name]` step; only one placeholder child is
//!   kept per field (or for the index slot), since re-registering a placeholder under the same
//!   slot with a different variable name has no useful second meaning.
//! - `deep`/`end`: payload sets attached to a node rather than a further edge. `deep` holds
//!   payloads whose mask ended in a trailing `.*` at this node (matches this node and everything
//!   below); `end` holds payloads whose mask ended exactly here.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use reactive_path::{ParamRhs, ParamValue, Path, Segment};

use crate::cache::{CLEAR_EVERY, VersionedCache};
use crate::token::ExactToken;

/// Variable bindings captured while matching a placeholder segment.
pub type Params = reactive_path::VarMap;

/// One payload match, together with the variables captured along the way.
#[derive(Clone, Debug, PartialEq)]
pub struct Matched<P> {
    /// The payload registered at the matching mask.
    pub payload: P,
    /// Placeholder captures accumulated while descending to this payload.
    pub params: Params,
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum ParamSlot {
    Field(Box<str>),
    Index,
}

struct TrieNode<P> {
    exact: HashMap<ExactToken, usize>,
    wc: Option<usize>,
    param: HashMap<Box<str>, HashMap<ParamValue, usize>>,
    param_any: HashMap<ParamSlot, (usize, Box<str>)>,
    end: HashSet<P>,
    deep: HashSet<P>,
}

impl<P> TrieNode<P> {
    fn new() -> Self {
        Self {
            exact: HashMap::new(),
            wc: None,
            param: HashMap::new(),
            param_any: HashMap::new(),
            end: HashSet::new(),
            deep: HashSet::new(),
        }
    }
}

/// A parameterised pattern trie mapping registered path masks to payloads of type `P`.
///
/// `P` is typically a small `Copy` identifier (a subscriber id, a phase index) rather than the
/// subscriber itself; callers keep the actual subscriber data in a side table keyed by `P`.
pub struct Trie<P> {
    nodes: Vec<TrieNode<P>>,
    version: u32,
    bumps: u32,
    match_cache: VersionedCache<HashSet<P>>,
    prefix_cache: VersionedCache<HashSet<P>>,
}

impl<P: Clone> Default for Trie<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Trie<P> {
    fn alloc_node(&mut self) -> usize {
        self.nodes.push(TrieNode::new());
        self.nodes.len() - 1
    }

    /// The current structural version, bumped on every mutation.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }
}

impl<P: Clone> Trie<P> {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: alloc::vec![TrieNode::new()],
            version: 0,
            bumps: 0,
            match_cache: VersionedCache::new(),
            prefix_cache: VersionedCache::new(),
        }
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.bumps += 1;
        if self.bumps >= CLEAR_EVERY {
            self.bumps = 0;
            self.match_cache.clear();
            self.prefix_cache.clear();
        }
    }
}

impl<P: Copy + Eq + Hash> Trie<P> {
    /// Registers `payload` under `mask`.
    pub fn add(&mut self, mask: &Path, payload: P) {
        let segs = mask.segments();
        let mut cur = 0usize;
        if segs.is_empty() {
            self.nodes[0].end.insert(payload);
            self.bump_version();
            return;
        }
        let n = segs.len();
        for (i, seg) in segs.iter().enumerate() {
            let is_last = i + 1 == n;
            match seg {
                Segment::Wildcard { deep: true, .. } => {
                    self.nodes[cur].deep.insert(payload);
                    self.bump_version();
                    return;
                }
                Segment::Wildcard { deep: false, .. } => {
                    cur = match self.nodes[cur].wc {
                        Some(c) => c,
                        None => {
                            let c = self.alloc_node();
                            self.nodes[cur].wc = Some(c);
                            c
                        }
                    };
                }
                Segment::Key(_) | Segment::Index(_) => {
                    let tok = ExactToken::of(seg).expect("key or index segment");
                    cur = match self.nodes[cur].exact.get(&tok) {
                        Some(&c) => c,
                        None => {
                            let c = self.alloc_node();
                            self.nodes[cur].exact.insert(tok, c);
                            c
                        }
                    };
                }
                Segment::Param {
                    key,
                    rhs: ParamRhs::Literal(v),
                } => {
                    let existing = self.nodes[cur]
                        .param
                        .get(key.as_ref())
                        .and_then(|m| m.get(v))
                        .copied();
                    cur = match existing {
                        Some(c) => c,
                        None => {
                            let c = self.alloc_node();
                            self.nodes[cur]
                                .param
                                .entry(key.clone())
                                .or_default()
                                .insert(v.clone(), c);
                            c
                        }
                    };
                }
                Segment::Param {
                    key,
                    rhs: ParamRhs::Placeholder(var),
                } => {
                    let slot = ParamSlot::Field(key.clone());
                    cur = match self.nodes[cur].param_any.get(&slot) {
                        Some(&(c, _)) => c,
                        None => {
                            let c = self.alloc_node();
                            self.nodes[cur].param_any.insert(slot, (c, var.clone()));
                            c
                        }
                    };
                }
                Segment::IndexPlaceholder(var) => {
                    cur = match self.nodes[cur].param_any.get(&ParamSlot::Index) {
                        Some(&(c, _)) => c,
                        None => {
                            let c = self.alloc_node();
                            self.nodes[cur]
                                .param_any
                                .insert(ParamSlot::Index, (c, var.clone()));
                            c
                        }
                    };
                }
            }
            if is_last {
                self.nodes[cur].end.insert(payload);
            }
        }
        self.bump_version();
    }

    fn find_terminal(&self, segs: &[Segment]) -> Option<(usize, bool)> {
        let mut cur = 0usize;
        if segs.is_empty() {
            return Some((0, false));
        }
        let n = segs.len();
        for (i, seg) in segs.iter().enumerate() {
            let is_last = i + 1 == n;
            match seg {
                Segment::Wildcard { deep: true, .. } => return Some((cur, true)),
                Segment::Wildcard { deep: false, .. } => cur = self.nodes[cur].wc?,
                Segment::Key(_) | Segment::Index(_) => {
                    let tok = ExactToken::of(seg).expect("key or index segment");
                    cur = *self.nodes[cur].exact.get(&tok)?;
                }
                Segment::Param {
                    key,
                    rhs: ParamRhs::Literal(v),
                } => {
                    cur = *self.nodes[cur].param.get(key.as_ref())?.get(v)?;
                }
                Segment::Param {
                    key,
                    rhs: ParamRhs::Placeholder(_),
                } => {
                    cur = self.nodes[cur]
                        .param_any
                        .get(&ParamSlot::Field(key.clone()))?
                        .0;
                }
                Segment::IndexPlaceholder(_) => {
                    cur = self.nodes[cur].param_any.get(&ParamSlot::Index)?.0;
                }
            }
            if is_last {
                return Some((cur, false));
            }
        }
        unreachable!("non-empty segment slice always returns from the loop")
    }

    /// Removes `payload` from the mask's terminal set, or (if `payload` is `None`) clears every
    /// payload registered under `mask`. Returns `true` if anything changed.
    pub fn remove(&mut self, mask: &Path, payload: Option<P>) -> bool {
        let Some((node, is_deep)) = self.find_terminal(mask.segments()) else {
            return false;
        };
        let set = if is_deep {
            &mut self.nodes[node].deep
        } else {
            &mut self.nodes[node].end
        };
        let changed = match payload {
            Some(p) => set.remove(&p),
            None => {
                let had = !set.is_empty();
                set.clear();
                had
            }
        };
        if changed {
            self.bump_version();
        }
        changed
    }

    /// Removes `payload` from every mask it was registered under. Returns the number of masks
    /// it was removed from.
    pub fn remove_payload(&mut self, payload: P) -> usize {
        let mut removed = 0usize;
        for node in &mut self.nodes {
            if node.end.remove(&payload) {
                removed += 1;
            }
            if node.deep.remove(&payload) {
                removed += 1;
            }
        }
        if removed > 0 {
            self.bump_version();
        }
        removed
    }

    fn dfs(&self, node: usize, target: &[Segment], params: &Params, out: &mut Vec<Matched<P>>) {
        let n = &self.nodes[node];
        for &p in &n.deep {
            out.push(Matched {
                payload: p,
                params: params.clone(),
            });
        }
        let Some((seg, rest)) = target.split_first() else {
            for &p in &n.end {
                out.push(Matched {
                    payload: p,
                    params: params.clone(),
                });
            }
            return;
        };
        if let Some(tok) = ExactToken::of(seg) {
            if let Some(&child) = n.exact.get(&tok) {
                self.dfs(child, rest, params, out);
            }
        }
        if let Some(child) = n.wc {
            self.dfs(child, rest, params, out);
        }
        if let Segment::Param {
            key,
            rhs: ParamRhs::Literal(v),
        } = seg
        {
            if let Some(&child) = n.param.get(key.as_ref()).and_then(|m| m.get(v)) {
                self.dfs(child, rest, params, out);
            }
            if let Some((child, var)) = n.param_any.get(&ParamSlot::Field(key.clone())) {
                let mut p2 = params.clone();
                p2.insert(var.clone(), v.clone());
                self.dfs(*child, rest, &p2, out);
            }
        }
        if let Segment::Index(i) = seg {
            if let Some((child, var)) = n.param_any.get(&ParamSlot::Index) {
                let mut p2 = params.clone();
                p2.insert(var.clone(), ParamValue::Int(*i as i64));
                self.dfs(*child, rest, &p2, out);
            }
        }
    }

    fn collect_subtree(&self, node: usize, params: &Params, out: &mut Vec<Matched<P>>) {
        let n = &self.nodes[node];
        for &p in &n.end {
            out.push(Matched {
                payload: p,
                params: params.clone(),
            });
        }
        for &p in &n.deep {
            out.push(Matched {
                payload: p,
                params: params.clone(),
            });
        }
        for &child in n.exact.values() {
            self.collect_subtree(child, params, out);
        }
        if let Some(child) = n.wc {
            self.collect_subtree(child, params, out);
        }
        for bucket in n.param.values() {
            for &child in bucket.values() {
                self.collect_subtree(child, params, out);
            }
        }
        for &(child, _) in n.param_any.values() {
            self.collect_subtree(child, params, out);
        }
    }

    fn dfs_prefix(
        &self,
        node: usize,
        target: &[Segment],
        params: &Params,
        out: &mut Vec<Matched<P>>,
    ) {
        let n = &self.nodes[node];
        for &p in &n.deep {
            out.push(Matched {
                payload: p,
                params: params.clone(),
            });
        }
        let Some((seg, rest)) = target.split_first() else {
            self.collect_subtree(node, params, out);
            return;
        };
        if let Some(tok) = ExactToken::of(seg) {
            if let Some(&child) = n.exact.get(&tok) {
                self.dfs_prefix(child, rest, params, out);
            }
        }
        if let Some(child) = n.wc {
            self.dfs_prefix(child, rest, params, out);
        }
        if let Segment::Param {
            key,
            rhs: ParamRhs::Literal(v),
        } = seg
        {
            if let Some(&child) = n.param.get(key.as_ref()).and_then(|m| m.get(v)) {
                self.dfs_prefix(child, rest, params, out);
            }
            if let Some((child, var)) = n.param_any.get(&ParamSlot::Field(key.clone())) {
                let mut p2 = params.clone();
                p2.insert(var.clone(), v.clone());
                self.dfs_prefix(*child, rest, &p2, out);
            }
        }
        if let Segment::Index(i) = seg {
            if let Some((child, var)) = n.param_any.get(&ParamSlot::Index) {
                let mut p2 = params.clone();
                p2.insert(var.clone(), ParamValue::Int(*i as i64));
                self.dfs_prefix(*child, rest, &p2, out);
            }
        }
    }

    /// Returns every payload whose mask matches `target`, together with captured placeholders.
    ///
    /// Ordering of results is unspecified.
    #[must_use]
    pub fn match_with_params(&self, target: &Path) -> Vec<Matched<P>> {
        let mut out = Vec::new();
        let params = Params::new();
        self.dfs(0, target.segments(), &params, &mut out);
        out
    }

    /// Returns the set of payloads whose mask matches `target`.
    #[must_use]
    pub fn matched_set(&self, target: &Path) -> HashSet<P> {
        self.match_with_params(target)
            .into_iter()
            .map(|m| m.payload)
            .collect()
    }

    /// Like [`Self::match_with_params`], but also includes every payload registered strictly
    /// below `target` (masks nested under the target's subtree), since writes at `target` also
    /// touch data those masks address. Variables captured only by segments deeper than `target`
    /// are left unbound.
    #[must_use]
    pub fn match_including_prefix_with_params(&self, target: &Path) -> Vec<Matched<P>> {
        let mut out = Vec::new();
        let params = Params::new();
        self.dfs_prefix(0, target.segments(), &params, &mut out);
        out
    }

    /// The payload-only projection of [`Self::match_including_prefix_with_params`].
    #[must_use]
    pub fn matched_including_prefix_set(&self, target: &Path) -> HashSet<P> {
        self.match_including_prefix_with_params(target)
            .into_iter()
            .map(|m| m.payload)
            .collect()
    }

    /// Walks only exact/param-literal steps (never a `wc` edge) to the node `prefix` arrives at,
    /// then collects every `end`/`deep` payload in the subtree rooted there. Returns `None` if
    /// `prefix` contains a wildcard, a placeholder, or a literal step with no matching child —
    /// in all three cases there is no single arrival node to collect from.
    fn literal_descend(&self, segs: &[Segment]) -> Option<usize> {
        let mut node = 0;
        for seg in segs {
            let n = &self.nodes[node];
            node = match seg {
                Segment::Key(_) | Segment::Index(_) => {
                    let tok = ExactToken::of(seg).expect("Key/Index always tokenize");
                    *n.exact.get(&tok)?
                }
                Segment::Param {
                    key,
                    rhs: ParamRhs::Literal(v),
                } => *n.param.get(key.as_ref())?.get(v)?,
                Segment::Wildcard { .. }
                | Segment::IndexPlaceholder(_)
                | Segment::Param {
                    rhs: ParamRhs::Placeholder(_),
                    ..
                } => return None,
            };
        }
        Some(node)
    }

    /// Enumerates every payload registered at or below `prefix`, ignoring captured variables.
    ///
    /// Unlike [`Self::matched_including_prefix_set`] (which follows `wc` edges while descending
    /// and treats deep-wildcard masks along the way as already matching), this only descends
    /// exact and param-literal steps to find `prefix`'s own node — a wildcard anywhere in
    /// `prefix` itself yields an empty set rather than fanning out over every node it could
    /// mean. Once at that node, the full subtree below it (including any `wc` edges it
    /// contains) is collected, since a write at `prefix` touches everything nested under it.
    #[must_use]
    pub fn collect_by_prefix(&self, prefix: &Path) -> HashSet<P> {
        let mut out = Vec::new();
        if let Some(node) = self.literal_descend(prefix.segments()) {
            self.collect_subtree(node, &Params::new(), &mut out);
        }
        out.into_iter().map(|m| m.payload).collect()
    }

    /// Cached variant of [`Self::matched_set`], keyed by `target`'s canonical string form and
    /// invalidated whenever the trie's structural [`Self::version`] changes.
    pub fn matched_set_cached(&mut self, target_str: &str, target: &Path) -> HashSet<P> {
        if let Some(hit) = self.match_cache.get(target_str, self.version) {
            return hit;
        }
        let result = self.matched_set(target);
        self.match_cache
            .insert(target_str, self.version, result.clone());
        result
    }

    /// Cached variant of [`Self::matched_including_prefix_set`].
    pub fn matched_including_prefix_set_cached(
        &mut self,
        target_str: &str,
        target: &Path,
    ) -> HashSet<P> {
        if let Some(hit) = self.prefix_cache.get(target_str, self.version) {
            return hit;
        }
        let result = self.matched_including_prefix_set(target);
        self.prefix_cache
            .insert(target_str, self.version, result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use reactive_path::{ParseOptions, parse};

    fn p(s: &str) -> Path {
        parse(s, ParseOptions::default()).unwrap()
    }

    #[test]
    fn literal_mask_matches_exact_target() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("a.b.c"), 1);
        assert!(t.matched_set(&p("a.b.c")).contains(&1));
        assert!(!t.matched_set(&p("a.b.d")).contains(&1));
    }

    #[test]
    fn deep_mask_matches_every_descendant() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("com.*"), 7);
        assert!(t.matched_set(&p("com.sales.q1")).contains(&7));
        assert!(t.matched_set(&p("com.sales")).contains(&7));
        assert!(!t.matched_set(&p("org.sales")).contains(&7));
    }

    #[test]
    fn non_deep_wildcard_matches_exactly_one_segment() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("a.*.c"), 3);
        assert!(t.matched_set(&p("a.b.c")).contains(&3));
        assert!(!t.matched_set(&p("a.b.d.c")).contains(&3));
        assert!(!t.matched_set(&p("a.c")).contains(&3));
    }

    #[test]
    fn captures_nested_placeholder_params() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("orders[id=$oid].items[id=$iid].price"), 42);
        let target = p(r#"orders[id=7].items[id=3].price"#);
        let matches = t.match_with_params(&target);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.payload, 42);
        assert_eq!(m.params.get("oid"), Some(&ParamValue::Int(7)));
        assert_eq!(m.params.get("iid"), Some(&ParamValue::Int(3)));
    }

    #[test]
    fn index_placeholder_captures_array_index() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("rows[$i].name"), 9);
        let matches = t.match_with_params(&p("rows[2].name"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].params.get("i"), Some(&ParamValue::Int(2)));
    }

    #[test]
    fn remove_payload_clears_every_registration() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("a.b"), 5);
        t.add(&p("c.d"), 5);
        assert_eq!(t.remove_payload(5), 2);
        assert!(t.matched_set(&p("a.b")).is_empty());
        assert!(t.matched_set(&p("c.d")).is_empty());
    }

    #[test]
    fn matched_including_prefix_reaches_nested_masks() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("orders.items.price"), 1);
        let set = t.matched_including_prefix_set(&p("orders"));
        assert!(set.contains(&1));
        // the narrower mask isn't hit by a *shallower* target under ordinary matching:
        assert!(!t.matched_set(&p("orders")).contains(&1));
    }

    #[test]
    fn collect_by_prefix_never_descends_a_wildcard_edge() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("a.*.c"), 3);
        // "a.b" can only be reached by the wc edge registered for "a.*.c" — collect_by_prefix
        // must not follow it, so the literal descent dead-ends and the result is empty, even
        // though matched_including_prefix_set would find it via the wc edge.
        assert!(t.collect_by_prefix(&p("a.b")).is_empty());
        assert!(t.matched_including_prefix_set(&p("a.b")).contains(&3));
    }

    #[test]
    fn collect_by_prefix_rejects_a_wildcard_prefix_segment() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("a.b.c"), 1);
        assert!(t.collect_by_prefix(&p("a.*")).is_empty());
    }

    #[test]
    fn collect_by_prefix_collects_the_literal_subtree() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("orders.items.price"), 1);
        t.add(&p("orders.items.*"), 2);
        let set = t.collect_by_prefix(&p("orders.items"));
        assert!(set.contains(&1));
        assert!(set.contains(&2));
    }

    #[test]
    fn cache_goes_stale_after_structural_change() {
        let mut t: Trie<u32> = Trie::new();
        t.add(&p("a.b"), 1);
        let target = p("a.b");
        let first = t.matched_set_cached("a.b", &target);
        assert_eq!(first.len(), 1);
        t.add(&p("a.b"), 2);
        let second = t.matched_set_cached("a.b", &target);
        assert_eq!(second.len(), 2);
    }
}
