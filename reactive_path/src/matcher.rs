// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pair matcher: mask vs. concrete target, without parameter capture.
//!
//! Placeholder params are **not** supported here: only the trie router resolves placeholders. A
//! mask containing a placeholder never matches via this function; that is deliberate, documented
//! misuse, not a panic.

use crate::segment::{ParamRhs, Path, Segment};

/// Returns `true` if concrete path `target` matches subscription pattern `mask`.
///
/// - A non-deep key-wildcard (`.*`, not last) matches exactly one target segment of any kind.
/// - A deep key-wildcard (trailing `.*`) matches any remaining tail, including the empty tail —
///   so `match("*", _)` is `true` for every target, including the empty path (Open Question 2).
/// - An index-wildcard (`[*]`) matches exactly one target segment that is itself an `Index` or a
///   `Param` (array-addressed) step; it never matches a `Key` step.
/// - A literal `Param` mask segment matches only a target `Param` segment with the same key and
///   an equal value (numeric `42` and string `"42"` are distinct).
#[must_use]
pub fn matches(mask: &Path, target: &Path) -> bool {
    match_segments(mask.segments(), target.segments())
}

fn match_segments(mask: &[Segment], target: &[Segment]) -> bool {
    let Some((seg, rest_mask)) = mask.split_first() else {
        return target.is_empty();
    };

    match seg {
        Segment::Wildcard {
            as_index: false,
            deep: true,
        } => true,
        Segment::Wildcard {
            as_index: false,
            deep: false,
        } => match target.split_first() {
            Some((_, rest_t)) => match_segments(rest_mask, rest_t),
            None => false,
        },
        Segment::Wildcard { as_index: true, .. } => match target.split_first() {
            Some((t, rest_t)) if matches!(t, Segment::Index(_) | Segment::Param { .. }) => {
                match_segments(rest_mask, rest_t)
            }
            _ => false,
        },
        Segment::Key(k) => match target.split_first() {
            Some((Segment::Key(tk), rest_t)) if tk == k => match_segments(rest_mask, rest_t),
            _ => false,
        },
        Segment::Index(i) => match target.split_first() {
            Some((Segment::Index(ti), rest_t)) if ti == i => match_segments(rest_mask, rest_t),
            _ => false,
        },
        Segment::Param {
            key,
            rhs: ParamRhs::Literal(v),
        } => match target.split_first() {
            Some((
                Segment::Param {
                    key: tk,
                    rhs: ParamRhs::Literal(tv),
                },
                rest_t,
            )) if tk == key && tv == v => match_segments(rest_mask, rest_t),
            _ => false,
        },
        // Placeholder mask segments are undefined for the pair matcher: the trie router is the
        // only component that resolves them. Deterministically refuse to match rather than
        // guessing.
        Segment::Param {
            rhs: ParamRhs::Placeholder(_),
            ..
        }
        | Segment::IndexPlaceholder(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::matches;
    use crate::parse::{ParseOptions, parse};

    fn p(s: &str) -> crate::segment::Path {
        parse(s, ParseOptions::default()).unwrap()
    }

    fn m(mask: &str, target: &str) -> bool {
        matches(&p(mask), &p(target))
    }

    #[test]
    fn deep_wildcard_matches_any_suffix_including_empty() {
        assert!(m("com.*", "com"));
        assert!(m("com.*", "com.x"));
        assert!(m("com.*", "com.x.y"));
        assert!(!m("com.*", "other"));
    }

    #[test]
    fn bare_star_matches_everything() {
        assert!(m("*", ""));
        assert!(m("*", "a.b.c"));
    }

    #[test]
    fn non_deep_wildcard_matches_one_segment_of_any_kind() {
        assert!(m("a.*.c", "a.b.c"));
        assert!(!m("a.*.c", "a.b.d.c"));
        assert!(!m("a.*.c", "a.c"));
    }

    #[test]
    fn index_wildcard_matches_index_not_key() {
        assert!(m("rows[*].name", "rows[10].name"));
        assert!(!m("rows[*].name", "rows.name"));
    }

    #[test]
    fn literal_params_distinguish_numeric_and_string() {
        assert!(!m(r#"n[id=42].m"#, r#"n[id="42"].m"#));
        assert!(m(r#"n[id=42].m"#, r#"n[id=42].m"#));
    }

    #[test]
    fn placeholder_mask_never_matches() {
        assert!(!m("orders[id=$oid].x", "orders[id=7].x"));
    }
}
