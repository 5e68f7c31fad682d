// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic path serialization, the inverse of [`crate::parse`].

use alloc::string::String;

use crate::segment::{ParamRhs, ParamValue, Path, Segment};

/// Serializes `path` back into its canonical string form.
///
/// String literals inside parameters are rendered double-quoted with `"`/`\` escaped; numbers
/// and booleans are rendered bare; a trailing key-wildcard emits `.*` (or `*` if it is the only
/// segment); an index-wildcard emits `[*]`.
#[must_use]
pub fn serialize(path: &Path) -> String {
    let mut out = String::new();
    for (idx, seg) in path.segments().iter().enumerate() {
        let first = idx == 0;
        match seg {
            Segment::Key(name) => {
                if !first {
                    out.push('.');
                }
                out.push_str(name);
            }
            Segment::Index(i) => {
                out.push('[');
                write_int(&mut out, *i as i64);
                out.push(']');
            }
            Segment::Wildcard {
                as_index: true, ..
            } => {
                out.push_str("[*]");
            }
            Segment::Wildcard {
                as_index: false, ..
            } => {
                if !first {
                    out.push('.');
                }
                out.push('*');
            }
            Segment::Param { key, rhs } => {
                out.push('[');
                out.push_str(key);
                out.push('=');
                write_rhs(&mut out, rhs);
                out.push(']');
            }
            Segment::IndexPlaceholder(name) => {
                out.push('[');
                out.push('$');
                out.push_str(name);
                out.push(']');
            }
        }
    }
    out
}

fn write_int(out: &mut String, v: i64) {
    // `core::fmt::Write` would pull in `alloc::fmt`; a direct push keeps this `no_std`-simple.
    out.push_str(&alloc::format!("{v}"));
}

fn write_rhs(out: &mut String, rhs: &ParamRhs) {
    match rhs {
        ParamRhs::Literal(ParamValue::Int(i)) => write_int(out, *i),
        ParamRhs::Literal(ParamValue::Bool(b)) => out.push_str(if *b { "true" } else { "false" }),
        ParamRhs::Literal(ParamValue::Str(s)) => {
            out.push('"');
            for c in s.chars() {
                if c == '"' || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('"');
        }
        ParamRhs::Placeholder(name) => {
            out.push('$');
            out.push_str(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{ParseOptions, parse};

    fn round_trip(s: &str) -> String {
        let path = parse(s, ParseOptions::default()).unwrap();
        serialize(&path)
    }

    #[test]
    fn round_trips_plain_path() {
        assert_eq!(round_trip("a.b.c"), "a.b.c");
    }

    #[test]
    fn round_trips_index_and_wildcard() {
        assert_eq!(round_trip("rows[3].name"), "rows[3].name");
        assert_eq!(round_trip("rows[*].name"), "rows[*].name");
    }

    #[test]
    fn round_trips_deep_wildcard() {
        assert_eq!(round_trip("com.*"), "com.*");
        assert_eq!(round_trip("*"), "*");
    }

    #[test]
    fn round_trips_literal_params_with_quoting() {
        assert_eq!(round_trip(r#"n[id=42].m"#), "n[id=42].m");
        assert_eq!(round_trip(r#"n[id="42"].m"#), r#"n[id="42"].m"#);
        assert_eq!(round_trip("n[ok=true].m"), "n[ok=true].m");
    }

    #[test]
    fn round_trips_placeholder_params() {
        assert_eq!(
            round_trip("orders[id=$oid].items[id=$iid].price"),
            "orders[id=$oid].items[id=$iid].price"
        );
    }

    #[test]
    fn escapes_quotes_in_string_literals() {
        let path = parse(r#"n[id="a\"b"]"#, ParseOptions::default()).unwrap();
        assert_eq!(serialize(&path), r#"n[id="a\"b"]"#);
    }
}
