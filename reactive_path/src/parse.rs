// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tokeniser and parser for the path string grammar.
//!
//! Balanced bracket parsing is used throughout, honouring quotes and nested brackets; a naive
//! regex-based split would mis-tokenise bracketed literals containing `.` or `]`.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::segment::{ParamRhs, ParamValue, Path, Segment, VarMap, owned};

/// Options controlling [`parse`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions<'a> {
    /// Known variable bindings, consulted to resolve `$name` positions.
    pub vars: Option<&'a VarMap>,
    /// When `true`, a `$name` position with no matching var widens to the matching wildcard
    /// form instead of being left as a dangling `$` token.
    pub wildcard_dynamic: bool,
}

/// A structurally malformed path string.
///
/// The parser never rejects *semantically* odd but well-formed paths (e.g. an index-wildcard
/// that isn't last); it only rejects inputs that cannot be tokenised at all (unbalanced
/// brackets, unterminated quotes, empty bracket content).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset into the input at which the error was detected.
    pub at: usize,
    /// What went wrong.
    pub reason: ParseErrorKind,
}

/// The kind of structural parse failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `[` was never closed by a matching `]`.
    UnbalancedBracket,
    /// A quote (`"` or `'`) was opened but never closed.
    UnterminatedQuote,
    /// A `[...]` was empty.
    EmptyBracket,
    /// A dot segment was empty (e.g. `a..b`).
    EmptySegment,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            ParseErrorKind::UnbalancedBracket => "unbalanced bracket",
            ParseErrorKind::UnterminatedQuote => "unterminated quote",
            ParseErrorKind::EmptyBracket => "empty bracket",
            ParseErrorKind::EmptySegment => "empty segment",
        };
        write!(f, "{reason} at byte {}", self.at)
    }
}

impl core::error::Error for ParseError {}

/// A raw, pre-resolution token produced by tokenisation.
enum RawToken {
    /// A bareword/`$name`/`*` dot segment.
    Dot(String),
    /// The raw text between `[` and `]`.
    Bracket(String),
}

/// Splits `s` into raw dot/bracket tokens, honouring quotes and nested brackets.
fn tokenize(s: &str) -> Result<Vec<RawToken>, ParseError> {
    let bytes = s.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0usize;
    let mut pending = String::new();
    let mut pending_start = 0usize;

    macro_rules! flush_dot {
        () => {
            if !pending.is_empty() {
                tokens.push(RawToken::Dot(core::mem::take(&mut pending)));
            }
        };
    }

    while i < bytes.len() {
        match bytes[i] {
            b'.' => {
                flush_dot!();
                i += 1;
            }
            b'[' => {
                flush_dot!();
                let open = i;
                i += 1;
                let content_start = i;
                let mut depth = 1usize;
                while i < bytes.len() && depth > 0 {
                    match bytes[i] {
                        b'[' => {
                            depth += 1;
                            i += 1;
                        }
                        b']' => {
                            depth -= 1;
                            i += 1;
                        }
                        b'"' | b'\'' => {
                            let quote = bytes[i];
                            i += 1;
                            let mut closed = false;
                            while i < bytes.len() {
                                if bytes[i] == b'\\' && i + 1 < bytes.len() {
                                    i += 2;
                                    continue;
                                }
                                if bytes[i] == quote {
                                    i += 1;
                                    closed = true;
                                    break;
                                }
                                i += 1;
                            }
                            if !closed {
                                return Err(ParseError {
                                    at: open,
                                    reason: ParseErrorKind::UnterminatedQuote,
                                });
                            }
                        }
                        _ => i += 1,
                    }
                }
                if depth != 0 {
                    return Err(ParseError {
                        at: open,
                        reason: ParseErrorKind::UnbalancedBracket,
                    });
                }
                let content_end = i - 1;
                let content = &s[content_start..content_end];
                if content.is_empty() {
                    return Err(ParseError {
                        at: open,
                        reason: ParseErrorKind::EmptyBracket,
                    });
                }
                tokens.push(RawToken::Bracket(String::from(content)));
            }
            _ => {
                if pending.is_empty() {
                    pending_start = i;
                }
                let start = i;
                // Advance one UTF-8 scalar.
                let ch_len = utf8_len(bytes[i]);
                let end = (start + ch_len).min(bytes.len());
                pending.push_str(&s[start..end]);
                i = end;
            }
        }
    }
    flush_dot!();
    let _ = pending_start;

    Ok(tokens)
}

fn utf8_len(first_byte: u8) -> usize {
    if first_byte & 0x80 == 0 {
        1
    } else if first_byte & 0xE0 == 0xC0 {
        2
    } else if first_byte & 0xF0 == 0xE0 {
        3
    } else {
        4
    }
}

/// Resolves a `$name` position, honoring `wildcard_dynamic` for misses.
///
/// Returns `Some(value)` if resolved, `None` if the `$` token should be preserved verbatim
/// (i.e. `wildcard_dynamic` is false and the var is unknown), and a third outcome — widen to
/// wildcard — is signalled by the caller checking `wildcard_dynamic` itself.
fn resolve_var<'a>(name: &str, vars: Option<&'a VarMap>) -> Option<&'a ParamValue> {
    vars.and_then(|v| v.get(name))
}

/// Parses a path expression.
///
/// The parser never fails on structurally valid input (unresolved `$name` positions either
/// widen to a wildcard or are left in place, per `opts.wildcard_dynamic`); it only returns
/// [`ParseError`] for malformed bracket/quote nesting.
pub fn parse(s: &str, opts: ParseOptions<'_>) -> Result<Path, ParseError> {
    let tokens = tokenize(s)?;
    let mut segments = Vec::with_capacity(tokens.len());
    let count = tokens.len();

    for (idx, tok) in tokens.into_iter().enumerate() {
        let is_last = idx + 1 == count;
        match tok {
            RawToken::Dot(text) => {
                segments.push(parse_dot_segment(&text, opts, is_last)?);
            }
            RawToken::Bracket(text) => {
                segments.push(parse_bracket_segment(&text, opts)?);
            }
        }
    }

    Ok(Path::from_segments(segments))
}

fn parse_dot_segment(
    text: &str,
    opts: ParseOptions<'_>,
    is_last: bool,
) -> Result<Segment, ParseError> {
    if text.is_empty() {
        return Err(ParseError {
            at: 0,
            reason: ParseErrorKind::EmptySegment,
        });
    }
    if text == "*" {
        return Ok(Segment::Wildcard {
            as_index: false,
            deep: is_last,
        });
    }
    if let Some(name) = text.strip_prefix('$') {
        return Ok(match resolve_var(name, opts.vars) {
            Some(ParamValue::Str(s)) => Segment::Key(s.clone()),
            Some(other) => Segment::Key(owned(&alloc::format!("{other}"))),
            None => Segment::Wildcard {
                as_index: false,
                deep: is_last,
            },
        });
    }
    Ok(Segment::Key(owned(text)))
}

fn parse_bracket_segment(text: &str, opts: ParseOptions<'_>) -> Result<Segment, ParseError> {
    let trimmed = text.trim();
    if trimmed == "*" {
        return Ok(Segment::Wildcard {
            as_index: true,
            deep: false,
        });
    }
    if let Some(name) = trimmed.strip_prefix('$') {
        return Ok(match resolve_var(name, opts.vars) {
            Some(v) => match crate::segment::param_value_as_index(v) {
                Some(i) => Segment::Index(i),
                None => Segment::Wildcard {
                    as_index: true,
                    deep: false,
                },
            },
            None => {
                if opts.wildcard_dynamic {
                    Segment::Wildcard {
                        as_index: true,
                        deep: false,
                    }
                } else {
                    Segment::IndexPlaceholder(owned(name))
                }
            }
        });
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        if i >= 0 {
            return Ok(Segment::Index(i as u64));
        }
    }
    // key=value form
    if let Some(eq) = find_top_level_eq(trimmed) {
        let key = owned(trimmed[..eq].trim());
        let rhs_text = trimmed[eq + 1..].trim();
        let rhs = parse_param_rhs(rhs_text, opts)?;
        return Ok(Segment::Param { key, rhs });
    }
    // Bare identifier inside brackets with no `=`: treat as a bareword key step, mirroring a
    // dot-segment (some embedders write `[foo]` instead of `.foo`).
    Ok(Segment::Key(owned(trimmed)))
}

fn find_top_level_eq(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut in_quote: Option<u8> = None;
    while i < bytes.len() {
        match in_quote {
            Some(q) => {
                if bytes[i] == b'\\' && i + 1 < bytes.len() {
                    i += 2;
                    continue;
                }
                if bytes[i] == q {
                    in_quote = None;
                }
                i += 1;
            }
            None => {
                if bytes[i] == b'"' || bytes[i] == b'\'' {
                    in_quote = Some(bytes[i]);
                } else if bytes[i] == b'=' {
                    return Some(i);
                }
                i += 1;
            }
        }
    }
    None
}

fn parse_param_rhs(text: &str, opts: ParseOptions<'_>) -> Result<ParamRhs, ParseError> {
    if let Some(rest) = text.strip_prefix('$') {
        return Ok(match resolve_var(rest, opts.vars) {
            Some(v) => ParamRhs::Literal(v.clone()),
            None => ParamRhs::Placeholder(owned(rest)),
        });
    }
    Ok(ParamRhs::Literal(parse_literal_value(text)?))
}

fn parse_literal_value(text: &str) -> Result<ParamValue, ParseError> {
    if let Some(inner) = strip_quotes(text, b'"').or_else(|| strip_quotes(text, b'\'')) {
        return Ok(ParamValue::Str(owned(&unescape(inner))));
    }
    if text == "true" {
        return Ok(ParamValue::Bool(true));
    }
    if text == "false" {
        return Ok(ParamValue::Bool(false));
    }
    if let Ok(i) = text.parse::<i64>() {
        return Ok(ParamValue::Int(i));
    }
    // Bareword: treated as a string literal.
    Ok(ParamValue::Str(owned(text)))
}

fn strip_quotes(text: &str, quote: u8) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[0] == quote && bytes[bytes.len() - 1] == quote {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;
    use alloc::vec;

    fn p(s: &str) -> Path {
        parse(s, ParseOptions::default()).expect("valid path")
    }

    #[test]
    fn parses_plain_keys() {
        let path = p("a.b.c");
        assert_eq!(
            path.segments(),
            &[
                Segment::Key(owned("a")),
                Segment::Key(owned("b")),
                Segment::Key(owned("c")),
            ]
        );
    }

    #[test]
    fn parses_index_and_wildcard() {
        let path = p("rows[3].name");
        assert_eq!(
            path.segments(),
            &[
                Segment::Key(owned("rows")),
                Segment::Index(3),
                Segment::Key(owned("name")),
            ]
        );

        let path = p("rows[*].name");
        assert!(matches!(
            path.segments()[1],
            Segment::Wildcard {
                as_index: true,
                deep: false
            }
        ));
    }

    #[test]
    fn trailing_key_wildcard_is_deep() {
        let path = p("com.*");
        assert!(path.is_deep());
    }

    #[test]
    fn non_trailing_key_wildcard_is_not_deep() {
        let path = p("a.*.c");
        assert!(!matches!(
            path.segments()[1],
            Segment::Wildcard { deep: true, .. }
        ));
    }

    #[test]
    fn parses_literal_param_numeric_vs_string() {
        let path = p(r#"n[id=42].m"#);
        let Segment::Param { rhs, .. } = &path.segments()[1] else {
            panic!("expected param segment");
        };
        assert_eq!(rhs, &ParamRhs::Literal(ParamValue::Int(42)));

        let path = p(r#"n[id="42"].m"#);
        let Segment::Param { rhs, .. } = &path.segments()[1] else {
            panic!("expected param segment");
        };
        assert_eq!(rhs, &ParamRhs::Literal(ParamValue::Str(owned("42"))));
    }

    #[test]
    fn parses_placeholder_param() {
        let path = p("orders[id=$oid].items[id=$iid].price");
        let Segment::Param { key, rhs } = &path.segments()[1] else {
            panic!("expected param");
        };
        assert_eq!(key.as_ref(), "id");
        assert_eq!(rhs, &ParamRhs::Placeholder(owned("oid")));
    }

    #[test]
    fn parses_index_placeholder() {
        let path = p("rows[$i].name");
        assert_eq!(path.segments()[1], Segment::IndexPlaceholder(owned("i")));
    }

    #[test]
    fn resolves_vars_at_parse_time() {
        let mut vars = VarMap::new();
        vars.insert(owned("i"), ParamValue::Int(2));
        let path = parse(
            "rows[$i].name",
            ParseOptions {
                vars: Some(&vars),
                wildcard_dynamic: false,
            },
        )
        .unwrap();
        assert_eq!(path.segments()[1], Segment::Index(2));
    }

    #[test]
    fn missing_var_widens_when_dynamic() {
        let path = parse(
            "rows[$i].name",
            ParseOptions {
                vars: None,
                wildcard_dynamic: true,
            },
        )
        .unwrap();
        assert!(matches!(
            path.segments()[1],
            Segment::Wildcard {
                as_index: true,
                deep: false
            }
        ));
    }

    #[test]
    fn rejects_unbalanced_bracket() {
        let err = parse("rows[3.name", ParseOptions::default()).unwrap_err();
        assert_eq!(err.reason, ParseErrorKind::UnbalancedBracket);
    }

    #[test]
    fn rejects_unterminated_quote() {
        let err = parse(r#"n[id="42].m"#, ParseOptions::default()).unwrap_err();
        assert_eq!(err.reason, ParseErrorKind::UnterminatedQuote);
    }

    #[test]
    fn honors_escapes_within_quoted_strings() {
        let path = p(r#"n[id="a\"b"]"#);
        let Segment::Param { rhs, .. } = &path.segments()[0] else {
            panic!("expected param");
        };
        assert_eq!(rhs, &ParamRhs::Literal(ParamValue::Str(owned(r#"a"b"#))));
    }
}
