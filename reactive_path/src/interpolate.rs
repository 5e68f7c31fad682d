// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Variable interpolation over path strings.

use alloc::string::String;

use crate::parse::{ParseError, ParseOptions, parse};
use crate::segment::VarMap;
use crate::serialize::serialize;

/// Substitutes `$name` occurrences in key, index, and param-value positions with values from
/// `vars`, returning the canonical string form.
///
/// A `$name` with no matching var widens to the matching wildcard form when `wildcard_dynamic`
/// is `true`; otherwise the `$name` token is left in place in the output.
///
/// This shares its resolution rules with [`crate::parse`] (parsing already performs
/// interpolation inline); the two entry points exist because callers sometimes want the string
/// result directly without keeping the parsed [`crate::Path`] around.
pub fn interpolate(s: &str, vars: &VarMap, wildcard_dynamic: bool) -> Result<String, ParseError> {
    let path = parse(
        s,
        ParseOptions {
            vars: Some(vars),
            wildcard_dynamic,
        },
    )?;
    Ok(serialize(&path))
}

#[cfg(test)]
mod tests {
    use super::interpolate;
    use crate::segment::{ParamValue, VarMap};

    #[test]
    fn substitutes_known_vars() {
        let mut vars = VarMap::new();
        vars.insert("store".into(), ParamValue::Str("FLT_ARR".into()));
        vars.insert("i".into(), ParamValue::Int(0));
        let out = interpolate("$store.legs[$i].id", &vars, false).unwrap();
        assert_eq!(out, "FLT_ARR.legs[0].id");
    }

    #[test]
    fn widens_missing_var_when_dynamic() {
        let vars = VarMap::new();
        let out = interpolate("rows[$i].name", &vars, true).unwrap();
        assert_eq!(out, "rows[*].name");
    }

    #[test]
    fn leaves_dollar_token_when_not_dynamic() {
        let vars = VarMap::new();
        let out = interpolate("rows[$i].name", &vars, false).unwrap();
        assert_eq!(out, "rows[$i].name");
    }
}
