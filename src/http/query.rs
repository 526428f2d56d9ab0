//
//  gitlab-api
//  http/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/18.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Bracket-notation query string encoding.
//!
//! GitLab accepts PHP-style bracket notation for structured parameters:
//! sequences repeat the key with empty brackets (`key[]=a&key[]=b`) and
//! nested maps use the child key inside brackets (`key[sub]=v`), to any
//! depth. The same encoding doubles as the request body format for
//! form-encoded writes, so it lives here rather than in the URL layer.
//!
//! Values are percent-encoded per RFC 3986. Two behaviors are deliberate
//! wire-compatibility quirks rather than general rules:
//!
//! - entries whose value is null are dropped entirely (not sent as empty)
//! - the empty string encodes as `"0"`
//!
//! Both are covered by explicit tests below.

use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

/// RFC 3986 unreserved characters stay literal; everything else encodes.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds a query string from an insertion-ordered parameter map.
///
/// Top-level entries with a null value are dropped. Remaining entries are
/// encoded in insertion order and joined with `&`, with no trailing
/// separator.
pub fn build(params: &IndexMap<String, Value>) -> String {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| encode(value, &encode_value(key)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encodes a single scalar per RFC 3986.
///
/// The empty string encodes as `"0"`, matching the wire format of the
/// encoder this one replaces. The quirk only affects the degenerate
/// empty-string case and round-trips as the literal string `"0"`.
pub fn encode_value(value: &str) -> String {
    if value.is_empty() {
        return "0".to_string();
    }

    utf8_percent_encode(value, RFC3986).to_string()
}

fn encode(value: &Value, prefix: &str) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| encode(item, &format!("{prefix}[]")))
            .collect::<Vec<_>>()
            .join("&"),
        Value::Object(entries) => entries
            .iter()
            .map(|(key, item)| encode(item, &format!("{prefix}[{}]", encode_value(key))))
            .collect::<Vec<_>>()
            .join("&"),
        scalar => format!("{prefix}={}", encode_value(&scalar_text(scalar))),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(number) => number.to_string(),
        Value::Null => String::new(),
        // arrays/objects handled by the caller
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> IndexMap<String, Value> {
        match value {
            Value::Object(entries) => entries.into_iter().collect(),
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_scalar_values() {
        let query = build(&params(json!({"search": "gitlab api", "page": 2})));
        assert_eq!(query, "search=gitlab%20api&page=2");
    }

    #[test]
    fn test_sequences_and_nested_maps() {
        let query = build(&params(json!({"a": [1, 2], "b": {"x": 1}})));
        assert_eq!(query, "a[]=1&a[]=2&b[x]=1");
    }

    #[test]
    fn test_deeply_nested_values() {
        let query = build(&params(json!({"f": {"inner": ["x", "y"]}})));
        assert_eq!(query, "f[inner][]=x&f[inner][]=y");
    }

    #[test]
    fn test_null_entries_are_dropped() {
        let query = build(&params(json!({"kept": 1, "dropped": null})));
        assert_eq!(query, "kept=1");
    }

    #[test]
    fn test_empty_string_encodes_as_zero() {
        assert_eq!(encode_value(""), "0");

        let query = build(&params(json!({"name": ""})));
        assert_eq!(query, "name=0");
    }

    #[test]
    fn test_booleans_encode_as_words() {
        let query = build(&params(json!({"archived": true, "simple": false})));
        assert_eq!(query, "archived=true&simple=false");
    }

    #[test]
    fn test_reserved_characters_are_percent_encoded() {
        let query = build(&params(json!({"ref": "feature/new thing"})));
        assert_eq!(query, "ref=feature%2Fnew%20thing");
    }

    #[test]
    fn test_unreserved_characters_stay_literal() {
        assert_eq!(encode_value("v1.2-rc_3~x"), "v1.2-rc_3~x");
    }

    #[test]
    fn test_round_trip_recovers_key_value_pairs() {
        let query = build(&params(json!({"labels": ["bug", "p1"], "milestone": "1.0"})));

        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("labels[]".to_string(), "bug".to_string()),
                ("labels[]".to_string(), "p1".to_string()),
                ("milestone".to_string(), "1.0".to_string()),
            ]
        );
    }
}
