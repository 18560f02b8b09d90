//! Property-based tests for the query serializer and reduce canonicalizer.

use kinvey_core::{canonicalize_reduce, serialize_query, to_query_value};
use kinvey_domain::constants::{
    is_reserved_operator, DOCUMENT_SENTINEL, RESERVED_OPERATORS, SCOPE_SENTINEL, WINDOW_SENTINEL,
};
use proptest::prelude::*;
use serde_json::{Map, Value};

// ============================================================================
// Strategies
// ============================================================================

fn reserved_key() -> impl Strategy<Value = String> {
    prop::sample::select(RESERVED_OPERATORS).prop_map(str::to_string)
}

fn query_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        reserved_key(),
        "\\$[a-zA-Z]{1,8}",
        Just("$$hashKey".to_string()),
    ]
}

fn query_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z $]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(query_key(), inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn truthy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Bool(true)),
        (1i64..10_000).prop_map(Value::from),
        "[a-z]{1,6}".prop_map(Value::String),
        Just(Value::Object(Map::new())),
        Just(Value::Array(Vec::new())),
    ]
}

/// An object carrying every field of one host shape, and its sentinel.
fn host_shape() -> impl Strategy<Value = (Value, &'static str)> {
    let fields = prop_oneof![
        Just((&["document", "location", "alert", "setInterval"][..], WINDOW_SENTINEL)),
        Just((&["documentElement", "createElement", "getElementById"][..], DOCUMENT_SENTINEL)),
        Just((&["$evalAsync", "$watch"][..], SCOPE_SENTINEL)),
    ];
    (fields, prop::collection::vec(truthy(), 4)).prop_map(|((names, sentinel), values)| {
        let map: Map<String, Value> =
            names.iter().zip(values).map(|(name, value)| ((*name).to_string(), value)).collect();
        (Value::Object(map), sentinel)
    })
}

#[derive(Debug, Clone)]
enum Step {
    Key(String),
    Index,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof!["[a-z]{1,8}".prop_map(Step::Key), reserved_key().prop_map(Step::Key), Just(Step::Index)]
}

fn whitespace_run() -> impl Strategy<Value = String> {
    let whitespace = vec![' ', '\t', '\n', '\r', '\u{a0}', '\u{2003}', '\u{3000}', '\u{feff}'];
    prop::collection::vec(prop::sample::select(whitespace), 0..3)
        .prop_map(|chars| chars.into_iter().collect())
}

// ============================================================================
// Helpers
// ============================================================================

fn is_dropped(key: &str) -> bool {
    key.starts_with('$') && !is_reserved_operator(key)
}

/// Every kept key of `input` is in `output` with a matching subtree, and
/// `output` has nothing else.
fn check_filtered(input: &Value, output: &Value) -> Result<(), TestCaseError> {
    match (input, output) {
        (Value::Object(before), Value::Object(after)) => {
            for (key, child) in before {
                if is_dropped(key) {
                    prop_assert!(!after.contains_key(key), "{} survived", key);
                } else {
                    let kept = after.get(key);
                    prop_assert!(kept.is_some(), "{} was dropped", key);
                    if let Some(kept) = kept {
                        check_filtered(child, kept)?;
                    }
                }
            }
            prop_assert!(after.keys().all(|key| before.contains_key(key)));
        }
        (Value::Array(before), Value::Array(after)) => {
            prop_assert_eq!(before.len(), after.len());
            for (child, kept) in before.iter().zip(after) {
                check_filtered(child, kept)?;
            }
        }
        (before, after) => prop_assert_eq!(before, after),
    }
    Ok(())
}

fn operator_keys_are_reserved(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            map.iter().all(|(key, child)| !is_dropped(key) && operator_keys_are_reserved(child))
        }
        Value::Array(items) => items.iter().all(operator_keys_are_reserved),
        _ => true,
    }
}

fn nest(mut value: Value, path: &[Step]) -> Value {
    for step in path.iter().rev() {
        value = match step {
            Step::Key(key) => {
                let mut map = Map::new();
                map.insert(key.clone(), value);
                Value::Object(map)
            }
            Step::Index => Value::Array(vec![Value::Null, value]),
        };
    }
    value
}

fn follow<'a>(mut value: &'a Value, path: &[Step]) -> Option<&'a Value> {
    for step in path {
        value = match step {
            Step::Key(key) => value.get(key.as_str())?,
            Step::Index => value.get(1)?,
        };
    }
    Some(value)
}

// ============================================================================
// Property-Based Tests: query serializer
// ============================================================================

proptest! {
    /// Serialize-then-parse keeps field names and reserved operators and
    /// drops every other `$` key.
    #[test]
    fn prop_serialized_query_keeps_fields_and_operators(query in query_value()) {
        let text = serialize_query(&query, false).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        check_filtered(&query, &parsed)?;
    }

    /// Pretty output parses to the same tree as compact output.
    #[test]
    fn prop_pretty_output_matches_compact(query in query_value()) {
        let compact: Value = serde_json::from_str(&serialize_query(&query, false).unwrap()).unwrap();
        let pretty: Value = serde_json::from_str(&serialize_query(&query, true).unwrap()).unwrap();
        prop_assert_eq!(compact, pretty);
    }

    /// A non-reserved `$` key never reaches the output, whatever it holds.
    #[test]
    fn prop_unknown_operator_is_absent(
        key in "\\$[a-zA-Z]{1,8}".prop_filter("reserved", |key| !is_reserved_operator(key)),
        value in query_value(),
        query in query_value(),
    ) {
        let mut map = Map::new();
        map.insert(key.clone(), value);
        map.insert("nested".to_string(), query);
        let output = to_query_value(&Value::Object(map));

        prop_assert!(output.get(key.as_str()).is_none());
        prop_assert!(operator_keys_are_reserved(&output));
    }

    /// Host shapes become their sentinel at any depth, under field names,
    /// reserved operators or array positions.
    #[test]
    fn prop_host_shapes_become_sentinels(
        (shape, sentinel) in host_shape(),
        path in prop::collection::vec(step(), 0..5),
    ) {
        let output = to_query_value(&nest(shape, &path));
        prop_assert_eq!(follow(&output, &path), Some(&Value::String(sentinel.to_string())));
    }
}

// ============================================================================
// Property-Based Tests: reduce canonicalizer
// ============================================================================

proptest! {
    /// Whitespace between tokens is removed and token order is kept.
    #[test]
    fn prop_reduce_keeps_token_order(
        (tokens, gaps) in prop::collection::vec("[A-Za-z0-9_(){};.+=,]{1,6}", 1..12)
            .prop_flat_map(|tokens| {
                let gaps = prop::collection::vec(whitespace_run(), tokens.len() + 1);
                (Just(tokens), gaps)
            })
    ) {
        let mut source = String::new();
        for (gap, token) in gaps.iter().zip(&tokens) {
            source.push_str(gap);
            source.push_str(token);
        }
        source.push_str(&gaps[tokens.len()]);

        prop_assert_eq!(canonicalize_reduce(&source), tokens.concat());
    }

    /// Output of any input has no whitespace and is a fixed point.
    #[test]
    fn prop_reduce_output_has_no_whitespace(source in any::<String>()) {
        let canonical = canonicalize_reduce(&source);
        let bom = '\u{feff}';
        prop_assert!(!canonical.chars().any(|c| c.is_whitespace() || c == bom));
        prop_assert_eq!(canonicalize_reduce(&canonical), canonical.clone());
        prop_assert!(canonical.chars().count() <= source.chars().count());
    }
}
