//! Dedicated JSON serializer for query expressions
//!
//! Decision order for each key/value pair:
//! 1. `$`-prefixed key: kept only if it is a reserved operator
//! 2. value with a UI host shape: replaced by its sentinel
//! 3. anything else: passed through, containers recursively

use kinvey_domain::constants::{is_reserved_operator, OPERATOR_SIGIL};
use kinvey_domain::Result;
use serde::Serialize;
use serde_json::{Map, Value};

use super::shape;

/// Filter `value` into the tree that goes on the wire.
pub fn to_query_value(value: &Value) -> Value {
    if let Some(host) = shape::detect(value) {
        return Value::String(host.sentinel().to_string());
    }

    match value {
        Value::Object(map) => {
            let mut filtered = Map::with_capacity(map.len());
            for (key, child) in map {
                if is_dropped_key(key) {
                    continue;
                }
                filtered.insert(key.clone(), to_query_value(child));
            }
            Value::Object(filtered)
        }
        Value::Array(items) => Value::Array(items.iter().map(to_query_value).collect()),
        scalar => scalar.clone(),
    }
}

fn is_dropped_key(key: &str) -> bool {
    key.starts_with(OPERATOR_SIGIL) && !is_reserved_operator(key)
}

/// Serialize a query expression to JSON text.
///
/// `pretty` switches to two-space indentation and nothing else.
///
/// # Errors
/// Returns `KinveyError::Serialization` if `query` cannot be represented as
/// JSON.
pub fn serialize_query<T>(query: &T, pretty: bool) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let filtered = to_query_value(&serde_json::to_value(query)?);
    let text = if pretty {
        serde_json::to_string_pretty(&filtered)?
    } else {
        serde_json::to_string(&filtered)?
    };
    Ok(text)
}
