//! Structural detection of UI host objects
//!
//! These checks are heuristics, not type checks: an ordinary object that
//! happens to carry every listed field is classified the same way.

use kinvey_domain::constants::{DOCUMENT_SENTINEL, SCOPE_SENTINEL, WINDOW_SENTINEL};
use serde_json::{Map, Value};

const WINDOW_FIELDS: &[&str] = &["document", "location", "alert", "setInterval"];
const DOCUMENT_FIELDS: &[&str] = &["documentElement", "createElement", "getElementById"];
const SCOPE_FIELDS: &[&str] = &["$evalAsync", "$watch"];

/// Shapes the serializer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostShape {
    Window,
    Document,
    Scope,
}

impl HostShape {
    pub const fn sentinel(self) -> &'static str {
        match self {
            Self::Window => WINDOW_SENTINEL,
            Self::Document => DOCUMENT_SENTINEL,
            Self::Scope => SCOPE_SENTINEL,
        }
    }
}

/// Present and not `null`, `false`, `0` or `""`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn has_all(map: &Map<String, Value>, fields: &[&str]) -> bool {
    fields.iter().all(|field| map.get(*field).is_some_and(is_truthy))
}

/// Classify `value`, checking window before document before scope.
pub fn detect(value: &Value) -> Option<HostShape> {
    let map = value.as_object()?;
    if has_all(map, WINDOW_FIELDS) {
        Some(HostShape::Window)
    } else if has_all(map, DOCUMENT_FIELDS) {
        Some(HostShape::Document)
    } else if has_all(map, SCOPE_FIELDS) {
        Some(HostShape::Scope)
    } else {
        None
    }
}
