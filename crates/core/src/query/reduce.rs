//! Reduce-function canonicalization for `_group` aggregation requests.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Strip every newline and whitespace character from `source`.
///
/// The body is not validated; whatever the server rejects is the caller's
/// problem.
pub fn canonicalize_reduce(source: &str) -> String {
    source.chars().filter(|c| !is_script_whitespace(*c)).collect()
}

// Unicode White_Space plus the byte-order mark.
fn is_script_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Source text of a server-side reduce function.
///
/// Serializes as its canonical single-line form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceFunction {
    source: String,
}

impl ReduceFunction {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn canonical(&self) -> String {
        canonicalize_reduce(&self.source)
    }
}

impl fmt::Display for ReduceFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<&str> for ReduceFunction {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for ReduceFunction {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl Serialize for ReduceFunction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for ReduceFunction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
