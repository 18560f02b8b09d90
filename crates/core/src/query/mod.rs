//! Query-dialect serialization
//!
//! Query expressions are JSON trees whose keys are either field names or
//! operator tokens prefixed with `$`. Only the reserved operators survive
//! serialization; UI host objects accidentally embedded in a payload are
//! replaced with sentinel strings.

pub mod options;
pub mod reduce;
pub mod serializer;
pub mod shape;

pub use options::{GroupRequest, QueryOptions};
pub use reduce::{canonicalize_reduce, ReduceFunction};
pub use serializer::{serialize_query, to_query_value};
