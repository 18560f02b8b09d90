//! Request-side query options and aggregation bodies

use kinvey_domain::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::reduce::ReduceFunction;
use super::serializer::serialize_query;

/// Modifiers accepted by `query`, `count`, and query-scoped `delete`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying only a filter.
    pub fn filter(query: Value) -> Self {
        Self { query: Some(query), ..Self::default() }
    }

    #[must_use]
    pub fn sort(mut self, sort: Value) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.sort.is_none()
            && self.fields.is_empty()
            && self.limit.is_none()
            && self.skip.is_none()
    }

    /// Query-string pairs; `query` and `sort` go through the query serializer.
    ///
    /// # Errors
    /// Returns `KinveyError::Serialization` if a filter cannot be encoded.
    pub fn to_params(&self) -> Result<Vec<(String, String)>> {
        let mut params = Vec::new();
        if let Some(query) = &self.query {
            params.push(("query".to_string(), serialize_query(query, false)?));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), serialize_query(sort, false)?));
        }
        if !self.fields.is_empty() {
            params.push(("fields".to_string(), self.fields.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(skip) = self.skip {
            params.push(("skip".to_string(), skip.to_string()));
        }
        Ok(params)
    }
}

/// Body of a `_group` aggregation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRequest {
    /// Fields to group by, e.g. `{"category": true}`.
    pub key: Value,
    /// Initial accumulator.
    pub initial: Value,
    pub reduce: ReduceFunction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
}

impl GroupRequest {
    pub fn new(key: Value, initial: Value, reduce: impl Into<ReduceFunction>) -> Self {
        Self { key, initial, reduce: reduce.into(), condition: None }
    }

    #[must_use]
    pub fn condition(mut self, condition: Value) -> Self {
        self.condition = Some(condition);
        self
    }

    /// JSON body with a canonical reduce and a filtered condition.
    ///
    /// # Errors
    /// Returns `KinveyError::Serialization` if the body cannot be encoded.
    pub fn to_body(&self) -> Result<String> {
        serialize_query(self, false)
    }
}
