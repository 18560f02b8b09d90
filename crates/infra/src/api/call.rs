//! Request description for one endpoint-table row

use kinvey_core::resources::{EndpointSpec, IdSource, RequestHook};
use kinvey_core::{endpoint, to_query_value, GroupRequest, QueryOptions};
use kinvey_domain::{EntityKind, KinveyError, Result, Verb};
use serde::Serialize;
use serde_json::Value;

/// Outgoing request body.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Body {
    /// Serialized by reqwest.
    Json(Value),
    /// Already encoded JSON text (group aggregation).
    Encoded(String),
}

/// A resolved call against the endpoint table, before credentials and the
/// base URL are applied.
#[derive(Debug, Clone)]
pub(crate) struct EndpointCall {
    pub spec: &'static EndpointSpec,
    pub collection: Option<String>,
    pub entity_id: Option<String>,
    pub params: Vec<(String, String)>,
    pub body: Option<Body>,
}

impl EndpointCall {
    /// Look up the row for `kind`/`verb`.
    ///
    /// # Errors
    /// Returns `KinveyError::Internal` if the table has no such row.
    pub fn new(kind: EntityKind, verb: Verb) -> Result<Self> {
        let spec = endpoint(kind, verb)
            .ok_or_else(|| KinveyError::Internal(format!("no endpoint for {kind} {verb}")))?;

        Ok(Self {
            spec,
            collection: None,
            entity_id: None,
            params: spec.params.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
            body: None,
        })
    }

    #[must_use]
    pub fn collection(mut self, name: &str) -> Self {
        self.collection = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Append `query`/`sort`/modifier parameters.
    ///
    /// # Errors
    /// Returns `KinveyError::InvalidInput` if the endpoint takes no query,
    /// or `KinveyError::Serialization` if the filter cannot be encoded.
    pub fn options(mut self, options: &QueryOptions) -> Result<Self> {
        if self.spec.request_hook != RequestHook::SerializeQuery {
            return Err(KinveyError::InvalidInput(format!(
                "{} {} does not accept query options",
                self.spec.kind, self.spec.verb
            )));
        }
        self.params.extend(options.to_params()?);
        Ok(self)
    }

    /// Attach a JSON body, filtered the same way a query is.
    ///
    /// For endpoints whose id comes from the entity, an `_id` in the body
    /// fills the path unless an explicit id was already set.
    ///
    /// # Errors
    /// Returns `KinveyError::Serialization` if `body` cannot be encoded.
    pub fn json<T>(mut self, body: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let value = to_query_value(&serde_json::to_value(body)?);

        if self.spec.id == IdSource::Entity && self.entity_id.is_none() {
            self.entity_id = value.get("_id").and_then(id_segment);
        }

        self.body = Some(Body::Json(value));
        Ok(self)
    }

    /// Attach a group aggregation body.
    ///
    /// # Errors
    /// Returns `KinveyError::Serialization` if the request cannot be encoded.
    pub fn group(mut self, request: &GroupRequest) -> Result<Self> {
        self.body = Some(Body::Encoded(request.to_body()?));
        Ok(self)
    }

    /// Fail unless an id is available for an entity-addressed endpoint.
    ///
    /// # Errors
    /// Returns `KinveyError::InvalidInput` when the `_id` is missing.
    pub fn require_id(self) -> Result<Self> {
        if self.spec.id == IdSource::Entity
            && self.entity_id.as_deref().map_or(true, str::is_empty)
        {
            return Err(KinveyError::InvalidInput(format!(
                "{} {} requires an _id",
                self.spec.kind, self.spec.verb
            )));
        }
        Ok(self)
    }
}

fn id_segment(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
