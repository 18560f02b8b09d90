//! Kinvey client
//!
//! Owns the credential manager, the HTTP transport, and the alias registry.
//! Every resource call goes through [`KinveyClient::execute`], which resolves
//! the endpoint row into a URL, snapshots the `Authorization` value, and applies
//! the row's response hook.

use std::sync::Arc;

use kinvey_core::resources::{resource_segments, rpc_segments, ResponseHook};
use kinvey_core::{session, AliasRegistry, CredentialManager, RpcAction, TokenStore};
use kinvey_domain::constants::APPDATA_PREFIX;
use kinvey_domain::{AuthMode, ClientConfig, HttpMethod, KinveyError, Result, SessionEvent};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::call::{Body, EndpointCall};
use super::resources::{Collection, Groups, Users};
use crate::errors::{status_error, InfraError};
use crate::http::HttpClient;

/// Authenticated client for one Kinvey app.
///
/// Cheap to clone; clones share credentials, transport, and aliases.
#[derive(Clone)]
pub struct KinveyClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: Url,
    http: HttpClient,
    credentials: CredentialManager,
    token_store: Arc<dyn TokenStore>,
    aliases: AliasRegistry,
}

/// Status, URL, and body text of a completed exchange.
struct RawResponse {
    status: StatusCode,
    url: String,
    text: String,
}

impl RawResponse {
    fn status_error(&self) -> KinveyError {
        status_error(self.status, &self.url, &self.text)
    }

    fn into_json(self) -> Result<Value> {
        if !self.status.is_success() {
            let err = self.status_error();
            warn!(status = %self.status, url = %self.url, "request failed");
            return Err(err);
        }
        parse_body(&self.text)
    }
}

impl KinveyClient {
    /// Build a client from `config`, persisting sessions to `token_store`.
    ///
    /// # Errors
    /// Returns `KinveyError::Config` for a missing key/secret or a base URL
    /// that cannot be parsed. No network activity happens here.
    pub fn new(config: ClientConfig, token_store: Arc<dyn TokenStore>) -> Result<Self> {
        let credentials = CredentialManager::from_config(&config)?;

        let base_url = Url::parse(&config.normalized_base_url()).map_err(|err| {
            KinveyError::Config(format!("invalid base URL '{}': {err}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(KinveyError::Config(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = HttpClient::from_config(&config)?;

        debug!(app_key = %config.app_key, base_url = %base_url, "kinvey client created");

        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url,
                http,
                credentials,
                token_store,
                aliases: AliasRegistry::new(),
            }),
        })
    }

    /// Build a client from the environment or a config file.
    ///
    /// # Errors
    /// Returns `KinveyError::Config` if no usable configuration is found.
    pub fn from_config(token_store: Arc<dyn TokenStore>) -> Result<Self> {
        Self::new(crate::config::load()?, token_store)
    }

    pub fn app_key(&self) -> &str {
        self.inner.credentials.app_key()
    }

    pub fn credentials(&self) -> &CredentialManager {
        &self.inner.credentials
    }

    /// Reinstall a session token persisted by an earlier login.
    ///
    /// Returns `true` if a token was found and installed.
    ///
    /// # Errors
    /// Propagates the token store's `KinveyError::Storage`.
    #[instrument(skip(self), fields(app_key = %self.app_key()))]
    pub async fn restore_session(&self) -> Result<bool> {
        let key = self.inner.credentials.storage_key();
        match self.inner.token_store.load(&key).await? {
            Some(value) if !value.trim().is_empty() => {
                self.inner.credentials.restore(&value);
                info!("session restored from token store");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// `GET appdata/{appKey}` with the session header.
    ///
    /// # Errors
    /// Propagates transport and status errors unmodified.
    #[instrument(skip(self), fields(app_key = %self.app_key()))]
    pub async fn handshake(&self) -> Result<Value> {
        let segments = vec![
            APPDATA_PREFIX.trim_end_matches('/').to_string(),
            self.app_key().to_string(),
        ];
        let url = self.url_for(&segments, &[])?;
        let authorization = self.inner.credentials.authorization(AuthMode::Session);

        self.send(HttpMethod::Get, url, authorization, None).await?.into_json()
    }

    pub fn users(&self) -> Users {
        Users::new(self.clone())
    }

    pub fn groups(&self) -> Groups {
        Groups::new(self.clone())
    }

    /// Handle on the named collection under `appdata/{appKey}/`.
    pub fn collection(&self, name: impl Into<String>) -> Collection {
        Collection::new(self.clone(), name.into())
    }

    /// Register `alias` for `collection`.
    ///
    /// # Errors
    /// Returns `KinveyError::NameCollision` if `alias` shadows one of the
    /// client's own names; nothing is registered in that case.
    pub fn alias(&self, collection: &str, alias: &str) -> Result<Collection> {
        self.inner.aliases.register(collection, alias)?;
        Ok(self.collection(collection))
    }

    /// Collection previously registered under `alias`.
    pub fn aliased(&self, alias: &str) -> Option<Collection> {
        self.inner.aliases.resolve(alias).map(|name| self.collection(name))
    }

    /// Run one endpoint-table call.
    #[instrument(
        skip(self, call),
        fields(kind = %call.spec.kind, verb = %call.spec.verb, method = %call.spec.method)
    )]
    pub(crate) async fn execute(&self, call: EndpointCall) -> Result<Value> {
        let segments = resource_segments(
            call.spec,
            self.app_key(),
            call.collection.as_deref(),
            call.entity_id.as_deref(),
        )?;
        let url = self.url_for(&segments, &call.params)?;
        let authorization = self.inner.credentials.authorization(call.spec.auth);

        let raw = self.send(call.spec.method, url, authorization, call.body).await?;

        match call.spec.response_hook {
            ResponseHook::None => raw.into_json(),
            ResponseHook::StoreSession => self.store_session(raw).await,
            ResponseHook::ClearSession => self.clear_session(raw).await,
        }
    }

    /// `POST rpc/{appKey}[/{username}]/{action}` with the basic header.
    #[instrument(skip(self, body), fields(action = %action))]
    pub(crate) async fn rpc(
        &self,
        action: RpcAction,
        username: Option<&str>,
        body: Value,
    ) -> Result<Value> {
        let segments = rpc_segments(action, self.app_key(), username)?;
        let url = self.url_for(&segments, &[])?;
        let authorization = self.inner.credentials.authorization(AuthMode::Basic);

        self.send(HttpMethod::Post, url, authorization, Some(Body::Json(body)))
            .await?
            .into_json()
    }

    async fn store_session(&self, raw: RawResponse) -> Result<Value> {
        let body = match parse_body(&raw.text) {
            Ok(body) if raw.status.is_success() || carries_error(&body) => body,
            Err(err) if raw.status.is_success() => return Err(err),
            _ => return Err(raw.status_error()),
        };

        let event = self.inner.credentials.on_auth_response(&body).inspect_err(|err| {
            warn!(status = %raw.status, error = %err, "authentication rejected");
        })?;
        self.persist(&event).await;

        Ok(body)
    }

    async fn clear_session(&self, raw: RawResponse) -> Result<Value> {
        // Any answer from the server ends the local session.
        let event = self.inner.credentials.on_logout();
        self.persist(&event).await;

        raw.into_json()
    }

    async fn persist(&self, event: &SessionEvent) {
        if let Err(err) = session::persist(self.inner.token_store.as_ref(), event).await {
            warn!(key = %event.key(), error = %err, "failed to persist session credential");
        }
    }

    fn url_for(&self, segments: &[String], params: &[(String, String)]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| KinveyError::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    async fn send(
        &self,
        method: HttpMethod,
        url: Url,
        authorization: String,
        body: Option<Body>,
    ) -> Result<RawResponse> {
        let url_text = url.to_string();
        let mut request = self
            .inner
            .http
            .request(to_reqwest_method(method), url)
            .header(AUTHORIZATION, authorization);

        request = match body {
            Some(Body::Json(value)) => request.json(&value),
            Some(Body::Encoded(text)) => request.header(CONTENT_TYPE, "application/json").body(text),
            None => request,
        };

        let response = self.inner.http.send(request).await.inspect_err(|err| {
            warn!(%method, url = %url_text, error = %err, "request did not complete");
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| KinveyError::from(InfraError::from(err)))?;

        debug!(%method, url = %url_text, %status, bytes = text.len(), "response received");

        Ok(RawResponse { status, url: url_text, text })
    }
}

impl std::fmt::Debug for KinveyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KinveyClient")
            .field("app_key", &self.app_key())
            .field("base_url", &self.inner.base_url.as_str())
            .field("authenticated", &self.inner.credentials.is_authenticated())
            .finish_non_exhaustive()
    }
}

const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Empty bodies decode to `null`.
fn parse_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

fn carries_error(body: &Value) -> bool {
    body.get("error").is_some_and(kinvey_core::query::shape::is_truthy)
}
