use std::time::Duration;

use kinvey_domain::constants::{API_VERSION, API_VERSION_HEADER, DEFAULT_TIMEOUT_SECS};
use kinvey_domain::{ClientConfig, KinveyError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;
use url::Url;

use crate::errors::InfraError;

/// Delay before the first retry; doubled for each retry after that.
const RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// Transport for the Kinvey REST API.
///
/// Every request carries `X-Kinvey-API-Version`; callers add the
/// `Authorization` value per request. A single attempt is the default.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Transport configured from `config`'s timeout, attempts and API version.
    ///
    /// # Errors
    /// Returns `KinveyError::Config` if the TLS backend cannot be initialized.
    pub fn from_config(config: &ClientConfig) -> Result<Self, KinveyError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .api_version(config.api_version)
            .user_agent(concat!("kinvey-client/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send `builder`, retrying idempotent requests when more than one
    /// attempt is configured.
    ///
    /// Only transport failures and 5xx responses are retried. `POST` is
    /// never retried: login, signup and create would run twice.
    ///
    /// # Errors
    /// Returns `KinveyError::Network` when no response arrives.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, KinveyError> {
        let request = builder.build().map_err(into_kinvey)?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let attempts = if is_idempotent(&method) { self.max_attempts } else { 1 };

        let mut pending = Some(request);
        let mut attempt = 1;

        while let Some(current) = pending.take() {
            if attempt < attempts {
                pending = current.try_clone();
            }

            debug!(attempt, %method, %path, "sending HTTP request");

            match self.client.execute(current).await {
                Ok(response) if response.status().is_server_error() && pending.is_some() => {
                    debug!(attempt, %method, %path, status = %response.status(), "retrying");
                }
                Ok(response) => return Ok(response),
                Err(err) if pending.is_some() && is_transient(&err) => {
                    debug!(attempt, %method, %path, error = %err, "retrying");
                }
                Err(err) => return Err(into_kinvey(err)),
            }

            tokio::time::sleep(backoff(attempt)).await;
            attempt += 1;
        }

        Err(KinveyError::Internal("request was consumed without being sent".into()))
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    api_version: u32,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: 1,
            api_version: API_VERSION,
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts (initial try + retries) for idempotent calls.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn api_version(mut self, version: u32) -> Self {
        self.api_version = version;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, KinveyError> {
        let name = HeaderName::from_bytes(API_VERSION_HEADER.as_bytes())
            .map_err(|err| KinveyError::Config(format!("invalid header name: {err}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from(self.api_version));

        let mut builder =
            ReqwestClient::builder().timeout(self.timeout).default_headers(headers).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(into_kinvey)?;

        Ok(HttpClient { client, max_attempts: self.max_attempts })
    }
}

fn into_kinvey(err: reqwest::Error) -> KinveyError {
    KinveyError::from(InfraError::from(err))
}

fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::PUT | Method::DELETE | Method::OPTIONS)
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

fn backoff(attempt: usize) -> Duration {
    let shift = attempt.saturating_sub(1).min(5);
    RETRY_BACKOFF.saturating_mul(1 << shift)
}
