#![allow(dead_code)]

use std::sync::Arc;

use kinvey_domain::ClientConfig;
use kinvey_infra::{KinveyClient, MemoryTokenStore};
use wiremock::MockServer;

pub const APP_KEY: &str = "kid_app";
pub const APP_SECRET: &str = "secret";
/// `Basic base64("kid_app:secret")`
pub const BASIC_AUTH: &str = "Basic a2lkX2FwcDpzZWNyZXQ=";
pub const STORAGE_KEY: &str = "kid_app:authToken";

/// Client pointed at a wiremock server, with the token store it persists to.
pub struct TestClient {
    pub client: KinveyClient,
    pub store: Arc<MemoryTokenStore>,
}

impl TestClient {
    pub fn new(server: &MockServer) -> Self {
        Self::with_store(server, MemoryTokenStore::new())
    }

    pub fn with_store(server: &MockServer, store: MemoryTokenStore) -> Self {
        kinvey_infra::logging::init_test_tracing();

        let store = Arc::new(store);
        let config = ClientConfig::new(APP_KEY, APP_SECRET).with_base_url(server.uri());
        let client =
            KinveyClient::new(config, store.clone()).expect("client should build for mock server");

        Self { client, store }
    }
}
