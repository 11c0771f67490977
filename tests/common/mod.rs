//! Shared helpers for integration tests.

#![allow(dead_code)]

use contentful::{AccessToken, ApiKind, BaseUrl, Client, ContentfulConfig, RetryPolicy};
use wiremock::MockServer;

pub const SPACE_ID: &str = "cfexampleapi";
pub const TOKEN: &str = "CFPAT-test-token";

/// Reads a JSON fixture from `tests/fixtures`.
pub fn fixture(name: &str) -> serde_json::Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let raw = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"));
    serde_json::from_str(&raw).unwrap()
}

/// Builds a config pointed at the mock server.
pub fn config_builder(server: &MockServer, api: ApiKind) -> contentful::ContentfulConfigBuilder {
    ContentfulConfig::builder()
        .access_token(AccessToken::new(TOKEN).unwrap())
        .api(api)
        .base_url(BaseUrl::new(server.uri()).unwrap())
}

/// A Management API client pointed at the mock server.
pub fn management_client(server: &MockServer) -> Client {
    Client::new(&config_builder(server, ApiKind::Management).build().unwrap()).unwrap()
}

/// A client with a custom retry policy.
pub fn client_with_policy(server: &MockServer, policy: RetryPolicy) -> Client {
    let config = config_builder(server, ApiKind::Management)
        .retry_policy(policy)
        .build()
        .unwrap();
    Client::new(&config).unwrap()
}

/// Environment-scoped path prefix for the default `master` environment.
pub fn env_path(suffix: &str) -> String {
    format!("/spaces/{SPACE_ID}/environments/master{suffix}")
}
