//! Common test utilities for identity-wallet integration tests
//!
//! - mock HTTP servers standing in for the registry, insight and core APIs
//! - API settings pointed at a mock server
//! - clients for full and web-app deployments

#![allow(dead_code)]

use httpmock::MockServer;
use identity_wallet::config::{ApiSettings, DeploymentMode};
use identity_wallet::http::ApiClient;

pub const TEST_PHRASE: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

pub const CORE_API_PASSWORD: &str = "blockstack_integration_test_api_password";

/// Initialize logging once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// API settings with both the registry and the core API on `server`
pub fn mock_api(server: &MockServer) -> ApiSettings {
    let base = server.base_url();
    let mut api = ApiSettings::with_bases(&base, &base);
    api.core_api_password = CORE_API_PASSWORD.to_string();
    api
}

/// Client for a full deployment with the core API on `server`
pub fn full_client(server: &MockServer) -> ApiClient {
    ApiClient::new(DeploymentMode::Full, &server.base_url()).expect("Failed to create client")
}

/// Client for a web-app deployment whose core API is `server`
pub fn webapp_client(server: &MockServer) -> ApiClient {
    ApiClient::new(DeploymentMode::Webapp, &server.base_url()).expect("Failed to create client")
}
