//! Common test utilities for pixgen integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;
use wiremock::MockServer;

use pixgen_service::{create_router, AppState, ServiceConfig};
use pixgen_store::RocksStore;

/// Webhook signing secret shared by harness config and tests.
pub const WEBHOOK_SECRET: &str = "test-webhook-secret";

/// Starting balance for freshly registered test users.
pub const TEST_SIGNUP_CREDITS: i64 = 5;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Mock Razorpay API.
    pub gateway: MockServer,
    /// Mock Clipdrop API.
    pub imagegen: MockServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database and mock upstreams.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RocksStore::open(temp_dir.path()).expect("Failed to open store");

        let gateway = MockServer::start().await;
        let imagegen = MockServer::start().await;

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            jwt_secret: "test-secret".into(),
            token_ttl_hours: 24,
            signup_credits: TEST_SIGNUP_CREDITS,
            razorpay_key_id: Some("rzp_test_key".into()),
            razorpay_key_secret: Some("rzp_test_secret".into()),
            razorpay_webhook_secret: Some(WEBHOOK_SECRET.into()),
            razorpay_base_url: gateway.uri(),
            clipdrop_api_key: Some("clipdrop-test-key".into()),
            clipdrop_base_url: imagegen.uri(),
            currency: "INR".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 10 * 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::new(store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            gateway,
            imagegen,
            _temp_dir: temp_dir,
        }
    }

    /// Register a user and return their access token.
    pub async fn register_user(&self, name: &str, email: &str) -> String {
        let response = self
            .server
            .post("/v1/users/register")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": "password123",
            }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["token"]
            .as_str()
            .expect("register returns a token")
            .to_string()
    }

    /// Authorization header value for a token.
    pub fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }
}
