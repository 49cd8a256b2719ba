//! Image generation integration tests.

mod common;

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{TestHarness, TEST_SIGNUP_CREDITS};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// A minimal stand-in for rendered PNG output.
const FAKE_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01, 0x02];

/// Mount a successful text-to-image mock.
async fn mock_generation_success(harness: &TestHarness) {
    Mock::given(method("POST"))
        .and(path("/text-to-image/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FAKE_PNG.to_vec(), "image/png"))
        .mount(&harness.imagegen)
        .await;
}

/// Fetch the caller's balance.
async fn get_balance(harness: &TestHarness, token: &str) -> i64 {
    let response = harness
        .server
        .get("/v1/credits/balance")
        .add_header("authorization", TestHarness::bearer(token))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    body["credits"].as_i64().expect("credits is a number")
}

// ============================================================================
// Generation
// ============================================================================

#[tokio::test]
async fn generate_image_debits_one_credit() {
    let harness = TestHarness::new().await;
    let token = harness.register_user("Ada", "ada@example.com").await;

    mock_generation_success(&harness).await;

    let response = harness
        .server
        .post("/v1/images/generate")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "prompt": "a fox in a teacup" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["credit_balance"], TEST_SIGNUP_CREDITS - 1);
    assert_eq!(
        body["result_image"],
        format!("data:image/png;base64,{}", STANDARD.encode(FAKE_PNG))
    );

    assert_eq!(get_balance(&harness, &token).await, TEST_SIGNUP_CREDITS - 1);
}

#[tokio::test]
async fn upstream_failure_costs_nothing() {
    let harness = TestHarness::new().await;
    let token = harness.register_user("Ada", "ada@example.com").await;

    Mock::given(method("POST"))
        .and(path("/text-to-image/v1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "render failed" })))
        .mount(&harness.imagegen)
        .await;

    let response = harness
        .server
        .post("/v1/images/generate")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "prompt": "a fox in a teacup" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "upstream_error");

    // The failed generation was not charged
    assert_eq!(get_balance(&harness, &token).await, TEST_SIGNUP_CREDITS);
}

#[tokio::test]
async fn drained_balance_is_rejected_with_balance() {
    let harness = TestHarness::new().await;
    let token = harness.register_user("Ada", "ada@example.com").await;

    mock_generation_success(&harness).await;

    // Spend every signup credit
    for _ in 0..TEST_SIGNUP_CREDITS {
        harness
            .server
            .post("/v1/images/generate")
            .add_header("authorization", TestHarness::bearer(&token))
            .json(&json!({ "prompt": "a fox in a teacup" }))
            .await
            .assert_status_ok();
    }

    let response = harness
        .server
        .post("/v1/images/generate")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "prompt": "a fox in a teacup" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "insufficient_credits");
    assert_eq!(body["error"]["details"]["balance"], 0);

    assert_eq!(get_balance(&harness, &token).await, 0);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn empty_prompt_is_rejected() {
    let harness = TestHarness::new().await;
    let token = harness.register_user("Ada", "ada@example.com").await;

    let response = harness
        .server
        .post("/v1/images/generate")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "prompt": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = harness
        .server
        .post("/v1/images/generate")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_requires_auth() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/v1/images/generate")
        .json(&json!({ "prompt": "a fox in a teacup" }))
        .await;

    response.assert_status_unauthorized();
}
