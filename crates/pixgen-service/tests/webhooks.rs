//! Razorpay webhook integration tests.

mod common;

use axum::http::StatusCode;
use common::{TestHarness, TEST_SIGNUP_CREDITS, WEBHOOK_SECRET};
use pixgen_service::crypto::hmac_sha256_hex;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// Register a user, initiate an Advanced purchase against `order_id`, and
/// return the token plus the purchase's receipt reference.
async fn setup_unpaid_purchase(harness: &TestHarness, order_id: &str) -> (String, String) {
    let token = harness.register_user("Ada", "ada@example.com").await;

    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": order_id,
            "amount": 5000,
            "currency": "INR",
            "status": "created",
        })))
        .mount(&harness.gateway)
        .await;

    harness
        .server
        .post("/v1/credits/purchase")
        .add_header("authorization", TestHarness::bearer(&token))
        .json(&json!({ "plan": "Advanced" }))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get("/v1/credits/purchases")
        .add_header("authorization", TestHarness::bearer(&token))
        .await;
    let history: serde_json::Value = response.json();
    let receipt = history["purchases"][0]["id"]
        .as_str()
        .expect("purchase id present")
        .to_string();

    (token, receipt)
}

/// Mount a fetch-order mock reporting the order as paid.
async fn mock_paid_order(harness: &TestHarness, order_id: &str, receipt: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/orders/{order_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": order_id,
            "amount": 5000,
            "amount_paid": 5000,
            "currency": "INR",
            "receipt": receipt,
            "status": "paid",
        })))
        .mount(&harness.gateway)
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
// Signature Verification
// ============================================================================

#[tokio::test]
async fn webhook_with_valid_signature_settles_purchase() {
    let harness = TestHarness::new().await;
    let (token, receipt) = setup_unpaid_purchase(&harness, "order_wh_1").await;
    mock_paid_order(&harness, "order_wh_1", &receipt).await;

    let body = serde_json::to_string(&json!({
        "event": "order.paid",
        "payload": { "order": { "entity": { "id": "order_wh_1", "status": "paid" } } }
    }))
    .unwrap();
    let signature = hmac_sha256_hex(WEBHOOK_SECRET, &body);

    let response = harness
        .server
        .post("/webhooks/razorpay")
        .add_header("x-razorpay-signature", signature)
        .text(body)
        .await;

    response.assert_status_ok();
    let ack: serde_json::Value = response.json();
    assert_eq!(ack["received"], true);

    assert_eq!(get_balance(&harness, &token).await, TEST_SIGNUP_CREDITS + 500);
}

#[tokio::test]
async fn webhook_with_bad_signature_is_rejected() {
    let harness = TestHarness::new().await;
    let (token, receipt) = setup_unpaid_purchase(&harness, "order_wh_2").await;
    mock_paid_order(&harness, "order_wh_2", &receipt).await;

    let body = serde_json::to_string(&json!({
        "event": "order.paid",
        "payload": { "order": { "entity": { "id": "order_wh_2", "status": "paid" } } }
    }))
    .unwrap();

    let response = harness
        .server
        .post("/webhooks/razorpay")
        .add_header("x-razorpay-signature", "deadbeef")
        .text(body)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // The forged delivery settled nothing
    assert_eq!(get_balance(&harness, &token).await, TEST_SIGNUP_CREDITS);
}

#[tokio::test]
async fn webhook_without_signature_is_rejected() {
    let harness = TestHarness::new().await;

    let body = serde_json::to_string(&json!({ "event": "order.paid", "payload": {} })).unwrap();

    let response = harness.server.post("/webhooks/razorpay").text(body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Settlement Semantics
// ============================================================================

#[tokio::test]
async fn webhook_replay_acks_without_double_credit() {
    let harness = TestHarness::new().await;
    let (token, receipt) = setup_unpaid_purchase(&harness, "order_wh_3").await;
    mock_paid_order(&harness, "order_wh_3", &receipt).await;

    let body = serde_json::to_string(&json!({
        "event": "order.paid",
        "payload": { "order": { "entity": { "id": "order_wh_3", "status": "paid" } } }
    }))
    .unwrap();
    let signature = hmac_sha256_hex(WEBHOOK_SECRET, &body);

    for _ in 0..2 {
        let response = harness
            .server
            .post("/webhooks/razorpay")
            .add_header("x-razorpay-signature", signature.clone())
            .text(body.clone())
            .await;

        // Replays are acknowledged so the gateway stops retrying
        response.assert_status_ok();
    }

    assert_eq!(get_balance(&harness, &token).await, TEST_SIGNUP_CREDITS + 500);
}

#[tokio::test]
async fn payment_captured_event_settles_purchase() {
    let harness = TestHarness::new().await;
    let (token, receipt) = setup_unpaid_purchase(&harness, "order_wh_4").await;
    mock_paid_order(&harness, "order_wh_4", &receipt).await;

    let body = serde_json::to_string(&json!({
        "event": "payment.captured",
        "payload": { "payment": { "entity": { "id": "pay_1", "order_id": "order_wh_4" } } }
    }))
    .unwrap();
    let signature = hmac_sha256_hex(WEBHOOK_SECRET, &body);

    let response = harness
        .server
        .post("/webhooks/razorpay")
        .add_header("x-razorpay-signature", signature)
        .text(body)
        .await;

    response.assert_status_ok();
    assert_eq!(get_balance(&harness, &token).await, TEST_SIGNUP_CREDITS + 500);
}

#[tokio::test]
async fn unhandled_event_is_acknowledged() {
    let harness = TestHarness::new().await;

    let body = serde_json::to_string(&json!({
        "event": "payment.authorized",
        "payload": {}
    }))
    .unwrap();
    let signature = hmac_sha256_hex(WEBHOOK_SECRET, &body);

    let response = harness
        .server
        .post("/webhooks/razorpay")
        .add_header("x-razorpay-signature", signature)
        .text(body)
        .await;

    response.assert_status_ok();
    let ack: serde_json::Value = response.json();
    assert_eq!(ack["received"], true);
}
