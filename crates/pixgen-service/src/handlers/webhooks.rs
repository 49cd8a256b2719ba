//! Webhook handlers for Razorpay.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::credits;
use crate::state::AppState;

/// Razorpay webhook payload (simplified).
#[derive(Debug, Deserialize)]
pub struct RazorpayWebhook {
    /// Event type (e.g., "order.paid").
    pub event: String,
    /// Event payload, shaped per event type.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Whether the webhook was processed.
    pub received: bool,
}

/// Handle Razorpay webhooks.
pub async fn razorpay_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<WebhookResponse>, ApiError> {
    let signature = headers
        .get("x-razorpay-signature")
        .and_then(|v| v.to_str().ok());

    // Verify signature if webhook_secret is configured
    if state.config.razorpay_webhook_secret.is_some() {
        let sig =
            signature.ok_or_else(|| ApiError::BadRequest("Missing Razorpay signature".into()))?;

        if let Some(gateway) = &state.gateway {
            gateway.verify_webhook_signature(&body, sig).map_err(|e| {
                tracing::warn!(error = %e, "Invalid Razorpay webhook signature");
                ApiError::Unauthorized
            })?;
        } else {
            tracing::warn!(
                "Razorpay webhook_secret configured but client not available - skipping verification"
            );
        }
    } else {
        // No webhook_secret configured - skip verification (development mode)
        tracing::warn!("Razorpay webhook_secret not configured - skipping signature verification");
    }

    // Parse webhook payload
    let webhook: RazorpayWebhook =
        serde_json::from_str(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    tracing::info!(event = %webhook.event, "Received Razorpay webhook");

    match webhook.event.as_str() {
        "order.paid" => {
            let order_id = webhook
                .payload
                .get("order")
                .and_then(|o| o.get("entity"))
                .and_then(|e| e.get("id"))
                .and_then(|v| v.as_str())
                .ok_or_else(|| ApiError::BadRequest("Missing order id in payload".into()))?;

            settle_from_webhook(&state, order_id).await?;
        }
        "payment.captured" => {
            let order_id = webhook
                .payload
                .get("payment")
                .and_then(|p| p.get("entity"))
                .and_then(|e| e.get("order_id"))
                .and_then(|v| v.as_str())
                .ok_or_else(|| ApiError::BadRequest("Missing order id in payload".into()))?;

            settle_from_webhook(&state, order_id).await?;
        }
        _ => {
            tracing::debug!(event = %webhook.event, "Unhandled Razorpay event");
        }
    }

    Ok(Json(WebhookResponse { received: true }))
}

/// Settle an order delivered by webhook.
///
/// Replays for an already-settled purchase are acknowledged so the
/// gateway stops retrying; every other failure propagates.
async fn settle_from_webhook(state: &AppState, order_id: &str) -> Result<(), ApiError> {
    match credits::settle_order(state, order_id).await {
        Ok(_) => Ok(()),
        Err(ApiError::AlreadyProcessed(transaction_id)) => {
            tracing::info!(
                order_id = %order_id,
                transaction_id = %transaction_id,
                "Webhook replay for settled purchase"
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}
