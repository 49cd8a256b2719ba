//! Razorpay API client implementation.

use reqwest::Client;
use std::time::Duration;

use super::types::{CreateOrderRequest, Order, RazorpayErrorResponse};
use crate::crypto;

/// Timeout for gateway requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for Razorpay operations.
#[derive(Debug, thiserror::Error)]
pub enum RazorpayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Razorpay API returned an error.
    #[error("Razorpay API error: {status} - {description}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        description: String,
        /// Error code.
        code: Option<String>,
    },

    /// Invalid webhook signature.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Razorpay API client.
#[derive(Debug, Clone)]
pub struct RazorpayClient {
    client: Client,
    base_url: String,
    key_id: String,
    key_secret: String,
    webhook_secret: Option<String>,
}

impl RazorpayClient {
    /// Create a new Razorpay client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Razorpay API URL (e.g., `"https://api.razorpay.com"`)
    /// * `key_id` - API key id (`rzp_test_...` or `rzp_live_...`)
    /// * `key_secret` - API key secret
    /// * `webhook_secret` - Optional webhook signing secret
    pub fn new(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        webhook_secret: Option<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            webhook_secret,
        })
    }

    /// Create an order for a credit purchase.
    ///
    /// # Arguments
    ///
    /// * `amount` - Amount in the currency's minor unit (paise for INR)
    /// * `currency` - Currency code (e.g., "INR")
    /// * `receipt` - Receipt reference tying the order back to a purchase
    pub async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<Order, RazorpayError> {
        let url = format!("{}/v1/orders", self.base_url);
        let request = CreateOrderRequest {
            amount,
            currency: currency.to_string(),
            receipt: receipt.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch an order by ID.
    pub async fn fetch_order(&self, order_id: &str) -> Result<Order, RazorpayError> {
        let url = format!("{}/v1/orders/{}", self.base_url, order_id);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Verify a webhook signature.
    ///
    /// Razorpay signs the raw request body with HMAC-SHA256 and sends the
    /// hex digest in the `X-Razorpay-Signature` header.
    pub fn verify_webhook_signature(
        &self,
        payload: &str,
        signature: &str,
    ) -> Result<(), RazorpayError> {
        let secret = self
            .webhook_secret
            .as_ref()
            .ok_or_else(|| RazorpayError::Configuration("Webhook secret not configured".into()))?;

        if crypto::verify_signature(secret, payload, signature) {
            Ok(())
        } else {
            Err(RazorpayError::InvalidSignature)
        }
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, RazorpayError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<RazorpayErrorResponse, _> = response.json().await;

        match error_body {
            Ok(razorpay_error) => Err(RazorpayError::Api {
                status: status.as_u16(),
                description: razorpay_error.error.description,
                code: razorpay_error.error.code,
            }),
            Err(_) => Err(RazorpayError::Api {
                status: status.as_u16(),
                description: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}
