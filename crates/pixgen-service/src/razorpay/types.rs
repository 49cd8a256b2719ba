//! Razorpay API types.

use serde::{Deserialize, Serialize};

/// Request body for creating an order.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    /// Amount in the currency's minor unit (paise for INR).
    pub amount: i64,
    /// Currency code (e.g., "INR").
    pub currency: String,
    /// Receipt reference, echoed back on the order.
    pub receipt: String,
}

/// Razorpay order object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order ID (`order_...`).
    pub id: String,
    /// Amount in the currency's minor unit.
    #[serde(default)]
    pub amount: i64,
    /// Amount already paid, in the minor unit.
    #[serde(default)]
    pub amount_paid: i64,
    /// Currency code.
    #[serde(default)]
    pub currency: String,
    /// Receipt reference supplied at creation.
    #[serde(default)]
    pub receipt: Option<String>,
    /// Order status: "created", "attempted", or "paid".
    #[serde(default)]
    pub status: String,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created_at: i64,
}

impl Order {
    /// Whether payment for this order has completed.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == "paid"
    }
}

/// Razorpay API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorResponse {
    /// Error details.
    pub error: RazorpayErrorDetail,
}

/// Razorpay error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorDetail {
    /// Error code (e.g., `BAD_REQUEST_ERROR`).
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}
