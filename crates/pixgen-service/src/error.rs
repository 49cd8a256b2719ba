//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - resource already exists or invalid state transition.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Insufficient credits.
    #[error("insufficient credits: balance={balance}, required={required}")]
    InsufficientCredits {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// Payment for the gateway order has not completed.
    #[error("payment not completed: order status is {status}")]
    PaymentIncomplete {
        /// Order status reported by the gateway.
        status: String,
    },

    /// Transaction already settled (idempotency).
    #[error("transaction already processed: {0}")]
    AlreadyProcessed(String),

    /// Payment gateway error.
    #[error("payment gateway error: {0}")]
    Gateway(String),

    /// Image generation upstream error.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
            Self::InsufficientCredits { balance, required } => (
                StatusCode::PAYMENT_REQUIRED,
                "insufficient_credits",
                self.to_string(),
                Some(serde_json::json!({
                    "balance": balance,
                    "required": required
                })),
            ),
            Self::PaymentIncomplete { status } => (
                StatusCode::PAYMENT_REQUIRED,
                "payment_incomplete",
                self.to_string(),
                Some(serde_json::json!({ "status": status })),
            ),
            Self::AlreadyProcessed(id) => (
                StatusCode::CONFLICT,
                "already_processed",
                format!("Transaction {id} already processed"),
                None,
            ),
            Self::Gateway(msg) => (
                StatusCode::BAD_GATEWAY,
                "payment_gateway_error",
                msg.clone(),
                None,
            ),
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg.clone(), None),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<pixgen_store::StoreError> for ApiError {
    fn from(err: pixgen_store::StoreError) -> Self {
        match err {
            pixgen_store::StoreError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            pixgen_store::StoreError::EmailExists { email } => {
                Self::Conflict(format!("email already registered: {email}"))
            }
            pixgen_store::StoreError::InsufficientCredits { balance, required } => {
                Self::InsufficientCredits { balance, required }
            }
            pixgen_store::StoreError::AlreadySettled { transaction_id } => {
                Self::AlreadyProcessed(transaction_id)
            }
            pixgen_store::StoreError::Database(msg)
            | pixgen_store::StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}
