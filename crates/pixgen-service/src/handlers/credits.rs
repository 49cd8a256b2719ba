//! Credit balance, purchase, and settlement handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use pixgen_core::{Plan, Purchase, TransactionId};
use pixgen_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::users::UserSummary;
use crate::razorpay::Order;
use crate::state::AppState;

/// Minor units per currency unit (paise per rupee).
const MINOR_UNITS_PER_UNIT: i64 = 100;

/// Balance response.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Always true on this path.
    pub success: bool,
    /// Current credit balance.
    pub credits: i64,
    /// The account owner.
    pub user: UserSummary,
}

/// Get current credit balance.
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<BalanceResponse>, ApiError> {
    let user = state
        .store
        .get_user(&auth.user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(BalanceResponse {
        success: true,
        credits: user.credit_balance,
        user: UserSummary { name: user.name },
    }))
}

/// Purchase request.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    /// Plan name: "Basic", "Advanced", or "Business".
    pub plan: Option<String>,
}

/// Purchase response.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    /// Always true on this path.
    pub success: bool,
    /// The gateway order to complete payment against.
    pub order: Order,
}

/// Initiate a credit purchase.
///
/// Records an unpaid purchase, then creates a gateway order carrying the
/// purchase id as its receipt reference. Settlement later finds the
/// purchase through that reference. If order creation fails the unpaid
/// purchase stays behind; it can never be credited without a paid order.
pub async fn purchase_credits(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let plan_name = body
        .plan
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("plan is required".into()))?;

    let plan = plan_name
        .parse::<Plan>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // Verify the gateway is configured before touching the store
    let gateway = state
        .gateway
        .as_ref()
        .ok_or_else(|| ApiError::Gateway("Payment gateway not configured".into()))?;

    // Verify the user exists
    state
        .store
        .get_user(&auth.user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let purchase = Purchase::new(auth.user_id, plan);
    state.store.put_purchase(&purchase)?;

    let amount_minor = purchase.amount_units * MINOR_UNITS_PER_UNIT;

    let order = gateway
        .create_order(amount_minor, &state.config.currency, &purchase.receipt())
        .await
        .map_err(|e| {
            tracing::error!(
                user_id = %auth.user_id,
                transaction_id = %purchase.id,
                error = %e,
                "Failed to create gateway order"
            );
            ApiError::Gateway(format!("Failed to create order: {e}"))
        })?;

    tracing::info!(
        user_id = %auth.user_id,
        transaction_id = %purchase.id,
        order_id = %order.id,
        plan = %plan,
        amount_minor = %amount_minor,
        "Purchase initiated"
    );

    Ok(Json(PurchaseResponse {
        success: true,
        order,
    }))
}

/// Settle the purchase behind a gateway order.
///
/// Fetches the order, requires payment to have completed, then resolves
/// the order's receipt reference to a purchase and settles it. Both the
/// verify endpoint and the webhook go through here.
pub(crate) async fn settle_order(state: &AppState, order_id: &str) -> Result<i64, ApiError> {
    let gateway = state
        .gateway
        .as_ref()
        .ok_or_else(|| ApiError::Gateway("Payment gateway not configured".into()))?;

    let order = gateway.fetch_order(order_id).await.map_err(|e| {
        tracing::error!(order_id = %order_id, error = %e, "Failed to fetch gateway order");
        ApiError::Gateway(format!("Failed to fetch order: {e}"))
    })?;

    if !order.is_paid() {
        return Err(ApiError::PaymentIncomplete {
            status: order.status,
        });
    }

    let receipt = order
        .receipt
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Order has no receipt reference".into()))?;

    let transaction_id = receipt.parse::<TransactionId>().map_err(|_| {
        ApiError::BadRequest("Order receipt does not reference a purchase".into())
    })?;

    let balance = state.store.settle_purchase(&transaction_id)?;

    tracing::info!(
        order_id = %order_id,
        transaction_id = %transaction_id,
        balance = %balance,
        "Purchase settled"
    );

    Ok(balance)
}

/// Settlement verification request.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Gateway order id returned by the purchase endpoint.
    pub order_id: Option<String>,
}

/// Settlement verification response.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    /// Always true on this path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Balance after the credit grant.
    pub balance: i64,
}

/// Verify a payment and credit the purchase.
pub async fn verify_purchase(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let order_id = body
        .order_id
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("order_id is required".into()))?;

    let balance = settle_order(&state, order_id).await?;

    Ok(Json(VerifyResponse {
        success: true,
        message: "Credits added".into(),
        balance,
    }))
}

/// Purchase history query parameters.
#[derive(Debug, Deserialize)]
pub struct ListPurchasesQuery {
    /// Maximum number of purchases to return (default: 50).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// Purchase history entry.
#[derive(Debug, Serialize)]
pub struct PurchaseHistoryItem {
    /// Transaction id.
    pub id: String,
    /// Plan name.
    pub plan: String,
    /// Credits granted on settlement.
    pub credits: i64,
    /// Price in currency units.
    pub amount_units: i64,
    /// Whether the purchase has been paid and credited.
    pub paid: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<&Purchase> for PurchaseHistoryItem {
    fn from(purchase: &Purchase) -> Self {
        Self {
            id: purchase.id.to_string(),
            plan: purchase.plan.name().to_string(),
            credits: purchase.credits,
            amount_units: purchase.amount_units,
            paid: purchase.paid,
            created_at: purchase.created_at.to_rfc3339(),
        }
    }
}

/// Purchase history response.
#[derive(Debug, Serialize)]
pub struct ListPurchasesResponse {
    /// Always true on this path.
    pub success: bool,
    /// Purchases (newest first).
    pub purchases: Vec<PurchaseHistoryItem>,
    /// Whether there are more purchases.
    pub has_more: bool,
}

/// List the caller's purchase history.
pub async fn list_purchases(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<ListPurchasesQuery>,
) -> Result<Json<ListPurchasesResponse>, ApiError> {
    // Fetch one more than requested to determine has_more
    let limit = query.limit.min(100);
    let purchases = state
        .store
        .list_purchases_by_user(&auth.user_id, limit + 1, query.offset)?;

    let has_more = purchases.len() > limit;
    let purchases: Vec<_> = purchases
        .iter()
        .take(limit)
        .map(PurchaseHistoryItem::from)
        .collect();

    Ok(Json(ListPurchasesResponse {
        success: true,
        purchases,
        has_more,
    }))
}
