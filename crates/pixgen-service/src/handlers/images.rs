//! Image generation handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use pixgen_core::GENERATION_COST_CREDITS;
use pixgen_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Image generation request.
#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    /// Text prompt to render.
    pub prompt: Option<String>,
}

/// Image generation response.
#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    /// Always true on this path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Balance after the debit.
    pub credit_balance: i64,
    /// The rendered image as a `data:image/png;base64,...` URL.
    pub result_image: String,
}

/// Generate an image from a text prompt.
///
/// The caller's balance is checked up front, but the debit happens only
/// after the upstream call succeeds. A failed generation costs nothing.
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let prompt = body
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("prompt is required".into()))?;

    let imagegen = state
        .imagegen
        .as_ref()
        .ok_or_else(|| ApiError::Upstream("Image generation not configured".into()))?;

    let user = state
        .store
        .get_user(&auth.user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    if !user.has_credits(GENERATION_COST_CREDITS) {
        return Err(ApiError::InsufficientCredits {
            balance: user.credit_balance,
            required: GENERATION_COST_CREDITS,
        });
    }

    let image_bytes = imagegen.text_to_image(prompt).await.map_err(|e| {
        tracing::error!(
            user_id = %auth.user_id,
            error = %e,
            "Image generation failed"
        );
        ApiError::Upstream(format!("Image generation failed: {e}"))
    })?;

    // Debit after the upstream success. The conditional update can still
    // lose a race to a concurrent debit, in which case nothing is charged
    // and the caller sees an insufficient-credits error.
    let credit_balance = state
        .store
        .consume_credits(&auth.user_id, GENERATION_COST_CREDITS)?;

    let result_image = format!("data:image/png;base64,{}", STANDARD.encode(&image_bytes));

    tracing::info!(
        user_id = %auth.user_id,
        prompt_chars = %prompt.len(),
        image_bytes = %image_bytes.len(),
        credit_balance = %credit_balance,
        "Image generated"
    );

    Ok(Json(GenerateImageResponse {
        success: true,
        message: "Image generated".into(),
        credit_balance,
        result_image,
    }))
}
