//! Swap planning endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use swap_core::SwapError;

use crate::dto::{ApiError, SwapRequestBody, SwapResponse};
use crate::AppState;

/// POST /swap - Quote a swap and build its transaction
pub async fn plan_swap(
    State(state): State<AppState>,
    payload: Result<Json<SwapRequestBody>, JsonRejection>,
) -> Result<Json<SwapResponse>, (StatusCode, Json<ApiError>)> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!("Rejected swap body: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request(
                "Invalid request body",
                rejection.body_text(),
            )),
        )
    })?;

    let request = body.to_request().map_err(reject)?;
    let plan = state.planner().plan_swap(&request).await.map_err(reject)?;

    // Validation passed, so the amount is present
    let amount_in = body
        .amount
        .unwrap_or_else(|| Value::String(plan.amount_in.to_string()));

    Ok(Json(SwapResponse::from_plan(plan, amount_in)))
}

fn reject(e: SwapError) -> (StatusCode, Json<ApiError>) {
    if e.is_client_error() {
        tracing::info!(code = e.error_code(), "Swap request rejected: {}", e);
    } else {
        tracing::error!("Swap error: {}", e);
    }
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiError::from(&e)))
}
