//! Payment endpoint

use axum::Extension;
use axum::extract::{Path, State};
use axum::Json;
use shared::error::ApiResponse;
use shared::models::Identity;

use super::ApiResult;
use crate::payments::{self, PaymentOutcome, PaymentRequest};
use crate::state::AppState;

pub async fn pay(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Json(req): Json<PaymentRequest>,
) -> ApiResult<Json<ApiResponse<PaymentOutcome>>> {
    let outcome = payments::process_payment(&state, &identity, id, req).await?;
    Ok(Json(ApiResponse::success(outcome)))
}
