//! Table endpoints

use axum::Extension;
use axum::extract::{Path, State};
use axum::Json;
use shared::error::ApiResponse;
use shared::models::{DiningTable, Identity, TableStatus};

use super::ApiResult;
use crate::db;
use crate::error::CoreError;
use crate::state::AppState;
use crate::tables;

pub async fn show(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<DiningTable>>> {
    let mut conn = state.pool.acquire().await.map_err(CoreError::from)?;
    let table = db::tables::find(&mut conn, &identity.tenant_id, id)
        .await
        .map_err(CoreError::from)?
        .ok_or(CoreError::NotFound("table"))?;
    Ok(Json(ApiResponse::success(table)))
}

/// Force a re-derivation of the table status from its open orders.
/// Safe to call at any time; a no-op when the status is already right.
pub async fn reconcile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<TableStatus>>> {
    let status = tables::reconcile(&state, &identity, id).await?;
    Ok(Json(ApiResponse::success(status)))
}
