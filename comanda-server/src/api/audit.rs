//! Audit log endpoint

use axum::Extension;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use shared::error::ApiResponse;
use shared::models::Identity;

use super::ApiResult;
use crate::db::{self, audit::AuditEntry};
use crate::error::CoreError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<AuditQuery>,
) -> ApiResult<Json<ApiResponse<Vec<AuditEntry>>>> {
    let limit = query.limit.clamp(1, 500);
    let mut conn = state.pool.acquire().await.map_err(CoreError::from)?;
    let entries = db::audit::query(&mut conn, &identity.tenant_id, limit, query.offset)
        .await
        .map_err(CoreError::from)?;
    Ok(Json(ApiResponse::success(entries)))
}
