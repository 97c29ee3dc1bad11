//! Order endpoints

use axum::Extension;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::error::ApiResponse;
use shared::models::{Identity, Order, OrderItem, OrderStatus};

use super::ApiResult;
use crate::orders;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<orders::CreateOrder>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    let order = orders::create_order(&state, &identity, req).await?;
    Ok(Json(ApiResponse::success(order)))
}

pub async fn show(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<OrderView>>> {
    let (order, items) = orders::get_order(&state, &identity, id).await?;
    Ok(Json(ApiResponse::success(OrderView { order, items })))
}

#[derive(Debug, Deserialize)]
pub struct SetStatus {
    pub status: OrderStatus,
}

pub async fn set_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Json(req): Json<SetStatus>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    let order = orders::advance_status(&state, &identity, id, req.status).await?;
    Ok(Json(ApiResponse::success(order)))
}
