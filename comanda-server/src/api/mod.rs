//! HTTP surface

mod audit;
mod health;
mod identity;
mod orders;
mod payments;
mod tables;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Handlers return domain data; errors render as the envelope JSON.
pub type ApiResult<T> = Result<T, shared::AppError>;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/orders", post(orders::create))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", post(orders::set_status))
        .route("/orders/{id}/payment", post(payments::pay))
        .route("/tables/{id}", get(tables::show))
        .route("/tables/{id}/reconcile", post(tables::reconcile))
        .route("/audit-log", get(audit::list))
        .layer(middleware::from_fn(identity::require_identity));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_table, test_state};
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use shared::models::TableStatus;
    use tower::ServiceExt;

    fn api_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-tenant-id", "R1")
            .header("x-actor-id", "100")
            .header("x-actor-type", "STAFF")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_needs_no_identity() {
        let ctx = test_state().await;
        let router = create_router(ctx.state.clone());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn api_routes_reject_missing_identity() {
        let ctx = test_state().await;
        let router = create_router(ctx.state.clone());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/audit-log")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], 2);
    }

    #[tokio::test]
    async fn order_lifecycle_over_http() {
        let ctx = test_state().await;
        let router = create_router(ctx.state.clone());
        let table_id = seed_table(&ctx.state, "R1", TableStatus::Available).await;

        let response = router
            .clone()
            .oneshot(api_request(
                "POST",
                "/api/orders",
                serde_json::json!({
                    "table_id": table_id,
                    "items": [
                        { "item_name": "Paella", "unit_price": "21.25", "quantity": 2 }
                    ]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["code"], 0);
        // 42.50 + 10% tax
        assert_eq!(body["data"]["total"], "46.75");
        let order_id = body["data"]["id"].as_i64().unwrap();

        let response = router
            .clone()
            .oneshot(api_request(
                "GET",
                &format!("/api/orders/{order_id}"),
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

        // Paying before SERVED is allowed but flagged.
        let response = router
            .clone()
            .oneshot(api_request(
                "POST",
                &format!("/api/orders/{order_id}/payment"),
                serde_json::json!({ "method": "CASH", "cash_received": "50.00" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["change_given"], "3.25");
        assert_eq!(body["data"]["payments"][0]["early_payment"], true);

        // A replay surfaces the conflict.
        let response = router
            .clone()
            .oneshot(api_request(
                "POST",
                &format!("/api/orders/{order_id}/payment"),
                serde_json::json!({ "method": "CARD" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["code"], 4002);

        // Both the creation and the payment left an audit trail.
        let response = router
            .oneshot(api_request(
                "GET",
                "/api/audit-log?limit=10",
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let actions: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["action"].as_str().unwrap())
            .collect();
        assert!(actions.contains(&"order.create"));
        assert!(actions.contains(&"payment.complete"));
    }

    #[tokio::test]
    async fn invalid_transition_maps_to_unprocessable() {
        let ctx = test_state().await;
        let router = create_router(ctx.state.clone());
        let table_id = seed_table(&ctx.state, "R1", TableStatus::Available).await;

        let response = router
            .clone()
            .oneshot(api_request(
                "POST",
                "/api/orders",
                serde_json::json!({
                    "table_id": table_id,
                    "items": [
                        { "item_name": "Café", "unit_price": "1.50", "quantity": 1 }
                    ]
                }),
            ))
            .await
            .unwrap();
        let order_id = body_json(response).await["data"]["id"].as_i64().unwrap();

        let response = router
            .oneshot(api_request(
                "POST",
                &format!("/api/orders/{order_id}/status"),
                serde_json::json!({ "status": "SERVED" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["code"], 4008);
    }
}
