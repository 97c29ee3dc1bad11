//! Request identity extraction
//!
//! Tenancy and actor attribution arrive as headers set by the gateway
//! in front of this service: `x-tenant-id`, `x-actor-id` and
//! `x-actor-type` (ADMIN | OWNER | STAFF). Every /api route requires
//! them; handlers pick the resolved [`Identity`] up as an Extension.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use shared::error::AppError;
use shared::models::{Actor, Identity};

pub async fn require_identity(mut req: Request, next: Next) -> Result<Response, AppError> {
    let headers = req.headers();

    let tenant_id = header_str(headers, "x-tenant-id")?;
    if tenant_id.is_empty() {
        return Err(AppError::validation("x-tenant-id must not be empty"));
    }
    let actor_id: i64 = header_str(headers, "x-actor-id")?
        .parse()
        .map_err(|_| AppError::validation("x-actor-id must be an integer"))?;
    let actor_type = header_str(headers, "x-actor-type")?;
    let actor = Actor::from_parts(&actor_type, actor_id)
        .ok_or_else(|| AppError::validation(format!("unknown actor type: {actor_type}")))?;

    let identity = Identity::new(tenant_id, actor);
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

fn header_str(
    headers: &http::HeaderMap,
    name: &'static str,
) -> Result<String, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .ok_or_else(|| AppError::validation(format!("missing {name} header")))
}
