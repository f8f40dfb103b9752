//! Farcaster mini app lifecycle webhook

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use tunein_core::models::WebhookEvent;

use crate::http::error::AppResult;
use crate::http::AppState;

/// POST /api/webhook
pub async fn receive(
    State(state): State<AppState>,
    payload: Result<Json<WebhookEvent>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(event) = payload?;
    state.registry.handle_webhook(&event).await?;
    Ok(Json(json!({ "success": true })))
}

/// GET /api/webhook - reachability probe used when registering the webhook
pub async fn status() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
