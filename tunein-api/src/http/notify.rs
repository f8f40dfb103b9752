use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::error::{AppError, AppResult};
use crate::http::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub broadcaster_username: Option<String>,
    pub station_title: Option<String>,
    pub room_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub success: bool,
    pub sent: u32,
    pub failed: u32,
}

/// POST /api/notify - called by a broadcaster's client once it is on air
pub async fn notify(
    State(state): State<AppState>,
    payload: Result<Json<NotifyRequest>, JsonRejection>,
) -> AppResult<Json<NotifyResponse>> {
    let Json(req) = payload?;

    let (Some(username), Some(title), Some(room)) = (
        non_empty(req.broadcaster_username),
        non_empty(req.station_title),
        non_empty(req.room_name),
    ) else {
        return Err(AppError::bad_request("Missing required fields"));
    };

    let outcome = state
        .announcer
        .announce_broadcast_start(&username, &title, &room)
        .await?;

    Ok(Json(NotifyResponse {
        success: true,
        sent: outcome.sent,
        failed: outcome.failed,
    }))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}
