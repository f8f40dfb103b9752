//! Room access tokens
//!
//! POST is the current client flow and may create the station room. GET is
//! kept for older clients that pass everything in the query string.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use tunein_core::models::{ParticipantRole, RoomMetadata};
use tunein_core::service::TokenRequest;

use crate::http::error::AppResult;
use crate::http::AppState;

#[derive(Debug, Deserialize)]
pub struct IssueTokenRequest {
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: ParticipantRole,
    #[serde(default)]
    pub fid: Option<u64>,
    #[serde(default)]
    pub metadata: Option<RoomMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct LegacyTokenQuery {
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub username: String,
    pub role: Option<String>,
    pub fid: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/token
pub async fn issue(
    State(state): State<AppState>,
    payload: Result<Json<IssueTokenRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let Json(req) = payload?;

    let token = state
        .token_service
        .issue(TokenRequest {
            room: req.room,
            participant: req.username,
            role: req.role,
            requester_fid: req.fid,
            metadata: req.metadata,
        })
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// GET /api/token?room=..&username=..&role=..[&fid=..]
pub async fn issue_legacy(
    State(state): State<AppState>,
    query: Result<Query<LegacyTokenQuery>, QueryRejection>,
) -> AppResult<Json<TokenResponse>> {
    let Query(query) = query?;
    let role = ParticipantRole::from_wire(query.role.as_deref());

    let token = state
        .token_service
        .issue_legacy(&query.room, &query.username, role, query.fid)?;

    Ok(Json(TokenResponse { token }))
}
