use axum::{extract::State, Json};
use serde::Serialize;

use tunein_core::service::ListedRoom;

use crate::http::error::AppResult;
use crate::http::AppState;

#[derive(Debug, Serialize)]
pub struct ListRoomsResponse {
    pub rooms: Vec<ListedRoom>,
}

/// GET /api/rooms - live stations, busiest first
pub async fn list_rooms(State(state): State<AppState>) -> AppResult<Json<ListRoomsResponse>> {
    let rooms = state.room_listing.list_radio_rooms().await?;
    Ok(Json(ListRoomsResponse { rooms }))
}
