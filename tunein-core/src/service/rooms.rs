use serde::Serialize;
use std::sync::Arc;

use crate::livekit::RoomDirectory;
use crate::models::{now_millis, RoomMetadata, ROOM_PREFIX};
use crate::Result;

/// A station as presented to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedRoom {
    pub name: String,
    pub metadata: Option<RoomMetadata>,
    pub num_participants: u32,
    /// Epoch milliseconds
    pub created_at: u64,
}

#[derive(Clone)]
pub struct RoomListingService {
    directory: Arc<dyn RoomDirectory>,
}

impl std::fmt::Debug for RoomListingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomListingService").finish_non_exhaustive()
    }
}

impl RoomListingService {
    pub fn new(directory: Arc<dyn RoomDirectory>) -> Self {
        Self { directory }
    }

    /// Live stations, busiest first. Ties keep the provider's order.
    pub async fn list_radio_rooms(&self) -> Result<Vec<ListedRoom>> {
        let now = now_millis();

        let mut rooms: Vec<ListedRoom> = self
            .directory
            .list_rooms()
            .await?
            .into_iter()
            .filter(|room| room.name.starts_with(ROOM_PREFIX))
            .map(|room| {
                let metadata = RoomMetadata::decode(&room.metadata);
                let created_at = metadata
                    .as_ref()
                    .map(|m| m.created_at)
                    .filter(|&ts| ts > 0)
                    .unwrap_or(now);

                ListedRoom {
                    name: room.name,
                    metadata,
                    num_participants: room.num_participants,
                    created_at,
                }
            })
            .collect();

        rooms.sort_by(|a, b| b.num_participants.cmp(&a.num_participants));
        Ok(rooms)
    }
}
