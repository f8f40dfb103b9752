//! LiveKit-compatible SFU integration: access token signing and the room service

mod claims;
mod room_client;
mod signer;

pub use claims::{AccessClaims, VideoGrant};
pub use room_client::LiveKitRoomClient;
pub use signer::AccessTokenSigner;

use async_trait::async_trait;

use crate::models::RoomMetadata;
use crate::Result;

/// A room as reported by the provider. `metadata` is the raw string stored at
/// creation, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: String,
    pub metadata: String,
    pub num_participants: u32,
}

/// Rooms known to the streaming provider
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Create `name` with `metadata` attached, or leave an existing room untouched
    async fn create_or_ensure_room(&self, name: &str, metadata: Option<&RoomMetadata>)
        -> Result<()>;

    /// Every active room, in provider order
    async fn list_rooms(&self) -> Result<Vec<RoomSummary>>;

    async fn get_room(&self, name: &str) -> Result<Option<RoomSummary>> {
        Ok(self
            .list_rooms()
            .await?
            .into_iter()
            .find(|room| room.name == name))
    }

    async fn delete_room(&self, name: &str) -> Result<()>;
}
