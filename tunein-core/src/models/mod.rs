pub mod notification;
pub mod participant;
pub mod room_metadata;
pub mod room_name;

pub use notification::{
    AnnounceOutcome, NotificationDetails, NotificationPayload, NotificationRecord, WebhookEvent,
    WebhookEventKind,
};
pub use participant::ParticipantRole;
pub use room_metadata::{FarcasterUser, RoomMetadata, MAX_TITLE_CHARS};
pub use room_name::{is_room_owner, ParsedRoomName, RoomName, ROOM_PREFIX};

/// Current wall-clock time in epoch milliseconds
#[must_use]
pub fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
