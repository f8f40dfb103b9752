pub mod announcer;
pub mod registry;
pub mod rooms;
pub mod token;

pub use announcer::BroadcastAnnouncer;
pub use registry::NotificationRegistry;
pub use rooms::{ListedRoom, RoomListingService};
pub use token::{TokenRequest, TokenService};
