// HTTP routes for the radio mini app

pub mod error;
pub mod health;
pub mod notify;
pub mod rooms;
pub mod token;
pub mod webhook;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use tunein_core::bootstrap::Services;
use tunein_core::service::{
    BroadcastAnnouncer, NotificationRegistry, RoomListingService, TokenService,
};

pub use error::{AppError, AppResult};

/// Shared state for all handlers. Every service is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub token_service: TokenService,
    pub room_listing: RoomListingService,
    pub registry: NotificationRegistry,
    pub announcer: BroadcastAnnouncer,
}

impl From<Services> for AppState {
    fn from(services: Services) -> Self {
        Self {
            token_service: services.token_service,
            room_listing: services.room_listing,
            registry: services.registry,
            announcer: services.announcer,
        }
    }
}

/// Create the HTTP router with all routes
pub fn create_router(services: Services) -> Router {
    let state = AppState::from(services);

    let router = Router::new()
        .merge(health::create_health_router())
        .route("/api/token", get(token::issue_legacy).post(token::issue))
        .route("/api/rooms", get(rooms::list_rooms))
        .route("/api/notify", axum::routing::post(notify::notify))
        .route("/api/webhook", get(webhook::status).post(webhook::receive));

    let router = router
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Apply state to all routes (must be last)
    router.with_state(state)
}
