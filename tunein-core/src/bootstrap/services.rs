//! Service initialization and dependency injection

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    kv::{KvStore, MemoryKvStore, RedisKvStore},
    livekit::{AccessTokenSigner, LiveKitRoomClient, RoomDirectory},
    service::{BroadcastAnnouncer, NotificationRegistry, RoomListingService, TokenService},
    Config,
};

/// Container for all initialized services
#[derive(Clone)]
pub struct Services {
    /// Access token issuance for broadcasters and listeners
    pub token_service: TokenService,
    /// Station directory as shown to clients
    pub room_listing: RoomListingService,
    /// Push notification subscriptions
    pub registry: NotificationRegistry,
    /// "Station is live" fan-out
    pub announcer: BroadcastAnnouncer,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("token_service", &self.token_service)
            .field("announcer", &self.announcer)
            .finish_non_exhaustive()
    }
}

impl Services {
    /// Wire services over explicit adapters
    pub fn build(
        config: &Config,
        store: Arc<dyn KvStore>,
        directory: Arc<dyn RoomDirectory>,
    ) -> crate::Result<Self> {
        let signer = match AccessTokenSigner::from_config(&config.livekit) {
            Ok(signer) => Some(signer),
            Err(e) => {
                warn!("{e}; token requests will fail until it is configured");
                None
            }
        };

        let registry = NotificationRegistry::new(store);
        let announcer = BroadcastAnnouncer::from_config(registry.clone(), &config.notifications)?;

        Ok(Self {
            token_service: TokenService::new(signer, directory.clone()),
            room_listing: RoomListingService::new(directory),
            registry,
            announcer,
        })
    }
}

/// Initialize all core services from configuration
pub async fn init_services(config: &Config) -> anyhow::Result<Services> {
    info!("Initializing services...");

    let store: Arc<dyn KvStore> = if config.redis.url.is_empty() {
        warn!("Redis not configured, notification subscriptions are kept in memory");
        Arc::new(MemoryKvStore::new())
    } else {
        let store = RedisKvStore::connect(&config.redis.url).await?;
        info!("Connected to Redis");
        Arc::new(store)
    };

    if config.livekit.http_url().is_none() {
        warn!("LiveKit URL not configured, room listing and creation will fail");
    }
    let directory: Arc<dyn RoomDirectory> = Arc::new(LiveKitRoomClient::new(&config.livekit)?);

    if config.notifications.app_url.is_empty() {
        warn!("App URL not configured, notification links will be relative");
    }

    let services = Services::build(config, store, directory)?;
    info!("Services initialized");
    Ok(services)
}
