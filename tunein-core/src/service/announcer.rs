use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

use super::NotificationRegistry;
use crate::config::NotificationsConfig;
use crate::links;
use crate::models::{now_millis, AnnounceOutcome, NotificationPayload, NotificationRecord};
use crate::resilience::pacing::Pacer;
use crate::resilience::timeout::HTTP_CONNECT_TIMEOUT;
use crate::{Error, Result};

/// Relay limits on notification text, in characters
const MAX_TITLE_CHARS: usize = 100;
const MAX_BODY_CHARS: usize = 500;

/// Tells every subscriber that a station went live.
///
/// Deliveries run one at a time with a fixed pause after each, so the relay
/// never sees more than one request per interval from this process.
#[derive(Clone)]
pub struct BroadcastAnnouncer {
    http: Client,
    registry: NotificationRegistry,
    app_url: String,
    pacer: Pacer,
}

impl std::fmt::Debug for BroadcastAnnouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastAnnouncer")
            .field("app_url", &self.app_url)
            .field("pacer", &self.pacer)
            .finish_non_exhaustive()
    }
}

impl BroadcastAnnouncer {
    pub fn new(
        registry: NotificationRegistry,
        app_url: impl Into<String>,
        request_timeout: Duration,
        pacer: Pacer,
    ) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            registry,
            app_url: app_url.into(),
            pacer,
        })
    }

    pub fn from_config(
        registry: NotificationRegistry,
        config: &NotificationsConfig,
    ) -> Result<Self> {
        Self::new(
            registry,
            config.app_url.clone(),
            Duration::from_secs(config.request_timeout_seconds),
            Pacer::new(Duration::from_millis(config.send_interval_millis)),
        )
    }

    /// Notify all subscribers that `owner_username` started `station_title`.
    ///
    /// Individual delivery failures are counted, not returned. Only a failure
    /// to read the subscriber list is an error.
    pub async fn announce_broadcast_start(
        &self,
        owner_username: &str,
        station_title: &str,
        room_name: &str,
    ) -> Result<AnnounceOutcome> {
        let recipients = self.registry.list_all().await?;

        let notification_id = format!("broadcast-{room_name}-{}", now_millis());
        let title = truncate_chars(&format!("{owner_username} is live!"), MAX_TITLE_CHARS);
        let body = truncate_chars(
            &format!("Tune in to \"{station_title}\" on TuneIn"),
            MAX_BODY_CHARS,
        );
        let target_url = links::join_url(&self.app_url, room_name);

        let mut outcome = AnnounceOutcome::default();

        for recipient in &recipients {
            let payload = NotificationPayload {
                notification_id: notification_id.clone(),
                title: title.clone(),
                body: body.clone(),
                target_url: target_url.clone(),
                tokens: vec![recipient.token.clone()],
            };

            if self.deliver(recipient, &payload).await {
                outcome.sent += 1;
            } else {
                outcome.failed += 1;
            }

            self.pacer.pause().await;
        }

        info!(
            room = %room_name,
            sent = outcome.sent,
            failed = outcome.failed,
            "Broadcast announcement finished"
        );
        Ok(outcome)
    }

    async fn deliver(&self, recipient: &NotificationRecord, payload: &NotificationPayload) -> bool {
        let response = match self.http.post(&recipient.url).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(fid = recipient.fid, error = %e, "Notification delivery failed");
                return false;
            }
        };

        let status = response.status();
        if status.is_success() {
            return true;
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            fid = recipient.fid,
            status = %status,
            body = %body,
            "Notification rejected by relay"
        );
        false
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
