use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::kv::KvStore;
use crate::models::{now_millis, NotificationRecord, WebhookEvent, WebhookEventKind};
use crate::{Error, Result};

const ALL_KEY: &str = "notif:all";

fn record_key(fid: u64) -> String {
    format!("notif:{fid}")
}

/// Push notification subscriptions, keyed by fid.
///
/// Each record lives under `notif:<fid>` and its fid is a member of
/// `notif:all`. The two writes are not atomic; readers tolerate members whose
/// record is gone.
#[derive(Clone)]
pub struct NotificationRegistry {
    store: Arc<dyn KvStore>,
}

impl std::fmt::Debug for NotificationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationRegistry").finish_non_exhaustive()
    }
}

impl NotificationRegistry {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Store or replace the subscription for `fid`
    pub async fn register(&self, fid: u64, token: &str, url: &str) -> Result<()> {
        let record = NotificationRecord {
            fid,
            token: token.to_string(),
            url: url.to_string(),
            added_at: now_millis(),
        };

        self.store
            .set(&record_key(fid), &serde_json::to_string(&record)?)
            .await?;
        self.store.set_add(ALL_KEY, &fid.to_string()).await?;

        info!(fid, "Notification subscription saved");
        Ok(())
    }

    pub async fn unregister(&self, fid: u64) -> Result<()> {
        self.store.delete(&record_key(fid)).await?;
        self.store.set_remove(ALL_KEY, &fid.to_string()).await?;

        info!(fid, "Notification subscription removed");
        Ok(())
    }

    pub async fn get(&self, fid: u64) -> Result<Option<NotificationRecord>> {
        let Some(raw) = self.store.get(&record_key(fid)).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(fid, error = %e, "Stored notification record is malformed");
                Ok(None)
            }
        }
    }

    /// Every resolvable subscription, in set order
    pub async fn list_all(&self) -> Result<Vec<NotificationRecord>> {
        let members = self.store.set_members(ALL_KEY).await?;
        let mut records = Vec::with_capacity(members.len());

        for member in members {
            let Ok(fid) = member.parse::<u64>() else {
                debug!(member = %member, "Skipping non-numeric subscription member");
                continue;
            };

            if let Some(record) = self.get(fid).await? {
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Apply a Farcaster client lifecycle event
    pub async fn handle_webhook(&self, event: &WebhookEvent) -> Result<()> {
        info!(fid = ?event.fid, event = ?event.event, "Webhook received");

        if event.event == WebhookEventKind::Unknown {
            info!(fid = ?event.fid, "Ignoring unknown webhook event");
            return Ok(());
        }

        let fid = event
            .fid
            .ok_or_else(|| Error::InvalidInput("fid is required".to_string()))?;

        match event.event {
            WebhookEventKind::MiniappAdded | WebhookEventKind::NotificationsEnabled => {
                match event.subscription() {
                    Some((token, url)) => self.register(fid, token, url).await?,
                    None => debug!(fid, "Webhook carried no notification details"),
                }
            }
            WebhookEventKind::MiniappRemoved | WebhookEventKind::NotificationsDisabled => {
                self.unregister(fid).await?;
            }
            WebhookEventKind::Unknown => {}
        }

        Ok(())
    }
}
