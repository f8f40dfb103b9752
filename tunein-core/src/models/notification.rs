use serde::{Deserialize, Serialize};

/// A user's push notification subscription, one per fid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub fid: u64,
    /// Opaque token issued by the Farcaster client
    pub token: String,
    /// Relay endpoint that accepts deliveries for `token`
    pub url: String,
    /// Epoch milliseconds of the last registration
    pub added_at: u64,
}

/// Body POSTed to a recipient's relay endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub notification_id: String,
    pub title: String,
    pub body: String,
    pub target_url: String,
    pub tokens: Vec<String>,
}

/// Outcome of one fan-out run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnounceOutcome {
    pub sent: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventKind {
    MiniappAdded,
    MiniappRemoved,
    NotificationsEnabled,
    NotificationsDisabled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDetails {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Lifecycle event sent by the Farcaster client when a user adds or removes
/// the app, or toggles its notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    pub event: WebhookEventKind,
    /// Absent on some event kinds the app does not handle
    #[serde(default)]
    pub fid: Option<u64>,
    #[serde(default)]
    pub notification_details: Option<NotificationDetails>,
}

impl WebhookEvent {
    /// Token and relay URL, when both are present and non-empty
    #[must_use]
    pub fn subscription(&self) -> Option<(&str, &str)> {
        let details = self.notification_details.as_ref()?;
        let token = details.token.as_deref().filter(|t| !t.is_empty())?;
        let url = details.url.as_deref().filter(|u| !u.is_empty())?;
        Some((token, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_format() {
        let record = NotificationRecord {
            fid: 10,
            token: "tok".to_string(),
            url: "https://relay.example/notify".to_string(),
            added_at: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fid": 10,
                "token": "tok",
                "url": "https://relay.example/notify",
                "addedAt": 1_700_000_000_000_u64,
            })
        );
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = NotificationPayload {
            notification_id: "broadcast-radio-1-live-5".to_string(),
            title: "alice is live!".to_string(),
            body: "Tune in".to_string(),
            target_url: "https://radio.example/?join=radio-1-live".to_string(),
            tokens: vec!["tok".to_string()],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["notificationId"], "broadcast-radio-1-live-5");
        assert_eq!(json["targetUrl"], "https://radio.example/?join=radio-1-live");
        assert_eq!(json["tokens"], serde_json::json!(["tok"]));
    }

    #[test]
    fn test_webhook_event_parsing() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"event":"miniapp_added","fid":3,"notificationDetails":{"token":"t","url":"https://u"}}"#,
        )
        .unwrap();
        assert_eq!(event.event, WebhookEventKind::MiniappAdded);
        assert_eq!(event.subscription(), Some(("t", "https://u")));

        let event: WebhookEvent =
            serde_json::from_str(r#"{"event":"frame_added","fid":3}"#).unwrap();
        assert_eq!(event.event, WebhookEventKind::Unknown);
        assert_eq!(event.subscription(), None);

        let event: WebhookEvent = serde_json::from_str(r#"{"event":"frame_added"}"#).unwrap();
        assert_eq!(event.event, WebhookEventKind::Unknown);
        assert_eq!(event.fid, None);
    }

    #[test]
    fn test_subscription_requires_token_and_url() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"event":"notifications_enabled","fid":3,"notificationDetails":{"token":"t"}}"#,
        )
        .unwrap();
        assert_eq!(event.subscription(), None);

        let event: WebhookEvent = serde_json::from_str(
            r#"{"event":"notifications_enabled","fid":3,"notificationDetails":{"token":"","url":"https://u"}}"#,
        )
        .unwrap();
        assert_eq!(event.subscription(), None);
    }
}
