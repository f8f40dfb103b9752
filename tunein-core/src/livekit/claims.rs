use serde::{Deserialize, Serialize};

/// Video grant in the LiveKit claim layout.
///
/// Absent permissions are omitted from the token, the SFU treats them as its
/// own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_create: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_list: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_join: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_publish: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_subscribe: Option<bool>,
}

impl VideoGrant {
    /// Join exactly one room, publishing only when `can_publish`
    #[must_use]
    pub fn join(room: impl Into<String>, can_publish: bool) -> Self {
        Self {
            room_join: Some(true),
            room: Some(room.into()),
            can_publish: Some(can_publish),
            can_subscribe: Some(true),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn room_create() -> Self {
        Self {
            room_create: Some(true),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn room_list() -> Self {
        Self {
            room_list: Some(true),
            ..Self::default()
        }
    }
}

/// JWT claims understood by the SFU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// API key the token was signed with
    pub iss: String,
    /// Participant identity, empty for server-to-server tokens
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jti: String,
    pub nbf: i64,
    pub exp: i64,
    pub video: VideoGrant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_grant_wire_format() {
        let json = serde_json::to_value(VideoGrant::join("radio-1-live", false)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "roomJoin": true,
                "room": "radio-1-live",
                "canPublish": false,
                "canSubscribe": true,
            })
        );
    }

    #[test]
    fn test_service_grants() {
        let json = serde_json::to_value(VideoGrant::room_create()).unwrap();
        assert_eq!(json, serde_json::json!({ "roomCreate": true }));

        let json = serde_json::to_value(VideoGrant::room_list()).unwrap();
        assert_eq!(json, serde_json::json!({ "roomList": true }));
    }
}
