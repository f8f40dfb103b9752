use serde::{Deserialize, Serialize};

use super::now_millis;
use crate::{Error, Result};

/// Longest station title accepted, counted in characters
pub const MAX_TITLE_CHARS: usize = 30;

/// Farcaster identity as reported by the mini app host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarcasterUser {
    pub fid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pfp_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custody_address: Option<String>,
}

/// Ownership record attached to a room when the provider creates it.
///
/// Stored by the provider as an opaque JSON string and never updated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMetadata {
    pub owner_fid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_pfp_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_wallet: Option<String>,
    pub title: String,
    /// Epoch milliseconds; 0 when the writer did not stamp it
    #[serde(default)]
    pub created_at: u64,
}

impl RoomMetadata {
    #[must_use]
    pub fn for_user(user: FarcasterUser, title: impl Into<String>) -> Self {
        Self {
            owner_fid: user.fid,
            owner_username: user.username,
            owner_display_name: user.display_name,
            owner_pfp_url: user.pfp_url,
            owner_wallet: user.custody_address,
            title: title.into(),
            created_at: now_millis(),
        }
    }

    /// Title length check applied before the record is handed to the provider
    pub fn validate(&self) -> Result<()> {
        if self.title.chars().count() > MAX_TITLE_CHARS {
            return Err(Error::InvalidInput(format!(
                "title must be at most {MAX_TITLE_CHARS} characters"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn encode(&self) -> String {
        // Strings and integers only, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse the provider's metadata string. Anything unusable reads as absent.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        match serde_json::from_str(raw) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed room metadata");
                None
            }
        }
    }
}
