use std::sync::Arc;
use tracing::info;

use crate::livekit::{AccessTokenSigner, RoomDirectory};
use crate::models::{ParticipantRole, RoomMetadata, RoomName};
use crate::{Error, Result};

/// A participant asking for credentials to one room
#[derive(Debug, Clone)]
pub struct TokenRequest {
    pub room: String,
    /// Display identity inside the room
    pub participant: String,
    pub role: ParticipantRole,
    /// Farcaster id of the caller, taken at face value
    pub requester_fid: Option<u64>,
    /// Attached to the room if a broadcaster's request creates it
    pub metadata: Option<RoomMetadata>,
}

/// Issues room access tokens and enforces station ownership for broadcasters
#[derive(Clone)]
pub struct TokenService {
    signer: Option<AccessTokenSigner>,
    directory: Arc<dyn RoomDirectory>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// `signer` is `None` when the API key pair is not configured; every
    /// issuance then fails with a configuration error.
    pub fn new(signer: Option<AccessTokenSigner>, directory: Arc<dyn RoomDirectory>) -> Self {
        Self { signer, directory }
    }

    pub async fn issue(&self, request: TokenRequest) -> Result<String> {
        let TokenRequest {
            room,
            participant,
            role,
            requester_fid,
            metadata,
        } = request;

        let (room, participant) = require_names(&room, &participant)?;

        if role == ParticipantRole::Broadcaster {
            let fid = requester_fid.ok_or_else(|| {
                Error::InvalidInput("fid is required to broadcast".to_string())
            })?;
            check_owner(room, fid)?;
        }

        let signer = self.signer()?;

        if role == ParticipantRole::Broadcaster {
            if let Some(metadata) = &metadata {
                metadata.validate()?;
                self.directory
                    .create_or_ensure_room(room, Some(metadata))
                    .await?;
            }
        }

        let token = signer.participant_token(room, participant, role)?;
        info!(room = %room, participant = %participant, role = %role, "Issued access token");
        Ok(token)
    }

    /// Query-string flavor used by older clients. Ownership is only enforced
    /// when the caller identifies itself, and rooms are never created.
    pub fn issue_legacy(
        &self,
        room: &str,
        participant: &str,
        role: ParticipantRole,
        requester_fid: Option<u64>,
    ) -> Result<String> {
        let (room, participant) = require_names(room, participant)?;

        if role == ParticipantRole::Broadcaster {
            if let Some(fid) = requester_fid {
                check_owner(room, fid)?;
            }
        }

        let token = self.signer()?.participant_token(room, participant, role)?;
        info!(room = %room, participant = %participant, role = %role, "Issued legacy access token");
        Ok(token)
    }

    fn signer(&self) -> Result<&AccessTokenSigner> {
        self.signer.as_ref().ok_or_else(|| {
            Error::Configuration("LiveKit API key and secret must be set".to_string())
        })
    }
}

/// Names are passed through untouched; whitespace-only counts as missing
fn require_names<'a>(room: &'a str, participant: &'a str) -> Result<(&'a str, &'a str)> {
    if room.trim().is_empty() || participant.trim().is_empty() {
        return Err(Error::InvalidInput("Missing room or username".to_string()));
    }
    Ok((room, participant))
}

/// Stations are owned by the fid embedded in their name; ad-hoc rooms by nobody
fn check_owner(room: &str, fid: u64) -> Result<()> {
    match RoomName::parse(room) {
        Some(parsed) if parsed.owner_fid != fid => Err(Error::Authorization(
            "cannot broadcast on another owner's station".to_string(),
        )),
        _ => Ok(()),
    }
}
