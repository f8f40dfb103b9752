use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info};

use super::{AccessTokenSigner, RoomDirectory, RoomSummary, VideoGrant};
use crate::config::LiveKitConfig;
use crate::models::RoomMetadata;
use crate::resilience::timeout::{HTTP_CONNECT_TIMEOUT, PROVIDER_REQUEST_TIMEOUT};
use crate::{Error, Result};

const TWIRP_PREFIX: &str = "/twirp/livekit.RoomService";

#[derive(Debug, Serialize)]
struct CreateRoomRequest<'a> {
    name: &'a str,
    empty_timeout: u32,
    max_participants: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<String>,
}

#[derive(Debug, Serialize)]
struct ListRoomsRequest {}

#[derive(Debug, Serialize)]
struct DeleteRoomRequest<'a> {
    room: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ListRoomsResponse {
    #[serde(default)]
    rooms: Vec<RoomInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct RoomInfo {
    #[serde(default)]
    name: String,
    #[serde(default)]
    metadata: String,
    #[serde(default, alias = "numParticipants")]
    num_participants: u32,
}

impl From<RoomInfo> for RoomSummary {
    fn from(room: RoomInfo) -> Self {
        Self {
            name: room.name,
            metadata: room.metadata,
            num_participants: room.num_participants,
        }
    }
}

/// Error body of a failed Twirp call
#[derive(Debug, Default, Deserialize)]
struct TwirpError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    msg: String,
}

/// Client for the provider's room service over its Twirp JSON API.
///
/// Missing URL or credentials are reported per call, so the server can start
/// without them.
#[derive(Clone)]
pub struct LiveKitRoomClient {
    http: Client,
    base_url: Option<String>,
    signer: Option<AccessTokenSigner>,
    empty_timeout: u32,
    max_participants: u32,
}

impl std::fmt::Debug for LiveKitRoomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveKitRoomClient")
            .field("base_url", &self.base_url)
            .field("configured", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl LiveKitRoomClient {
    pub fn new(config: &LiveKitConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(PROVIDER_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.http_url(),
            signer: AccessTokenSigner::from_config(config).ok(),
            empty_timeout: config.empty_timeout_seconds,
            max_participants: config.max_participants,
        })
    }

    fn credentials(&self) -> Result<(&str, &AccessTokenSigner)> {
        match (&self.base_url, &self.signer) {
            (Some(url), Some(signer)) => Ok((url.as_str(), signer)),
            _ => Err(Error::Configuration(
                "LiveKit URL, API key and API secret must be set".to_string(),
            )),
        }
    }

    /// POST one Twirp method. `Ok(Err(..))` carries a Twirp error reply.
    async fn call<B, R>(
        &self,
        method: &str,
        grant: VideoGrant,
        body: &B,
    ) -> Result<std::result::Result<R, TwirpError>>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Default,
    {
        let (base_url, signer) = self.credentials()?;
        let token = signer.service_token(grant)?;
        let url = format!("{base_url}{TWIRP_PREFIX}/{method}");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Ok(R::default()));
            }
            return serde_json::from_str(&text)
                .map(Ok)
                .map_err(|e| Error::Upstream(format!("{method}: unexpected response: {e}")));
        }

        let error = serde_json::from_str::<TwirpError>(&text).unwrap_or_else(|_| TwirpError {
            code: status.as_u16().to_string(),
            msg: text,
        });
        Ok(Err(error))
    }
}

#[async_trait]
impl RoomDirectory for LiveKitRoomClient {
    async fn create_or_ensure_room(
        &self,
        name: &str,
        metadata: Option<&RoomMetadata>,
    ) -> Result<()> {
        let request = CreateRoomRequest {
            name,
            empty_timeout: self.empty_timeout,
            max_participants: self.max_participants,
            metadata: metadata.map(RoomMetadata::encode),
        };

        match self
            .call::<_, serde_json::Value>("CreateRoom", VideoGrant::room_create(), &request)
            .await?
        {
            Ok(_) => {
                info!(room = %name, "Room created");
                Ok(())
            }
            Err(e) if e.code == "already_exists" => {
                debug!(room = %name, "Room already exists");
                Ok(())
            }
            Err(e) => Err(Error::Upstream(format!(
                "CreateRoom failed ({}): {}",
                e.code, e.msg
            ))),
        }
    }

    async fn list_rooms(&self) -> Result<Vec<RoomSummary>> {
        let response = self
            .call::<_, ListRoomsResponse>(
                "ListRooms",
                VideoGrant::room_list(),
                &ListRoomsRequest {},
            )
            .await?
            .map_err(|e| Error::Upstream(format!("ListRooms failed ({}): {}", e.code, e.msg)))?;

        Ok(response.rooms.into_iter().map(RoomSummary::from).collect())
    }

    async fn delete_room(&self, name: &str) -> Result<()> {
        self.call::<_, serde_json::Value>(
            "DeleteRoom",
            VideoGrant::room_create(),
            &DeleteRoomRequest { room: name },
        )
        .await?
        .map_err(|e| Error::Upstream(format!("DeleteRoom failed ({}): {}", e.code, e.msg)))?;

        info!(room = %name, "Room deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LiveKitRoomClient {
        let config = LiveKitConfig {
            url: server.uri(),
            api_key: "APIkey".to_string(),
            api_secret: "a-secret-long-enough-for-hs256".to_string(),
            ..LiveKitConfig::default()
        };
        LiveKitRoomClient::new(&config).unwrap()
    }

    fn metadata() -> RoomMetadata {
        RoomMetadata {
            owner_fid: 5,
            owner_username: Some("alice".to_string()),
            owner_display_name: None,
            owner_pfp_url: None,
            owner_wallet: None,
            title: "x".to_string(),
            created_at: 1,
        }
    }

    #[tokio::test]
    async fn test_create_room_sends_limits_and_metadata() {
        let server = MockServer::start().await;
        let metadata = metadata();

        Mock::given(method("POST"))
            .and(path("/twirp/livekit.RoomService/CreateRoom"))
            .and(header_exists("authorization"))
            .and(body_partial_json(json!({
                "name": "radio-5-x",
                "empty_timeout": 300,
                "max_participants": 100,
                "metadata": metadata.encode(),
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sid": "RM_1",
                "name": "radio-5-x",
            })))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .create_or_ensure_room("radio-5-x", Some(&metadata))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_room_accepts_already_exists() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/twirp/livekit.RoomService/CreateRoom"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "already_exists",
                "msg": "room already exists",
            })))
            .mount(&server)
            .await;

        assert!(client_for(&server)
            .create_or_ensure_room("radio-5-x", None)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_create_room_surfaces_other_failures() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/twirp/livekit.RoomService/CreateRoom"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "unauthenticated",
                "msg": "invalid token",
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_or_ensure_room("radio-5-x", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(ref msg) if msg.contains("unauthenticated")));
    }

    #[tokio::test]
    async fn test_list_and_get_rooms() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/twirp/livekit.RoomService/ListRooms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "rooms": [
                    { "name": "radio-1-a", "metadata": "", "num_participants": 3 },
                    { "name": "lobby", "numParticipants": 1 },
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let rooms = client.list_rooms().await.unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].num_participants, 3);
        assert_eq!(rooms[1].name, "lobby");
        assert_eq!(rooms[1].num_participants, 1);

        let room = client.get_room("lobby").await.unwrap().unwrap();
        assert_eq!(room.num_participants, 1);
        assert!(client.get_room("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_room() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/twirp/livekit.RoomService/DeleteRoom"))
            .and(body_partial_json(json!({ "room": "radio-5-x" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete_room("radio-5-x").await.unwrap();
    }

    #[tokio::test]
    async fn test_unconfigured_client() {
        let client = LiveKitRoomClient::new(&LiveKitConfig::default()).unwrap();
        assert!(matches!(client.list_rooms().await, Err(Error::Configuration(_))));
    }
}
