use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use std::time::Duration;

use super::claims::{AccessClaims, VideoGrant};
use crate::config::LiveKitConfig;
use crate::models::ParticipantRole;
use crate::{Error, Result};

/// Lifetime of tokens used for calls to the room service
const SERVICE_TOKEN_TTL: Duration = Duration::from_secs(10 * 60);

/// Signs HS256 access tokens with the provider's API key pair
#[derive(Clone)]
pub struct AccessTokenSigner {
    api_key: String,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    participant_ttl: Duration,
}

impl std::fmt::Debug for AccessTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenSigner")
            .field("api_key", &self.api_key)
            .field("participant_ttl", &self.participant_ttl)
            .finish_non_exhaustive()
    }
}

impl AccessTokenSigner {
    pub fn new(api_key: &str, api_secret: &str, participant_ttl: Duration) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Configuration("LiveKit API key is not set".to_string()));
        }
        if api_secret.is_empty() {
            return Err(Error::Configuration("LiveKit API secret is not set".to_string()));
        }

        Ok(Self {
            api_key: api_key.to_string(),
            encoding_key: Arc::new(EncodingKey::from_secret(api_secret.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(api_secret.as_bytes())),
            participant_ttl,
        })
    }

    pub fn from_config(config: &LiveKitConfig) -> Result<Self> {
        Self::new(
            &config.api_key,
            &config.api_secret,
            Duration::from_secs(config.token_ttl_seconds),
        )
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Credential to join `room` as `identity`
    pub fn participant_token(
        &self,
        room: &str,
        identity: &str,
        role: ParticipantRole,
    ) -> Result<String> {
        let grant = VideoGrant::join(room, role.can_publish());
        self.sign(identity, grant, self.participant_ttl)
    }

    /// Short-lived credential for server-to-server room service calls
    pub fn service_token(&self, grant: VideoGrant) -> Result<String> {
        self.sign("", grant, SERVICE_TOKEN_TTL)
    }

    fn sign(&self, identity: &str, video: VideoGrant, ttl: Duration) -> Result<String> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(ttl.as_secs())
            .map_err(|_| Error::Configuration("token TTL is out of range".to_string()))?;

        let claims = AccessClaims {
            iss: self.api_key.clone(),
            sub: identity.to_string(),
            jti: identity.to_string(),
            nbf: now,
            exp: now + ttl,
            video,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| Error::Internal(format!("Failed to sign access token: {e}")))
    }

    /// Check signature, issuer and validity window, and return the claims
    pub fn verify(&self, token: &str) -> Result<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;
        validation.leeway = 60;
        validation.set_issuer(&[self.api_key.as_str()]);

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    Error::Authorization("Token expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    Error::Authorization("Invalid token signature".to_string())
                }
                _ => Error::Authorization(format!("Token verification failed: {e}")),
            })
    }
}
