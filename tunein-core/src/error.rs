use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration (LiveKit credentials, provider URL) is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    /// The streaming provider rejected or failed a request
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Upstream(format!("Request timed out: {err}"))
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
