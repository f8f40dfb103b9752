use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::resilience::{
    pacing::DEFAULT_SEND_INTERVAL_MILLIS, timeout::NOTIFICATION_REQUEST_TIMEOUT,
};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub livekit: LiveKitConfig,
    pub redis: RedisConfig,
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            http_port: 3000,
        }
    }
}

/// Hosted LiveKit-compatible streaming provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveKitConfig {
    /// Provider URL as handed to clients (`wss://...`)
    pub url: String,
    pub api_key: String,
    pub api_secret: String,
    /// Seconds an empty room is kept alive by the provider
    pub empty_timeout_seconds: u32,
    pub max_participants: u32,
    /// Validity window of participant access tokens
    pub token_ttl_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            empty_timeout_seconds: 5 * 60,
            max_participants: 100,
            token_ttl_seconds: 60 * 60,
        }
    }
}

impl LiveKitConfig {
    /// Base URL of the provider's server API.
    ///
    /// Clients connect over websockets, the room service is plain HTTP(S)
    /// on the same host.
    #[must_use]
    pub fn http_url(&self) -> Option<String> {
        let url = self.url.trim().trim_end_matches('/');
        if url.is_empty() {
            return None;
        }

        let url = if let Some(rest) = url.strip_prefix("wss://") {
            format!("https://{rest}")
        } else if let Some(rest) = url.strip_prefix("ws://") {
            format!("http://{rest}")
        } else {
            url.to_string()
        };

        Some(url)
    }
}

/// Key-value store holding notification recipients.
///
/// An empty URL selects the in-process store, which does not survive restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Public base URL of the mini app, used for links inside notifications
    pub app_url: String,
    /// Upper bound for a single notification delivery
    pub request_timeout_seconds: u64,
    /// Pause after each delivery attempt
    pub send_interval_millis: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            app_url: String::new(),
            request_timeout_seconds: NOTIFICATION_REQUEST_TIMEOUT.as_secs(),
            send_interval_millis: DEFAULT_SEND_INTERVAL_MILLIS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    ///
    /// Variable names used by earlier deployments (`LIVEKIT_API_KEY`,
    /// `NEXT_PUBLIC_APP_URL`, ...) fill in whatever is still empty.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // TUNEIN_SERVER__HTTP_PORT, TUNEIN_LIVEKIT__API_KEY, ...
        builder = builder.add_source(
            Environment::with_prefix("TUNEIN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_fallbacks(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load from environment variables only (for Docker/K8s)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Fill empty settings from the legacy variable names
    pub fn apply_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fill = |slot: &mut String, name: &str| {
            if slot.is_empty() {
                if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
                    *slot = value;
                }
            }
        };

        fill(&mut self.livekit.api_key, "LIVEKIT_API_KEY");
        fill(&mut self.livekit.api_secret, "LIVEKIT_API_SECRET");
        fill(&mut self.livekit.url, "NEXT_PUBLIC_LIVEKIT_URL");
        fill(&mut self.livekit.url, "LIVEKIT_URL");
        fill(&mut self.notifications.app_url, "NEXT_PUBLIC_APP_URL");
        fill(&mut self.redis.url, "KV_URL");
        fill(&mut self.redis.url, "REDIS_URL");
    }

    /// Check for settings that would make the server misbehave.
    ///
    /// Missing LiveKit credentials are not an error here: the server still
    /// starts and token requests fail with a configuration error.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.http_port == 0 {
            errors.push("server.http_port must be greater than 0".to_string());
        }

        if !self.livekit.url.is_empty() {
            let url = self.livekit.url.as_str();
            let known_scheme = ["wss://", "ws://", "https://", "http://"]
                .iter()
                .any(|scheme| url.starts_with(scheme));
            if !known_scheme {
                errors.push(format!("livekit.url has an unsupported scheme: {url}"));
            }
        }

        if self.livekit.token_ttl_seconds == 0 {
            errors.push("livekit.token_ttl_seconds must be greater than 0".to_string());
        }

        if self.livekit.max_participants == 0 {
            errors.push("livekit.max_participants must be greater than 0".to_string());
        }

        if self.notifications.request_timeout_seconds == 0 {
            errors.push("notifications.request_timeout_seconds must be greater than 0".to_string());
        }

        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be \"json\" or \"pretty\", got \"{}\"",
                self.logging.format
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Get HTTP address
    #[must_use]
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 3000);
        assert_eq!(config.livekit.empty_timeout_seconds, 300);
        assert_eq!(config.livekit.max_participants, 100);
        assert_eq!(config.livekit.token_ttl_seconds, 3600);
        assert_eq!(config.notifications.request_timeout_seconds, 10);
        assert_eq!(config.notifications.send_interval_millis, 100);
        assert!(config.redis.url.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_address() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.http_port = 8080;

        assert_eq!(config.http_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_livekit_http_url() {
        let mut livekit = LiveKitConfig::default();
        assert_eq!(livekit.http_url(), None);

        livekit.url = "wss://radio.livekit.cloud/".to_string();
        assert_eq!(livekit.http_url().as_deref(), Some("https://radio.livekit.cloud"));

        livekit.url = "ws://localhost:7880".to_string();
        assert_eq!(livekit.http_url().as_deref(), Some("http://localhost:7880"));

        livekit.url = "https://radio.livekit.cloud".to_string();
        assert_eq!(livekit.http_url().as_deref(), Some("https://radio.livekit.cloud"));
    }

    #[test]
    fn test_fallbacks_fill_only_empty_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LIVEKIT_API_KEY", "legacy-key"),
            ("LIVEKIT_API_SECRET", "legacy-secret"),
            ("NEXT_PUBLIC_LIVEKIT_URL", "wss://legacy.example"),
            ("NEXT_PUBLIC_APP_URL", "https://radio.example"),
        ]);

        let mut config = Config::default();
        config.livekit.api_key = "structured-key".to_string();
        config.apply_fallbacks(|name| env.get(name).map(|v| (*v).to_string()));

        assert_eq!(config.livekit.api_key, "structured-key");
        assert_eq!(config.livekit.api_secret, "legacy-secret");
        assert_eq!(config.livekit.url, "wss://legacy.example");
        assert_eq!(config.notifications.app_url, "https://radio.example");
        assert!(config.redis.url.is_empty());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = Config::default();
        config.server.http_port = 0;
        config.livekit.url = "ftp://nope".to_string();
        config.logging.format = "xml".to_string();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("http_port")));
        assert!(errors.iter().any(|e| e.contains("unsupported scheme")));
        assert!(errors.iter().any(|e| e.contains("logging.format")));
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "server:\n  http_port: 9090\nlivekit:\n  url: wss://from-file.example\n  max_participants: 25\nnotifications:\n  send_interval_millis: 250\n"
        )
        .unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.server.http_port, 9090);
        assert_eq!(config.livekit.url, "wss://from-file.example");
        assert_eq!(config.livekit.max_participants, 25);
        assert_eq!(config.livekit.empty_timeout_seconds, 300);
        assert_eq!(config.notifications.send_interval_millis, 250);
    }
}
