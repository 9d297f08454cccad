//! Typed client configuration: built-in defaults, optionally overridden by a
//! TOML file, then by `ESPHOME_*` environment variables.

use base64::Engine;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Base64-encoded 32-byte pre-shared key. Presence selects Noise framing.
    pub encryption_key: Option<String>,
    pub client_id: String,
    pub password: String,
    pub reconnect: bool,
    pub reconnect_interval_ms: u64,
    pub connection_timeout_ms: u64,
    pub keepalive_interval_ms: u64,
    pub ping_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 6053,
            encryption_key: None,
            client_id: "esphome-client".to_string(),
            password: String::new(),
            reconnect: true,
            reconnect_interval_ms: 15_000,
            connection_timeout_ms: 30_000,
            keepalive_interval_ms: 20_000,
            ping_timeout_ms: 90_000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("host is required")]
    MissingHost,
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("encryption key is not valid base64: {0}")]
    BadPskEncoding(base64::DecodeError),
    #[error("encryption key must decode to exactly 32 bytes, got {0}")]
    BadPskLength(usize),
    #[error("{0} is not a valid duration in milliseconds")]
    BadDuration(&'static str),
}

impl ClientConfig {
    /// Loads defaults, applies an optional TOML file, then applies
    /// `ESPHOME_*` environment variable overrides. Decodes and validates
    /// the PSK, if present, before returning.
    pub fn load(file_path: Option<&Path>) -> Result<(Self, Option<[u8; 32]>), ConfigError> {
        let mut config = Self::default();

        if let Some(path) = file_path {
            if path.exists() {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
                config = toml::from_str(&text)
                    .map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))?;
            }
        }

        config.apply_env_overrides();

        if config.host.is_empty() {
            return Err(ConfigError::MissingHost);
        }

        let psk = config.decode_psk()?;
        Ok((config, psk))
    }

    fn decode_psk(&self) -> Result<Option<[u8; 32]>, ConfigError> {
        let Some(encoded) = &self.encryption_key else {
            return Ok(None);
        };
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(ConfigError::BadPskEncoding)?;
        let len = bytes.len();
        let psk: [u8; 32] = bytes.try_into().map_err(|_| ConfigError::BadPskLength(len))?;
        Ok(Some(psk))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ESPHOME_HOST") {
            self.host = v;
        }
        if let Ok(v) = std::env::var("ESPHOME_PORT") {
            if let Ok(p) = v.parse() {
                self.port = p;
            }
        }
        if let Ok(v) = std::env::var("ESPHOME_PSK") {
            self.encryption_key = Some(v);
        }
        if let Ok(v) = std::env::var("ESPHOME_CLIENT_ID") {
            self.client_id = v;
        }
        if let Ok(v) = std::env::var("ESPHOME_PASSWORD") {
            self.password = v;
        }
        if let Ok(v) = std::env::var("ESPHOME_RECONNECT") {
            self.reconnect = v == "true" || v == "1";
        }
        if let Ok(v) = std::env::var("ESPHOME_RECONNECT_INTERVAL_MS") {
            if let Ok(p) = v.parse() {
                self.reconnect_interval_ms = p;
            }
        }
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_millis(self.keepalive_interval_ms)
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }

    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_millis(self.reconnect_interval_ms)
    }
}
