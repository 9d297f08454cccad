//! The top-level error taxonomy. `#[from]` conversions let a `?` chain
//! starting in the codec or crypto layers reach the session loop without
//! manual mapping at every boundary.

use esphome_proto::codec::WireError;
use esphome_proto::config::ConfigError;
use esphome_proto::crypto::CryptoError;
use esphome_registry::RegistryError;
use thiserror::Error;

use crate::frame::FrameError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to connect: {0}")]
    Connect(#[source] std::io::Error),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error("device rejected the configured password")]
    AuthFailure,

    #[error("device speaks api v{device_major}.{device_minor}, client only supports major v{supported_major}")]
    UnsupportedApiVersion { device_major: u32, device_minor: u32, supported_major: u32 },

    #[error("protocol error: {0}")]
    ProtocolError(String),

    #[error(transparent)]
    UnknownEntity(#[from] RegistryError),

    #[error("timed out waiting for {0}")]
    Timeout(&'static str),

    #[error("connection is closed")]
    Closed,
}

impl ClientError {
    /// Whether reconnect may be attempted after this error, per the
    /// propagation rule: permanent misconfiguration never auto-retries.
    pub fn is_reconnectable(&self) -> bool {
        !matches!(
            self,
            ClientError::AuthFailure
                | ClientError::UnsupportedApiVersion { .. }
                | ClientError::Config(_)
                | ClientError::Frame(FrameError::EncryptionRequired)
                | ClientError::Frame(FrameError::EncryptionMismatch)
        )
    }
}
