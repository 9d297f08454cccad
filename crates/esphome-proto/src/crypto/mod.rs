//! Noise `Noise_NNpsk0_25519_ChaChaPoly_SHA256` handshake and transport
//! crypto, split into the layers Noise itself defines: primitives, running
//! symmetric/cipher state, and the handshake message choreography.

mod handshake;
mod primitives;
mod symmetric;

pub use handshake::{HandshakeInitiator, TransportKeys, PROLOGUE, PROTOCOL_NAME};
pub use primitives::{CryptoError, HASHLEN, TAGLEN};
pub use symmetric::CipherState;

#[cfg(any(test, feature = "test-support"))]
pub use handshake::HandshakeResponder;
