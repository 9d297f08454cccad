//! Handshake state machine for pattern `NNpsk0`, compiled to the two
//! messages ESPHome's native API encryption layer exchanges.
//!
//! Only the initiator role is implemented — the client always dials the
//! device. Tests that need a responder drive the mirrored steps directly
//! against `SymmetricState`/`CipherState`.

use rand::RngCore;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use super::primitives::{self, CryptoError};
use super::symmetric::{CipherState, SymmetricState};

pub const PROTOCOL_NAME: &[u8] = b"Noise_NNpsk0_25519_ChaChaPoly_SHA256";

/// The ESPHome-specific prologue mixed into the handshake hash before the
/// first message of every handshake.
pub const PROLOGUE: &[u8] = b"NoiseAPIInit\x00\x00";

/// A completed handshake's pair of transport cipher states.
pub struct TransportKeys {
    pub send: CipherState,
    pub recv: CipherState,
}

/// Initiator side of the `NNpsk0` handshake. Construct with `new`, call
/// `write_message_1`, feed the responder's reply to `read_message_2`.
pub struct HandshakeInitiator {
    symmetric: SymmetricState,
    ephemeral: StaticSecret,
    ephemeral_public: [u8; 32],
    psk: Zeroizing<[u8; 32]>,
    stage: Stage,
}

#[derive(PartialEq, Eq, Debug)]
enum Stage {
    Initial,
    Message1Sent,
    Complete,
}

impl HandshakeInitiator {
    pub fn new(psk: [u8; 32]) -> Self {
        let mut symmetric = SymmetricState::initialize(PROTOCOL_NAME);
        symmetric.mix_hash(PROLOGUE);

        let ephemeral = StaticSecret::random_from_rng(rand::thread_rng());
        let ephemeral_public = *PublicKey::from(&ephemeral).as_bytes();

        Self {
            symmetric,
            ephemeral,
            ephemeral_public,
            psk: Zeroizing::new(psk),
            stage: Stage::Initial,
        }
    }

    /// `psk, e`: `MixKeyAndHash(psk)`, generate+send ephemeral, mix it in
    /// both as hash and as key material (psk0 mixes the ephemeral after the
    /// psk), then emit `EncryptAndHash(empty)` — an empty payload ciphertext
    /// with its tag.
    pub fn write_message_1(&mut self) -> Result<Vec<u8>, CryptoError> {
        if self.stage != Stage::Initial {
            return Err(CryptoError::OutOfOrder);
        }

        self.symmetric.mix_key_and_hash(&*self.psk);

        self.symmetric.mix_hash(&self.ephemeral_public);
        self.symmetric.mix_key(&self.ephemeral_public);

        let payload_ct = self.symmetric.encrypt_and_hash(&[])?;

        let mut message = Vec::with_capacity(32 + payload_ct.len());
        message.extend_from_slice(&self.ephemeral_public);
        message.extend_from_slice(&payload_ct);

        self.stage = Stage::Message1Sent;
        Ok(message)
    }

    /// `e, ee`: read the responder's ephemeral `re`, `MixHash(re)`,
    /// `MixKey(re)`, `MixKey(DH(e, re))`, then `DecryptAndHash` the
    /// remainder. Returns the two transport cipher states on success.
    pub fn read_message_2(mut self, message: &[u8]) -> Result<TransportKeys, CryptoError> {
        if self.stage != Stage::Message1Sent {
            return Err(CryptoError::OutOfOrder);
        }
        if message.len() < 32 + primitives::TAGLEN {
            return Err(CryptoError::BadMessageLength {
                expected: 32 + primitives::TAGLEN,
                got: message.len(),
            });
        }

        let mut re = [0u8; 32];
        re.copy_from_slice(&message[..32]);

        self.symmetric.mix_hash(&re);
        self.symmetric.mix_key(&re);

        let dh_ee = primitives::dh(&self.ephemeral, &re)?;
        self.symmetric.mix_key(&dh_ee);

        self.symmetric.decrypt_and_hash(&message[32..])?;

        self.stage = Stage::Complete;
        let (send, recv) = self.symmetric.split();
        Ok(TransportKeys { send, recv })
    }
}

/// Responder-side mirror used by mock-device test fixtures. Not part of the
/// client's own role, since the client never accepts inbound handshakes.
#[cfg(any(test, feature = "test-support"))]
pub struct HandshakeResponder {
    symmetric: SymmetricState,
    ephemeral: StaticSecret,
    ephemeral_public: [u8; 32],
    psk: Zeroizing<[u8; 32]>,
}

#[cfg(any(test, feature = "test-support"))]
impl HandshakeResponder {
    pub fn new(psk: [u8; 32]) -> Self {
        let mut symmetric = SymmetricState::initialize(PROTOCOL_NAME);
        symmetric.mix_hash(PROLOGUE);

        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        let ephemeral = StaticSecret::from(seed);
        let ephemeral_public = *PublicKey::from(&ephemeral).as_bytes();

        Self { symmetric, ephemeral, ephemeral_public, psk: Zeroizing::new(psk) }
    }

    pub fn read_message_1_write_message_2(
        mut self,
        message_1: &[u8],
    ) -> Result<(Vec<u8>, TransportKeys), CryptoError> {
        if message_1.len() < 32 + primitives::TAGLEN {
            return Err(CryptoError::BadMessageLength {
                expected: 32 + primitives::TAGLEN,
                got: message_1.len(),
            });
        }

        self.symmetric.mix_key_and_hash(&*self.psk);

        let mut ie = [0u8; 32];
        ie.copy_from_slice(&message_1[..32]);
        self.symmetric.mix_hash(&ie);
        self.symmetric.mix_key(&ie);

        self.symmetric.decrypt_and_hash(&message_1[32..])?;

        self.symmetric.mix_hash(&self.ephemeral_public);
        self.symmetric.mix_key(&self.ephemeral_public);

        let dh_ee = primitives::dh(&self.ephemeral, &ie)?;
        self.symmetric.mix_key(&dh_ee);

        let payload_ct = self.symmetric.encrypt_and_hash(&[])?;

        let mut message_2 = Vec::with_capacity(32 + payload_ct.len());
        message_2.extend_from_slice(&self.ephemeral_public);
        message_2.extend_from_slice(&payload_ct);

        // Responder directions mirror the initiator's: what the initiator
        // calls "send" the responder must "receive" from, and vice versa.
        let (recv, send) = self.symmetric.split();
        Ok((message_2, TransportKeys { send, recv }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_pair(psk: [u8; 32]) -> (TransportKeys, TransportKeys) {
        let mut initiator = HandshakeInitiator::new(psk);
        let msg1 = initiator.write_message_1().unwrap();

        let responder = HandshakeResponder::new(psk);
        let (msg2, responder_keys) = responder.read_message_1_write_message_2(&msg1).unwrap();

        let initiator_keys = initiator.read_message_2(&msg2).unwrap();
        (initiator_keys, responder_keys)
    }

    #[test]
    fn handshake_completes_and_keys_cross_talk() {
        let psk = [0u8; 32];
        let (mut i_keys, mut r_keys) = completed_pair(psk);

        let ct = i_keys.send.encrypt_with_ad(&[], b"hello device").unwrap();
        let pt = r_keys.recv.decrypt_with_ad(&[], &ct).unwrap();
        assert_eq!(pt, b"hello device");

        let ct2 = r_keys.send.encrypt_with_ad(&[], b"hello client").unwrap();
        let pt2 = i_keys.recv.decrypt_with_ad(&[], &ct2).unwrap();
        assert_eq!(pt2, b"hello client");
    }

    #[test]
    fn wrong_psk_fails_on_second_message_not_first() {
        let mut initiator = HandshakeInitiator::new([1u8; 32]);
        let msg1 = initiator.write_message_1().unwrap();

        // A responder with the wrong PSK still parses message 1 (it has no
        // key yet to authenticate against) but produces a message 2 whose
        // AEAD tag the initiator cannot verify.
        let responder = HandshakeResponder::new([2u8; 32]);
        let (msg2, _) = responder.read_message_1_write_message_2(&msg1).unwrap();

        let result = initiator.read_message_2(&msg2);
        assert!(result.is_err(), "wrong PSK must fail on message 2");
    }

    #[test]
    fn out_of_order_calls_are_rejected() {
        let mut initiator = HandshakeInitiator::new([0u8; 32]);
        // read_message_2 before write_message_1 is a programmer error.
        let err = initiator.write_message_1();
        assert!(err.is_ok());
        let err_again = initiator.write_message_1();
        assert!(matches!(err_again, Err(CryptoError::OutOfOrder)));
    }

    #[test]
    fn truncated_message_2_is_rejected() {
        let mut initiator = HandshakeInitiator::new([0u8; 32]);
        initiator.write_message_1().unwrap();
        let result = initiator.read_message_2(&[0u8; 10]);
        assert!(matches!(result, Err(CryptoError::BadMessageLength { .. })));
    }
}
