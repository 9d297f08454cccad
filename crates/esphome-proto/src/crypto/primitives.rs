//! The exact Noise primitive set `Noise_NNpsk0_25519_ChaChaPoly_SHA256`
//! requires: X25519 DH, HKDF-SHA256, SHA-256, ChaCha20-Poly1305 AEAD.
//!
//! Kept as small, independently tested wrappers so the symmetric/handshake
//! state machines in `crypto::symmetric` and `crypto::handshake` read as
//! pure protocol logic with no cipher-library calls inline.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use hkdf::Hkdf;
use sha2::{Digest, Sha256};
use static_assertions::const_assert_eq;
use thiserror::Error;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

pub const HASHLEN: usize = 32;
pub const BLOCKLEN: usize = 64;
pub const TAGLEN: usize = 16;

// Compile-time guard. If this fails, the suite is no longer
// `Noise_NNpsk0_25519_ChaChaPoly_SHA256` and every wire size in `frame` and
// `symmetric` needs re-deriving.
const_assert_eq!(HASHLEN, 32);
const_assert_eq!(TAGLEN, 16);

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("AEAD authentication failed")]
    AeadFailed,
    #[error("Diffie-Hellman output was all-zero")]
    ZeroDhOutput,
    #[error("nonce counter exhausted")]
    NonceExhausted,
    #[error("handshake message had unexpected length: expected {expected}, got {got}")]
    BadMessageLength { expected: usize, got: usize },
    #[error("handshake message arrived out of order")]
    OutOfOrder,
}

/// `DH(priv, pub) -> 32 bytes`. Returns `ZeroDhOutput` on an all-zero
/// result (a low-order/degenerate public key was supplied).
pub fn dh(local_secret: &StaticSecret, remote_public: &[u8; 32]) -> Result<[u8; 32], CryptoError> {
    let remote = PublicKey::from(*remote_public);
    let shared = local_secret.diffie_hellman(&remote);
    let bytes = shared.to_bytes();
    if bytes == [0u8; 32] {
        return Err(CryptoError::ZeroDhOutput);
    }
    Ok(bytes)
}

/// `HASH = SHA-256`.
pub fn hash(data: &[u8]) -> [u8; HASHLEN] {
    let digest = Sha256::digest(data);
    let mut out = [0u8; HASHLEN];
    out.copy_from_slice(&digest);
    out
}

pub fn hash2(a: &[u8], b: &[u8]) -> [u8; HASHLEN] {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    let digest = hasher.finalize();
    let mut out = [0u8; HASHLEN];
    out.copy_from_slice(&digest);
    out
}

/// `HKDF(chaining_key, ikm, n)`, HMAC-SHA-256 with salt = `chaining_key`, as
/// Noise's `HKDF` function specifies (`n` of 2 or 3 per caller).
pub fn hkdf(chaining_key: &[u8; HASHLEN], ikm: &[u8], outputs: usize) -> Vec<[u8; HASHLEN]> {
    let hk = Hkdf::<Sha256>::new(Some(chaining_key), ikm);
    let mut okm = Zeroizing::new(vec![0u8; outputs * HASHLEN]);
    hk.expand(&[], &mut okm).expect("okm length is a small static multiple of HASHLEN");

    (0..outputs)
        .map(|i| {
            let mut out = [0u8; HASHLEN];
            out.copy_from_slice(&okm[i * HASHLEN..(i + 1) * HASHLEN]);
            out
        })
        .collect()
}

/// Nonce layout: 4 zero bytes followed by the little-endian 8-byte counter.
pub fn make_nonce(counter: u64) -> [u8; 12] {
    let mut nonce = [0u8; 12];
    nonce[4..12].copy_from_slice(&counter.to_le_bytes());
    nonce
}

/// ChaCha20-Poly1305 AEAD encrypt. `key` is 32 bytes, `ad` is associated
/// data, `nonce_counter` is the direction's current nonce (not yet
/// incremented — callers own the counter).
pub fn aead_encrypt(
    key: &[u8; 32],
    nonce_counter: u64,
    ad: &[u8],
    plaintext: &[u8],
) -> Vec<u8> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    let nonce = make_nonce(nonce_counter);
    cipher
        .encrypt(Nonce::from_slice(&nonce), Payload { msg: plaintext, aad: ad })
        .expect("chacha20poly1305 encryption does not fail")
}

/// ChaCha20-Poly1305 AEAD decrypt. Returns `AeadFailed` on tag mismatch.
pub fn aead_decrypt(
    key: &[u8; 32],
    nonce_counter: u64,
    ad: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    let nonce = make_nonce(nonce_counter);
    cipher
        .decrypt(Nonce::from_slice(&nonce), Payload { msg: ciphertext, aad: ad })
        .map_err(|_| CryptoError::AeadFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash(b"noise"), hash(b"noise"));
        assert_ne!(hash(b"noise"), hash(b"Noise"));
    }

    #[test]
    fn nonce_layout_is_four_zero_bytes_then_le_counter() {
        let nonce = make_nonce(1);
        assert_eq!(&nonce[..4], &[0, 0, 0, 0]);
        assert_eq!(&nonce[4..], &1u64.to_le_bytes());
    }

    #[test]
    fn aead_roundtrip() {
        let key = [0x11u8; 32];
        let ad = b"associated";
        let plaintext = b"hello noise";
        let ct = aead_encrypt(&key, 0, ad, plaintext);
        let pt = aead_decrypt(&key, 0, ad, &ct).unwrap();
        assert_eq!(pt, plaintext);
    }

    #[test]
    fn aead_rejects_tampered_ciphertext() {
        let key = [0x22u8; 32];
        let mut ct = aead_encrypt(&key, 0, b"", b"data");
        ct[0] ^= 0xff;
        assert!(aead_decrypt(&key, 0, b"", &ct).is_err());
    }

    #[test]
    fn aead_rejects_wrong_nonce() {
        let key = [0x33u8; 32];
        let ct = aead_encrypt(&key, 0, b"", b"data");
        assert!(aead_decrypt(&key, 1, b"", &ct).is_err());
    }

    #[test]
    fn dh_is_symmetric() {
        let a = StaticSecret::random_from_rng(rand::thread_rng());
        let b = StaticSecret::random_from_rng(rand::thread_rng());
        let a_pub = PublicKey::from(&a).to_bytes();
        let b_pub = PublicKey::from(&b).to_bytes();

        let shared_ab = dh(&a, &b_pub).unwrap();
        let shared_ba = dh(&b, &a_pub).unwrap();
        assert_eq!(shared_ab, shared_ba);
    }

    #[test]
    fn hkdf_two_outputs_differ() {
        let ck = [0u8; 32];
        let outputs = hkdf(&ck, b"ikm", 2);
        assert_eq!(outputs.len(), 2);
        assert_ne!(outputs[0], outputs[1]);
    }

    #[test]
    fn hkdf_three_outputs_is_deterministic() {
        let ck = [0x44u8; 32];
        let a = hkdf(&ck, b"psk", 3);
        let b = hkdf(&ck, b"psk", 3);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }
}
