//! Symmetric and cipher state — `h`, `ck`, and the running `CipherState`
//! shared by every Noise message exchanged during the handshake.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::primitives::{self, CryptoError, HASHLEN};

/// Noise's (key, nonce) pair for a single direction.
///
/// Key material is wiped on drop. `Debug` is intentionally not derived —
/// nothing about a `CipherState` should be printable.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct CipherState {
    key: Option<[u8; 32]>,
    nonce: u64,
}

impl CipherState {
    pub fn empty() -> Self {
        Self { key: None, nonce: 0 }
    }

    pub fn new(key: [u8; 32]) -> Self {
        Self { key: Some(key), nonce: 0 }
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Encrypts with the running key if one is set, otherwise returns
    /// `plaintext` unchanged (Noise's `EncryptAndHash` fallback for the
    /// pre-key portion of the handshake).
    pub fn encrypt_with_ad(&mut self, ad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let Some(key) = self.key else {
            return Ok(plaintext.to_vec());
        };
        if self.nonce == u64::MAX {
            return Err(CryptoError::NonceExhausted);
        }
        let ct = primitives::aead_encrypt(&key, self.nonce, ad, plaintext);
        self.nonce += 1;
        Ok(ct)
    }

    pub fn decrypt_with_ad(&mut self, ad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let Some(key) = self.key else {
            return Ok(ciphertext.to_vec());
        };
        if self.nonce == u64::MAX {
            return Err(CryptoError::NonceExhausted);
        }
        let pt = primitives::aead_decrypt(&key, self.nonce, ad, ciphertext)?;
        self.nonce += 1;
        Ok(pt)
    }

    /// Current nonce counter, for tests asserting strict monotonicity.
    #[cfg(test)]
    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

/// Running handshake hash `h`, chaining key `ck`, and the current
/// `CipherState`, as specified by Noise's `SymmetricState`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricState {
    h: [u8; HASHLEN],
    ck: [u8; HASHLEN],
    cipher: CipherState,
}

impl SymmetricState {
    /// Initializes `h` from the protocol name (hashed if longer than
    /// `HASHLEN`, else right-padded with zeros), `ck = h`, empty cipher.
    pub fn initialize(protocol_name: &[u8]) -> Self {
        let mut h = [0u8; HASHLEN];
        if protocol_name.len() <= HASHLEN {
            h[..protocol_name.len()].copy_from_slice(protocol_name);
        } else {
            h = primitives::hash(protocol_name);
        }
        Self { h, ck: h, cipher: CipherState::empty() }
    }

    pub fn h(&self) -> &[u8; HASHLEN] {
        &self.h
    }

    pub fn mix_hash(&mut self, data: &[u8]) {
        self.h = primitives::hash2(&self.h, data);
    }

    pub fn mix_key(&mut self, ikm: &[u8]) {
        let outputs = primitives::hkdf(&self.ck, ikm, 2);
        self.ck = outputs[0];
        self.cipher = CipherState::new(outputs[1]);
    }

    /// Used for `psk`: splits HKDF into three outputs, updates `ck`, mixes
    /// the second output into `h`, and installs the third as the cipher
    /// key.
    pub fn mix_key_and_hash(&mut self, ikm: &[u8]) {
        let outputs = primitives::hkdf(&self.ck, ikm, 3);
        self.ck = outputs[0];
        self.mix_hash(&outputs[1]);
        self.cipher = CipherState::new(outputs[2]);
    }

    /// If the cipher has a key, AEAD-encrypts with `h` as associated data
    /// and mixes the ciphertext into `h`; otherwise returns `plaintext` and
    /// mixes `plaintext` into `h`.
    pub fn encrypt_and_hash(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let out = self.cipher.encrypt_with_ad(&self.h, plaintext)?;
        self.mix_hash(&out);
        Ok(out)
    }

    /// Symmetric with `encrypt_and_hash`, but mixes the **ciphertext**
    /// (not the recovered plaintext) into `h`.
    pub fn decrypt_and_hash(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let out = self.cipher.decrypt_with_ad(&self.h, ciphertext)?;
        self.mix_hash(ciphertext);
        Ok(out)
    }

    /// Returns two `CipherState`s, one per direction, each keyed from
    /// `HKDF(ck, empty, 2)` with nonce 0.
    pub fn split(&self) -> (CipherState, CipherState) {
        let outputs = primitives::hkdf(&self.ck, &[], 2);
        (CipherState::new(outputs[0]), CipherState::new(outputs[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_hash_changes_h() {
        let mut s = SymmetricState::initialize(b"Noise_NNpsk0_25519_ChaChaPoly_SHA256");
        let before = *s.h();
        s.mix_hash(b"data");
        assert_ne!(before, *s.h());
    }

    #[test]
    fn encrypt_and_hash_without_key_returns_plaintext_and_mixes_it() {
        let mut s = SymmetricState::initialize(b"proto");
        let before = *s.h();
        let out = s.encrypt_and_hash(b"payload").unwrap();
        assert_eq!(out, b"payload");
        assert_ne!(before, *s.h());
    }

    #[test]
    fn mix_key_installs_cipher_with_key() {
        let mut s = SymmetricState::initialize(b"proto");
        assert!(!s.cipher.has_key());
        s.mix_key(b"ikm");
        assert!(s.cipher.has_key());
    }

    #[test]
    fn encrypt_decrypt_and_hash_are_symmetric_given_matching_state() {
        let mut sender = SymmetricState::initialize(b"proto");
        let mut receiver = SymmetricState::initialize(b"proto");
        sender.mix_key(b"shared");
        receiver.mix_key(b"shared");

        let ct = sender.encrypt_and_hash(b"hello").unwrap();
        let pt = receiver.decrypt_and_hash(&ct).unwrap();
        assert_eq!(pt, b"hello");
        assert_eq!(sender.h(), receiver.h());
    }

    #[test]
    fn split_produces_independent_directional_ciphers() {
        let mut s = SymmetricState::initialize(b"proto");
        s.mix_key(b"ikm");
        let (mut send, mut recv) = s.split();
        let ct = send.encrypt_with_ad(&[], b"x").unwrap();
        // Using the wrong direction's cipher must not decrypt correctly.
        assert!(recv.decrypt_with_ad(&[], &ct).is_err());
    }

    #[test]
    fn nonce_is_strictly_monotone() {
        let mut cipher = CipherState::new([0x55u8; 32]);
        assert_eq!(cipher.nonce(), 0);
        cipher.encrypt_with_ad(&[], b"a").unwrap();
        assert_eq!(cipher.nonce(), 1);
        cipher.encrypt_with_ad(&[], b"b").unwrap();
        assert_eq!(cipher.nonce(), 2);
    }
}
