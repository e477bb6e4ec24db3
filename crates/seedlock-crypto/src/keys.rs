//! Per-round key schedule: seed → (AES-256 key, CTR initial counter)

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::{IV_SIZE, KEY_SIZE};

/// AES-256 key and CTR initial counter block. Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyIv {
    key: [u8; KEY_SIZE],
    iv: [u8; IV_SIZE],
}

impl KeyIv {
    pub fn key(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    pub fn iv(&self) -> &[u8; IV_SIZE] {
        &self.iv
    }
}

impl Drop for KeyIv {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
    }
}

impl std::fmt::Debug for KeyIv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyIv")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

/// Derive a key and IV from raw seed bytes.
///
/// `key = SHA-256(seed)`, `iv = SHA-256(key)[..16]`.
pub fn derive_key_iv(seed: &[u8]) -> KeyIv {
    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(&Sha256::digest(seed));

    let mut key_hash = Sha256::digest(key);
    let mut iv = [0u8; IV_SIZE];
    iv.copy_from_slice(&key_hash[..IV_SIZE]);
    key_hash.as_mut_slice().zeroize();

    KeyIv { key, iv }
}

/// Derive a key and IV from a UTF-8 seed string.
pub fn get_key_and_iv(seed: &str) -> KeyIv {
    derive_key_iv(seed.as_bytes())
}

/// Seed for one cipher round: the PIN followed by the round index in decimal.
///
/// Plain concatenation, so ("12", 3) and ("1", 23) share a seed. Kept as-is
/// because existing ciphertexts depend on it.
pub(crate) fn round_seed(pin: &str, round: u32) -> Vec<u8> {
    format!("{pin}{round}").into_bytes()
}
