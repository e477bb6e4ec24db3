//! seedlock-crypto: PIN-protected BIP-39 mnemonics
//!
//! A protected mnemonic is itself a valid mnemonic. Every round decodes the
//! current phrase to entropy, runs AES-256-CTR over it with a key derived from
//! the PIN and the round index, and re-encodes the result:
//!
//! ```text
//! mnemonic ─decode─▶ entropy ─AES-256-CTR(key_i, iv_i)─▶ entropy' ─encode─▶ mnemonic'
//!
//! (key_i, iv_i) = (SHA-256(pin ‖ i), SHA-256(key_i)[..16])
//! ```
//!
//! Encryption runs rounds `0..n` in ascending order, decryption in descending
//! order. CTR mode is its own inverse, so the reversed chain undoes the forward one.

pub mod cipher;
pub mod codec;
pub mod error;
pub mod generate;
pub mod keys;
pub mod wordlist;

use std::sync::OnceLock;

pub use cipher::{decrypt_mnemonic, encrypt_mnemonic, ProgressFn, RoundCipher};
pub use codec::{entropy_to_mnemonic, mnemonic_to_entropy, normalize, Codec};
pub use error::{MnemonicError, WordlistError};
pub use generate::{entropy_len_for_words, generate_mnemonic};
pub use keys::{derive_key_iv, get_key_and_iv, KeyIv};
pub use wordlist::Dictionary;

/// Size of an AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of an AES-CTR initial counter block in bytes
pub const IV_SIZE: usize = 16;

/// Number of words in a BIP-39 dictionary
pub const WORDLIST_SIZE: usize = 2048;

/// Bits encoded by one mnemonic word
pub const BITS_PER_WORD: usize = 11;

/// Round count used when the caller does not pick one
pub const DEFAULT_ROUNDS: u32 = 1_000_000;

/// Entropy lengths (bytes) that map to a whole number of words
pub const ENTROPY_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

/// Word counts produced by the entropy lengths above
pub const WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// The shared English codec behind the free-function entry points.
pub(crate) fn english() -> &'static Codec {
    static ENGLISH: OnceLock<Codec> = OnceLock::new();
    ENGLISH.get_or_init(Codec::english)
}
