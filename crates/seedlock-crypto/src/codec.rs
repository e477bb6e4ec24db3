//! Mnemonic ⇄ entropy bit packing
//!
//! Layout (MSB first):
//! ```text
//! [entropy: 8·len bits][checksum: len/4 bits]  →  11-bit word indices
//! checksum = leading bits of SHA-256(entropy)
//! ```
//! 16/20/24/28/32 bytes of entropy give 12/15/18/21/24 words.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::MnemonicError;
use crate::wordlist::Dictionary;
use crate::{BITS_PER_WORD, ENTROPY_LENGTHS, WORD_COUNTS};

/// Encoder/decoder bound to one dictionary.
#[derive(Debug, Clone)]
pub struct Codec {
    dict: Dictionary,
}

impl Codec {
    pub fn new(dict: Dictionary) -> Self {
        Self { dict }
    }

    pub fn english() -> Self {
        Self::new(Dictionary::english())
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Encode entropy as a space-separated mnemonic.
    ///
    /// Fails only when `entropy` is not one of the five standard lengths.
    pub fn encode(&self, entropy: &[u8]) -> Result<String, MnemonicError> {
        if !ENTROPY_LENGTHS.contains(&entropy.len()) {
            return Err(MnemonicError::InvalidLength(entropy.len()));
        }

        let checksum_bits = entropy.len() / 4;
        let hash = Sha256::digest(entropy);

        // The checksum is at most 8 bits, so the first hash byte always covers it
        let mut bits = Zeroizing::new(Vec::with_capacity(entropy.len() + 1));
        bits.extend_from_slice(entropy);
        bits.push(hash[0]);

        let word_count = (entropy.len() * 8 + checksum_bits) / BITS_PER_WORD;
        let words: Vec<&str> = (0..word_count)
            .map(|i| self.dict.word_at(read_index(&bits, i * BITS_PER_WORD)))
            .collect();

        Ok(words.join(" "))
    }

    /// Decode a mnemonic back to its entropy, verifying the checksum.
    ///
    /// Words are split on any whitespace and looked up exactly; no case folding.
    pub fn decode(&self, mnemonic: &str) -> Result<Vec<u8>, MnemonicError> {
        let indices = mnemonic
            .split_whitespace()
            .map(|word| {
                self.dict
                    .index_of(word)
                    .ok_or_else(|| MnemonicError::UnknownWord(word.to_string()))
            })
            .collect::<Result<Vec<u16>, _>>()?;

        if !WORD_COUNTS.contains(&indices.len()) {
            return Err(MnemonicError::InvalidWordCount(indices.len()));
        }

        let total_bits = indices.len() * BITS_PER_WORD;
        let checksum_bits = total_bits / (32 + 1);
        let entropy_len = (total_bits - checksum_bits) / 8;

        let mut bits = Zeroizing::new(vec![0u8; total_bits.div_ceil(8)]);
        for (i, &index) in indices.iter().enumerate() {
            write_index(&mut bits, i * BITS_PER_WORD, index);
        }

        let entropy = &bits[..entropy_len];
        let hash = Sha256::digest(entropy);
        let shift = 8 - checksum_bits;
        if bits[entropy_len] >> shift != hash[0] >> shift {
            return Err(MnemonicError::ChecksumMismatch);
        }

        Ok(entropy.to_vec())
    }
}

/// Read the 11-bit big-endian value starting at bit `offset`.
fn read_index(buf: &[u8], offset: usize) -> u16 {
    (offset..offset + BITS_PER_WORD).fold(0u16, |acc, pos| {
        let bit = (buf[pos / 8] >> (7 - pos % 8)) & 1;
        (acc << 1) | u16::from(bit)
    })
}

/// Write an 11-bit value MSB first at bit `offset` into a zeroed buffer.
fn write_index(buf: &mut [u8], offset: usize, index: u16) {
    for b in 0..BITS_PER_WORD {
        if (index >> (BITS_PER_WORD - 1 - b)) & 1 == 1 {
            let pos = offset + b;
            buf[pos / 8] |= 0x80 >> (pos % 8);
        }
    }
}

/// Canonical mnemonic text: lowercase words joined by single spaces.
pub fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode an English mnemonic to entropy.
pub fn mnemonic_to_entropy(mnemonic: &str) -> Result<Vec<u8>, MnemonicError> {
    crate::english().decode(mnemonic)
}

/// Encode entropy as an English mnemonic.
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<String, MnemonicError> {
    crate::english().encode(entropy)
}


#[cfg(test)]
mod proptest_suite {
    use super::*;
    use bip39::Mnemonic;
    use proptest::prelude::*;

    fn standard_entropy() -> impl Strategy<Value = Vec<u8>> {
        prop::sample::select(ENTROPY_LENGTHS.to_vec())
            .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(entropy in standard_entropy()) {
            let mnemonic = entropy_to_mnemonic(&entropy).unwrap();
            prop_assert_eq!(mnemonic_to_entropy(&mnemonic).unwrap(), entropy);
        }

        #[test]
        fn encode_is_stable(entropy in standard_entropy()) {
            let first = entropy_to_mnemonic(&entropy).unwrap();
            let again = entropy_to_mnemonic(&mnemonic_to_entropy(&first).unwrap()).unwrap();
            prop_assert_eq!(first, again);
        }

        #[test]
        fn matches_bip39_crate(entropy in standard_entropy()) {
            let ours = entropy_to_mnemonic(&entropy).unwrap();
            let reference = Mnemonic::from_entropy(&entropy).unwrap().to_string();
            prop_assert_eq!(ours, reference);
        }
    }
}
