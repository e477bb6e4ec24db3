//! Fresh random mnemonics

use rand::RngCore;
use zeroize::Zeroizing;

use crate::codec::Codec;
use crate::error::MnemonicError;
use crate::{ENTROPY_LENGTHS, WORD_COUNTS};

impl Codec {
    /// Encode `entropy_len` bytes from the OS-seeded CSPRNG.
    pub fn generate(&self, entropy_len: usize) -> Result<String, MnemonicError> {
        if !ENTROPY_LENGTHS.contains(&entropy_len) {
            return Err(MnemonicError::InvalidLength(entropy_len));
        }

        let mut entropy = Zeroizing::new(vec![0u8; entropy_len]);
        rand::thread_rng().fill_bytes(&mut entropy);
        self.encode(&entropy)
    }
}

/// Generate a random English mnemonic from `entropy_len` bytes (16, 20, 24, 28 or 32).
pub fn generate_mnemonic(entropy_len: usize) -> Result<String, MnemonicError> {
    crate::english().generate(entropy_len)
}

/// Entropy length in bytes for a mnemonic of `words` words.
pub fn entropy_len_for_words(words: usize) -> Result<usize, MnemonicError> {
    WORD_COUNTS
        .iter()
        .position(|&w| w == words)
        .map(|i| ENTROPY_LENGTHS[i])
        .ok_or(MnemonicError::InvalidWordCount(words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::mnemonic_to_entropy;

    #[test]
    fn test_generate_mnemonic() {
        let words = generate_mnemonic(16).unwrap();
        assert_eq!(words.split(' ').count(), 12);
        assert_eq!(mnemonic_to_entropy(&words).unwrap().len(), 16);
    }

    #[test]
    fn test_generate_all_lengths() {
        for (len, count) in ENTROPY_LENGTHS.iter().zip(WORD_COUNTS) {
            let words = generate_mnemonic(*len).unwrap();
            assert_eq!(words.split(' ').count(), count);
        }
    }

    #[test]
    fn test_generate_invalid_length() {
        assert_eq!(generate_mnemonic(0), Err(MnemonicError::InvalidLength(0)));
        assert_eq!(generate_mnemonic(17), Err(MnemonicError::InvalidLength(17)));
    }

    #[test]
    fn test_generated_mnemonics_differ() {
        let a = generate_mnemonic(32).unwrap();
        let b = generate_mnemonic(32).unwrap();
        assert_ne!(a, b, "random mnemonics must differ");
    }

    #[test]
    fn test_entropy_len_for_words() {
        assert_eq!(entropy_len_for_words(12), Ok(16));
        assert_eq!(entropy_len_for_words(24), Ok(32));
        assert_eq!(
            entropy_len_for_words(13),
            Err(MnemonicError::InvalidWordCount(13))
        );
    }
}
