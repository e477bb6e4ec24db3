use thiserror::Error;

/// Failures of the mnemonic codec and the round cipher.
///
/// Callers branch on the variant: during decryption a `ChecksumMismatch`
/// usually means a mistyped phrase, while `UnknownWord` names the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemonicError {
    #[error("invalid mnemonic word: {0}")]
    UnknownWord(String),

    #[error("invalid mnemonic checksum")]
    ChecksumMismatch,

    #[error("invalid entropy length: {0} bytes (expected 16, 20, 24, 28 or 32)")]
    InvalidLength(usize),

    #[error("invalid mnemonic length: {0} words (expected 12, 15, 18, 21 or 24)")]
    InvalidWordCount(usize),

    #[error("round count must be at least 1")]
    ZeroRounds,
}

/// Failures while building a [`Dictionary`](crate::Dictionary) from external words.
#[derive(Debug, Error)]
pub enum WordlistError {
    #[error("wordlist must contain exactly 2048 words, found {0}")]
    WrongSize(usize),

    #[error("duplicate wordlist entry: {0}")]
    Duplicate(String),

    #[error("empty wordlist entry at index {0}")]
    Empty(usize),

    #[error("wordlist entry {0:?} must be a single lowercase token")]
    Malformed(String),

    #[error("reading wordlist: {0}")]
    Io(#[from] std::io::Error),
}
