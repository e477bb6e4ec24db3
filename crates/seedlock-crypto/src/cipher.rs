//! Multi-round AES-256-CTR transform between mnemonics
//!
//! Each round:
//! ```text
//! (key, iv) = derive_key_iv(pin ‖ decimal(round))
//! mnemonic  = encode(AES-256-CTR(key, iv, decode(mnemonic)))
//! ```
//! Round `i + 1` consumes round `i`'s output, so the chain is strictly sequential.
//! Encryption folds over `0..rounds`, decryption over the same indices reversed.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::codec::Codec;
use crate::error::MnemonicError;
use crate::keys::{derive_key_iv, round_seed};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Progress callback: (rounds done, rounds total, direction label)
pub type ProgressFn = Box<dyn Fn(u64, u64, &str) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn label(self) -> &'static str {
        match self {
            Direction::Forward => "encrypt",
            Direction::Backward => "decrypt",
        }
    }
}

/// PIN cipher over mnemonics of one dictionary.
///
/// The round count is part of the shared secret: decryption only inverts
/// encryption when both use the same PIN and the same `rounds`.
#[derive(Debug, Clone, Copy)]
pub struct RoundCipher<'a> {
    codec: &'a Codec,
}

impl<'a> RoundCipher<'a> {
    pub fn new(codec: &'a Codec) -> Self {
        Self { codec }
    }

    /// Run rounds `0..rounds` in ascending order.
    pub fn encrypt(
        &self,
        mnemonic: &str,
        pin: &SecretString,
        rounds: u32,
    ) -> Result<String, MnemonicError> {
        self.run(Direction::Forward, mnemonic, pin, rounds, None)
    }

    /// Run rounds `0..rounds` in descending order, undoing [`encrypt`](Self::encrypt).
    pub fn decrypt(
        &self,
        mnemonic: &str,
        pin: &SecretString,
        rounds: u32,
    ) -> Result<String, MnemonicError> {
        self.run(Direction::Backward, mnemonic, pin, rounds, None)
    }

    pub fn encrypt_with_progress(
        &self,
        mnemonic: &str,
        pin: &SecretString,
        rounds: u32,
        progress: Option<&ProgressFn>,
    ) -> Result<String, MnemonicError> {
        self.run(Direction::Forward, mnemonic, pin, rounds, progress)
    }

    pub fn decrypt_with_progress(
        &self,
        mnemonic: &str,
        pin: &SecretString,
        rounds: u32,
        progress: Option<&ProgressFn>,
    ) -> Result<String, MnemonicError> {
        self.run(Direction::Backward, mnemonic, pin, rounds, progress)
    }

    fn run(
        &self,
        direction: Direction,
        mnemonic: &str,
        pin: &SecretString,
        rounds: u32,
        progress: Option<&ProgressFn>,
    ) -> Result<String, MnemonicError> {
        if rounds == 0 {
            return Err(MnemonicError::ZeroRounds);
        }

        debug!(direction = direction.label(), rounds, "round cipher starting");

        let order: Box<dyn Iterator<Item = u32>> = match direction {
            Direction::Forward => Box::new(0..rounds),
            Direction::Backward => Box::new((0..rounds).rev()),
        };
        let total = u64::from(rounds);

        let result = order.zip(1..=total).try_fold(
            Zeroizing::new(mnemonic.to_string()),
            |current, (round, done)| {
                let next = self.round(&current, pin, round).inspect_err(|e| {
                    warn!(direction = direction.label(), round, error = %e, "round failed");
                })?;
                if let Some(report) = progress {
                    report(done, total, direction.label());
                }
                Ok::<_, MnemonicError>(next)
            },
        )?;

        debug!(direction = direction.label(), rounds, "round cipher finished");
        Ok(result.as_str().to_owned())
    }

    /// One decode → AES-256-CTR → encode step.
    fn round(
        &self,
        current: &str,
        pin: &SecretString,
        round: u32,
    ) -> Result<Zeroizing<String>, MnemonicError> {
        let seed = Zeroizing::new(round_seed(pin.expose_secret(), round));
        let key_iv = derive_key_iv(&seed);

        let mut entropy = Zeroizing::new(self.codec.decode(current)?);
        let mut cipher = Aes256Ctr::new(key_iv.key().into(), key_iv.iv().into());
        cipher.apply_keystream(&mut entropy);

        self.codec.encode(&entropy).map(Zeroizing::new)
    }
}

/// Protect an English mnemonic with a PIN.
pub fn encrypt_mnemonic(
    mnemonic: &str,
    pin: &SecretString,
    rounds: u32,
) -> Result<String, MnemonicError> {
    RoundCipher::new(crate::english()).encrypt(mnemonic, pin, rounds)
}

/// Recover an English mnemonic protected by [`encrypt_mnemonic`].
pub fn decrypt_mnemonic(
    mnemonic: &str,
    pin: &SecretString,
    rounds: u32,
) -> Result<String, MnemonicError> {
    RoundCipher::new(crate::english()).decrypt(mnemonic, pin, rounds)
}
