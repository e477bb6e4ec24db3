use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use seedlock_crypto::{DEFAULT_ROUNDS, ENTROPY_LENGTHS};

use crate::error::{SeedlockError, SeedlockResult};

/// Top-level configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedlockConfig {
    pub cipher: CipherConfig,
    pub generator: GeneratorConfig,
    pub wordlist: WordlistConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    /// Rounds per encrypt/decrypt (default: 1000000). Must match between the two.
    pub rounds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Entropy bytes for `generate` (16, 20, 24, 28 or 32; default: 16)
    pub entropy_bytes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordlistConfig {
    /// Alternative 2048-word list, one word per line (default: BIP-39 English)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: warn)
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { entropy_bytes: 16 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Text,
        }
    }
}

impl SeedlockConfig {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> SeedlockResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SeedlockError::Config(format!("reading {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| SeedlockError::Config(format!("parsing {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SeedlockResult<()> {
        if self.cipher.rounds == 0 {
            return Err(SeedlockError::Config(
                "cipher.rounds must be at least 1".into(),
            ));
        }
        if !ENTROPY_LENGTHS.contains(&self.generator.entropy_bytes) {
            return Err(SeedlockError::Config(format!(
                "generator.entropy_bytes must be one of {ENTROPY_LENGTHS:?}, got {}",
                self.generator.entropy_bytes
            )));
        }
        Ok(())
    }

    /// Wordlist path with a leading `~/` expanded to `$HOME`.
    pub fn wordlist_path(&self) -> Option<PathBuf> {
        self.wordlist.path.as_deref().map(expand_tilde)
    }
}

/// Expand `~` in path to the user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    match s.strip_prefix("~/") {
        Some(rest) => {
            let home = std::env::var("HOME").unwrap_or_default();
            PathBuf::from(home).join(rest)
        }
        None => path.to_path_buf(),
    }
}
