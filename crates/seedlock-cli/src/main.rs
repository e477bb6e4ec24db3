//! seedlock: PIN-protected BIP-39 mnemonics
//!
//! Commands:
//!   encrypt [WORDS...]     - protect a mnemonic with a PIN
//!   decrypt [WORDS...]     - recover a protected mnemonic
//!   generate               - print a fresh random mnemonic
//!   entropy <WORDS...>     - print the hex entropy behind a mnemonic
//!   mnemonic <HEX>         - print the mnemonic for hex entropy
//!   key-iv <SEED>          - print the key schedule output for a seed
//!   interactive            - guided prompt (default when no command is given)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use seedlock_core::config::{expand_tilde, LogFormat, SeedlockConfig};
use seedlock_crypto::{
    entropy_len_for_words, get_key_and_iv, normalize, Codec, Dictionary, MnemonicError,
    ProgressFn, RoundCipher,
};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "seedlock",
    version,
    about = "Protect BIP-39 mnemonics with a PIN",
    long_about = "seedlock: encrypt a BIP-39 mnemonic into another valid mnemonic using a PIN"
)]
struct Cli {
    /// Path to config.toml
    #[arg(
        long,
        short = 'c',
        env = "SEEDLOCK_CONFIG",
        default_value = "~/.config/seedlock/config.toml"
    )]
    config: PathBuf,

    /// Cipher rounds (overrides config; must match between encrypt and decrypt)
    #[arg(long, short = 'r', env = "SEEDLOCK_ROUNDS")]
    rounds: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SEEDLOCK_LOG")]
    log: Option<String>,

    /// Log format (json, text)
    #[arg(long, env = "SEEDLOCK_LOG_FORMAT")]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Protect a mnemonic with a PIN (prompts for missing input)
    Encrypt {
        /// Mnemonic words (prompted when omitted)
        words: Vec<String>,
        /// PIN (prompted without echo when omitted)
        #[arg(long, env = "SEEDLOCK_PIN", hide_env_values = true)]
        pin: Option<String>,
    },

    /// Recover a protected mnemonic (prompts for missing input)
    Decrypt {
        /// Protected mnemonic words (prompted when omitted)
        words: Vec<String>,
        /// PIN (prompted without echo when omitted)
        #[arg(long, env = "SEEDLOCK_PIN", hide_env_values = true)]
        pin: Option<String>,
    },

    /// Generate a random mnemonic
    Generate {
        /// Word count: 12, 15, 18, 21 or 24
        #[arg(long, short = 'w', conflicts_with = "bytes")]
        words: Option<usize>,
        /// Entropy bytes: 16, 20, 24, 28 or 32 (default from config)
        #[arg(long, short = 'b')]
        bytes: Option<usize>,
    },

    /// Print the hex entropy of a mnemonic
    Entropy {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Print the mnemonic for hex-encoded entropy
    Mnemonic {
        /// Entropy as hex (32, 40, 48, 56 or 64 hex digits)
        entropy: String,
    },

    /// Print the key and IV derived from a seed string
    #[command(name = "key-iv")]
    KeyIv { seed: String },

    /// Guided encrypt/decrypt prompt
    Interactive,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    Json,
    Text,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Text => LogFormat::Text,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Encrypt => f.write_str("encrypt"),
            Mode::Decrypt => f.write_str("decrypt"),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = expand_tilde(&cli.config);
    let config = SeedlockConfig::load(&config_path)
        .with_context(|| format!("loading config: {}", config_path.display()))?;

    let level = cli.log.clone().unwrap_or_else(|| config.log.level.clone());
    let format = cli.log_format.map(LogFormat::from).unwrap_or(config.log.format);
    init_logging(&level, format);

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "seedlock starting"
    );

    let codec = build_codec(&config)?;
    let config = apply_overrides(config, cli.rounds)?;
    let rounds = config.cipher.rounds;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Encrypt { words, pin } => cmd_cipher(&codec, Mode::Encrypt, words, pin, rounds),
        Commands::Decrypt { words, pin } => cmd_cipher(&codec, Mode::Decrypt, words, pin, rounds),
        Commands::Generate { words, bytes } => cmd_generate(&codec, &config, words, bytes),
        Commands::Entropy { words } => cmd_entropy(&codec, &words),
        Commands::Mnemonic { entropy } => cmd_mnemonic(&codec, &entropy),
        Commands::KeyIv { seed } => cmd_key_iv(&seed),
        Commands::Interactive => cmd_interactive(&codec, rounds),
    }
}

fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries results only
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Fold command-line overrides into the config and re-check it.
fn apply_overrides(mut config: SeedlockConfig, rounds: Option<u32>) -> Result<SeedlockConfig> {
    if let Some(rounds) = rounds {
        config.cipher.rounds = rounds;
    }
    config.validate().context("invalid --rounds")?;
    Ok(config)
}

fn build_codec(config: &SeedlockConfig) -> Result<Codec> {
    match config.wordlist_path() {
        Some(path) => {
            let dict = Dictionary::load(&path)
                .with_context(|| format!("loading wordlist: {}", path.display()))?;
            Ok(Codec::new(dict))
        }
        None => Ok(Codec::english()),
    }
}

// ── Prompts ───────────────────────────────────────────────────────────────────

fn prompt(input: &mut impl BufRead, output: &mut impl Write, query: &str) -> Result<String> {
    write!(output, "{query}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).context("reading input")? == 0 {
        anyhow::bail!("unexpected end of input");
    }
    Ok(line.trim().to_string())
}

/// Ask until the answer is 1 (encrypt) or 2 (decrypt).
fn choose_mode(input: &mut impl BufRead, output: &mut impl Write) -> Result<Mode> {
    loop {
        match prompt(input, output, "Choose action [1: Encrypt, 2: Decrypt]: ")?.as_str() {
            "1" => return Ok(Mode::Encrypt),
            "2" => return Ok(Mode::Decrypt),
            _ => writeln!(output, "Invalid choice. Please enter 1 or 2.")?,
        }
    }
}

fn prompt_pin() -> Result<SecretString> {
    let pin = rpassword::prompt_password("Enter your PIN: ").context("reading PIN")?;
    if pin.is_empty() {
        warn!("empty PIN");
    }
    Ok(SecretString::from(pin))
}

fn read_mnemonic(words: Vec<String>) -> Result<Zeroizing<String>> {
    let phrase = if words.is_empty() {
        let stdin = std::io::stdin();
        Zeroizing::new(prompt(
            &mut stdin.lock(),
            &mut std::io::stdout(),
            "Enter your mnemonic phrase: ",
        )?)
    } else {
        Zeroizing::new(words.join(" "))
    };
    Ok(Zeroizing::new(normalize(&phrase)))
}

// ── Progress bar helpers ──────────────────────────────────────────────────────

/// Below this many rounds the cipher finishes before a bar is worth drawing.
const PROGRESS_MIN_ROUNDS: u32 = 10_000;

fn make_progress_bar(total: u64, prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} rounds {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// ── Cipher ────────────────────────────────────────────────────────────────────

fn run_cipher(
    codec: &Codec,
    mode: Mode,
    mnemonic: &str,
    pin: &SecretString,
    rounds: u32,
) -> Result<String> {
    let cipher = RoundCipher::new(codec);

    let pb = if rounds >= PROGRESS_MIN_ROUNDS {
        make_progress_bar(u64::from(rounds), &mode.to_string())
    } else {
        ProgressBar::hidden()
    };
    let pb_clone = pb.clone();
    let progress: ProgressFn = Box::new(move |done, total, _label| {
        if done % 1024 == 0 || done == total {
            pb_clone.set_position(done);
        }
    });

    let result = match mode {
        Mode::Encrypt => cipher.encrypt_with_progress(mnemonic, pin, rounds, Some(&progress)),
        Mode::Decrypt => cipher.decrypt_with_progress(mnemonic, pin, rounds, Some(&progress)),
    };
    pb.finish_and_clear();

    result.map_err(|e| {
        let hint = failure_hint(&e, mode);
        anyhow::Error::new(e).context(hint)
    })
}

/// User-facing advice chosen by error kind.
fn failure_hint(err: &MnemonicError, mode: Mode) -> String {
    match (err, mode) {
        (MnemonicError::ChecksumMismatch, Mode::Encrypt) => {
            "Invalid mnemonic checksum. Please check your mnemonic phrase.".into()
        }
        (MnemonicError::ChecksumMismatch, Mode::Decrypt) => {
            "Invalid mnemonic checksum. Please check the protected phrase for typos.".into()
        }
        (MnemonicError::UnknownWord(word), _) => format!(
            "Invalid mnemonic word: {word}. Please ensure all words are from the wordlist."
        ),
        (MnemonicError::InvalidWordCount(n), _) => {
            format!("A mnemonic has 12, 15, 18, 21 or 24 words, got {n}.")
        }
        (MnemonicError::InvalidLength(n), _) => {
            format!("Entropy must be 16, 20, 24, 28 or 32 bytes, got {n}.")
        }
        (MnemonicError::ZeroRounds, _) => "Rounds must be at least 1.".into(),
    }
}

fn cmd_cipher(
    codec: &Codec,
    mode: Mode,
    words: Vec<String>,
    pin: Option<String>,
    rounds: u32,
) -> Result<()> {
    let mnemonic = read_mnemonic(words)?;
    let pin = match pin {
        Some(p) => SecretString::from(p),
        None => prompt_pin()?,
    };

    let result = Zeroizing::new(run_cipher(codec, mode, &mnemonic, &pin, rounds)?);
    println!("{}", result.as_str());
    Ok(())
}

// ── `seedlock interactive` ────────────────────────────────────────────────────

fn cmd_interactive(codec: &Codec, rounds: u32) -> Result<()> {
    println!("--- BIP39 Mnemonic Encryptor ---");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let mode = choose_mode(&mut input, &mut output)?;
    let phrase = Zeroizing::new(prompt(
        &mut input,
        &mut output,
        "Enter your mnemonic phrase: ",
    )?);
    let mnemonic = Zeroizing::new(normalize(&phrase));
    let pin = prompt_pin()?;

    println!("\nProcessing...");
    let result = Zeroizing::new(run_cipher(codec, mode, &mnemonic, &pin, rounds)?);

    println!("--- Result ---");
    println!("{}", result.as_str());
    println!("--------------");
    Ok(())
}

// ── Codec commands ────────────────────────────────────────────────────────────

fn cmd_generate(
    codec: &Codec,
    config: &SeedlockConfig,
    words: Option<usize>,
    bytes: Option<usize>,
) -> Result<()> {
    let entropy_len = match (words, bytes) {
        (Some(w), _) => entropy_len_for_words(w)?,
        (None, Some(b)) => b,
        (None, None) => config.generator.entropy_bytes,
    };

    let mnemonic = Zeroizing::new(codec.generate(entropy_len)?);
    println!("{}", mnemonic.as_str());
    Ok(())
}

fn cmd_entropy(codec: &Codec, words: &[String]) -> Result<()> {
    let mnemonic = Zeroizing::new(normalize(&words.join(" ")));
    let entropy = Zeroizing::new(
        codec
            .decode(&mnemonic)
            .map_err(|e| {
                let hint = failure_hint(&e, Mode::Decrypt);
                anyhow::Error::new(e).context(hint)
            })?,
    );
    println!("{}", hex::encode(entropy.as_slice()));
    Ok(())
}

fn cmd_mnemonic(codec: &Codec, entropy_hex: &str) -> Result<()> {
    let entropy = Zeroizing::new(hex::decode(entropy_hex.trim()).context("entropy must be hex")?);
    let mnemonic = Zeroizing::new(codec.encode(&entropy)?);
    println!("{}", mnemonic.as_str());
    Ok(())
}

fn cmd_key_iv(seed: &str) -> Result<()> {
    let kv = get_key_and_iv(seed);
    println!("key: {}", hex::encode(kv.key()));
    println!("iv:  {}", hex::encode(kv.iv()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_choose_mode_retries_until_valid() {
        let mut input = Cursor::new("3\nabc\n2\n");
        let mut output = Vec::new();

        let mode = choose_mode(&mut input, &mut output).unwrap();
        assert_eq!(mode, Mode::Decrypt);

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("Invalid choice").count(), 2);
    }

    #[test]
    fn test_choose_mode_eof() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(choose_mode(&mut input, &mut output).is_err());
    }

    #[test]
    fn test_prompt_trims() {
        let mut input = Cursor::new("  1  \n");
        let mut output = Vec::new();
        assert_eq!(prompt(&mut input, &mut output, "> ").unwrap(), "1");
        assert_eq!(output, b"> ");
    }

    #[test]
    fn test_failure_hint_by_kind() {
        assert!(failure_hint(&MnemonicError::ChecksumMismatch, Mode::Encrypt).contains("checksum"));
        assert!(
            failure_hint(&MnemonicError::UnknownWord("foo".into()), Mode::Decrypt).contains("foo")
        );
        assert!(failure_hint(&MnemonicError::InvalidLength(15), Mode::Decrypt).contains("15"));

        let zero = failure_hint(&MnemonicError::ZeroRounds, Mode::Decrypt);
        assert!(zero.contains("at least 1"));
        assert!(!zero.contains("PIN"), "usage errors must not blame the PIN");
    }

    #[test]
    fn test_rounds_override_is_validated() {
        let config = SeedlockConfig::default();
        assert_eq!(apply_overrides(config.clone(), None).unwrap(), config);
        assert_eq!(
            apply_overrides(config.clone(), Some(7)).unwrap().cipher.rounds,
            7
        );
        assert!(apply_overrides(config, Some(0)).is_err());
    }

    #[test]
    fn test_run_cipher_roundtrip() {
        let codec = Codec::english();
        let pin = SecretString::from("1234");
        let m = codec.generate(16).unwrap();

        let encrypted = run_cipher(&codec, Mode::Encrypt, &m, &pin, 3).unwrap();
        let decrypted = run_cipher(&codec, Mode::Decrypt, &encrypted, &pin, 3).unwrap();
        assert_eq!(decrypted, m);
    }

    #[test]
    fn test_run_cipher_error_keeps_kind() {
        let codec = Codec::english();
        let err = run_cipher(
            &codec,
            Mode::Encrypt,
            "abandon abandon",
            &SecretString::from("1"),
            1,
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<MnemonicError>(),
            Some(&MnemonicError::InvalidWordCount(2))
        );
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["seedlock", "-r", "5", "encrypt", "--pin", "1", "a", "b"])
            .unwrap();
        assert_eq!(cli.rounds, Some(5));
        match cli.command {
            Some(Commands::Encrypt { words, pin }) => {
                assert_eq!(words, vec!["a", "b"]);
                assert_eq!(pin.as_deref(), Some("1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["seedlock", "generate", "-w", "12", "-b", "16"]).is_err());
    }
}
