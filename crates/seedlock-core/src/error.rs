use thiserror::Error;

pub type SeedlockResult<T> = Result<T, SeedlockError>;

#[derive(Debug, Error)]
pub enum SeedlockError {
    #[error("config error: {0}")]
    Config(String),
}
