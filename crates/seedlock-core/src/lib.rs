pub mod config;
pub mod error;

pub use config::SeedlockConfig;
pub use error::{SeedlockError, SeedlockResult};
