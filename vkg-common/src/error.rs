//! Common error types for VakyaGuard

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for VakyaGuard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across VakyaGuard crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML file present but not parseable
    #[error("Invalid TOML in {path}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
