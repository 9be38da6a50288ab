//! # VakyaGuard Common Library
//!
//! Shared code for the VakyaGuard crates:
//! - Error types
//! - Bootstrap configuration loading (TOML)
//! - Logging subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
