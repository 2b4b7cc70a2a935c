#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Configuration for Halyard.
//!
//! A single [`Config`] holds the API settings and the logging setup.
//!
//! # Usage
//!
//! ```rust,no_run
//! use halyard_config::Config;
//!
//! let config = Config::load(Some(std::path::Path::new("halyard.toml"))).unwrap();
//! println!("Serving under '{}'", config.api.base_path);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Environment variables** (`HALYARD_*`)
//! 2. **Config file** (path given by the caller, optional)
//! 3. **Embedded defaults** (`defaults.toml` compiled into the binary)
//!
//! This crate has no dependencies on other internal halyard crates;
//! conversion into runtime and telemetry types happens in
//! `halyard-runtime`'s config bridge.

/// Environment variable overrides.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file loading.
pub mod loader;
/// Layered value merging.
pub mod merge;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use types::*;

impl Config {
    /// Load defaults, then `path` if given, then the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, an
    /// environment override is malformed, or the result fails validation.
    pub fn load(path: Option<&std::path::Path>) -> ConfigResult<Self> {
        loader::load(path, &env::collect_env_vars())
    }
}
