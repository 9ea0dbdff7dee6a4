//! Settings error types.
//!
//! None of these abort a session: a source that fails to load is skipped
//! and the remaining sources (or the built-in defaults) are used.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading one settings source.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("settings file `{0}` is not valid TOML")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("invalid `[args]` section: {0}")]
    Args(String),
}
