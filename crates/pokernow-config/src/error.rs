//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable ${{{0}}} is referenced but not set")]
    EnvVarNotSet(String),

    #[error("Invalid substitution pattern: {0}")]
    Pattern(#[from] regex::Error),
}
