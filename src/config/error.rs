//! Configuration error types.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Problems with the config file or the values it resolves to.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{}`", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("profile-feed config is not valid TOML")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
