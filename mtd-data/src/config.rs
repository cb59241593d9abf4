//! Optional TOML settings for the command-line front end.
//!
//! ```toml
//! business_id = "biz-001"
//! ledger = "ledger.csv"
//! log_level = "debug"
//! ```
//!
//! Every key is optional. A relative `ledger` path is resolved against the
//! directory holding the settings file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Business whose quarters are shown when `--business` is not given.
    pub business_id: Option<String>,
    /// Ledger CSV used when `--ledger` is not given.
    pub ledger: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Reads settings from `path`, resolving a relative ledger path against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;

        if let (Some(ledger), Some(dir)) = (config.ledger.as_mut(), path.parent()) {
            if ledger.is_relative() {
                *ledger = dir.join(&*ledger);
            }
        }

        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn log_level_or<'a>(
        &'a self,
        fallback: &'a str,
    ) -> &'a str {
        self.log_level.as_deref().unwrap_or(fallback)
    }
}
