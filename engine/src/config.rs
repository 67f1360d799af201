//! TOML configuration for Tally.
//!
//! Loaded once at startup from `~/.tally/config.toml`. A missing file is not
//! an error; a malformed one is reported and defaults apply.

use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

use tally_types::UiOptions;

#[derive(Debug, Default, Deserialize)]
pub struct TallyConfig {
    pub app: Option<AppConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only operator symbols instead of `÷ × −`.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Thousands grouping in the display. Default: on.
    pub grouping: Option<bool>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl TallyConfig {
    /// `~/.tally/config.toml`, or `None` when no home directory resolves.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".tally").join("config.toml"))
    }

    /// Load the config file if one exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = Self::path() else {
            return Ok(None);
        };
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }
}

/// Resolve presentation options from an optional config.
#[must_use]
pub(crate) fn ui_options(config: Option<&TallyConfig>) -> UiOptions {
    let app = config.and_then(|cfg| cfg.app.as_ref());
    UiOptions {
        ascii_only: app.is_some_and(|app| app.ascii_only),
        high_contrast: app.is_some_and(|app| app.high_contrast),
        grouping: app.and_then(|app| app.grouping).unwrap_or(true),
    }
}
