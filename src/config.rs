use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "social.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// How the current-user file is merged back into a session at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReloadMode {
    /// Append every line of the file, header lines included.
    #[default]
    Legacy,
    /// Only reload a file owned by the user logging in, skip its header and
    /// replace the session's notifications with its contents.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub users_file: PathBuf,
    pub current_user_file: PathBuf,
    pub reload_mode: ReloadMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            users_file: PathBuf::from("initial_users.txt"),
            current_user_file: PathBuf::from("current_user.txt"),
            reload_mode: ReloadMode::Legacy,
        }
    }
}

impl Config {
    /// Reads the JSON config at `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
