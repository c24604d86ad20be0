//! Application configuration
//!
//! Read from `config.toml` in the platform config directory. Every field is
//! optional; a missing file means defaults.
//!
//! ```toml
//! # Empty string turns sync off and keeps history on this device only
//! remote_url = "https://example-rtdb.firebaseio.com/moods.json"
//! request_timeout_secs = 10
//! data_dir = "/home/ava/.local/share/moodlog"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use moodlog_net::DEFAULT_REMOTE_URL;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{AppError, Result};

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "moodlog.db";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub remote_url: Option<String>,
    pub request_timeout_secs: u64,
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote_url: Some(DEFAULT_REMOTE_URL.to_string()),
            request_timeout_secs: 10,
            data_dir: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "moodlog", "moodlog")
}

impl AppConfig {
    /// Load from the platform config directory
    pub fn load() -> Result<Self> {
        let dirs = project_dirs().ok_or(AppError::NoProjectDir("config"))?;
        Self::from_path(dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from `path`; a missing file yields defaults
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                info!(path = %path.display(), "Loaded configuration");
                Self::parse(&raw)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No configuration file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Endpoint to sync with, `None` when sync is off
    pub fn remote_url(&self) -> Option<&str> {
        self.remote_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Location of the preference database
    pub fn database_path(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => project_dirs()
                .ok_or(AppError::NoProjectDir("data"))?
                .data_dir()
                .to_path_buf(),
        };
        Ok(dir.join(DATABASE_FILE))
    }
}
