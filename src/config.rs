//! Configuration management and validation.
//!
//! Provides the roster configuration with layered loading: built-in
//! defaults, then an optional JSON config file, then `ROSTER_*` environment
//! variables. Command-line overrides are applied on top by the CLI.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_AVATAR_BACKGROUND, DEFAULT_AVATAR_BASE_URL,
    DEFAULT_LOW_ATTENDANCE_THRESHOLD, DEFAULT_USER_ID, ENV_PREFIX,
};
use crate::app::services::collection_store::RecordDefaults;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory backing the key-value store
    pub data_dir: PathBuf,

    /// Directory that CSV exports are written to
    pub export_dir: PathBuf,

    /// Seed the sample students when the stored collection is empty
    pub seed_sample_data: bool,

    /// Base URL for generated placeholder avatars
    pub avatar_base_url: String,

    /// Background parameter for generated avatars
    pub avatar_background: String,

    /// Simulated latency of the mocked student API, in milliseconds
    pub mock_latency_ms: u64,

    /// User whose notification preferences are read and written
    pub user_id: String,

    /// Attendance percentage under which a student counts as at risk
    pub low_attendance_threshold: u8,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(".roster"));

        Self {
            data_dir,
            export_dir: PathBuf::from("."),
            seed_sample_data: true,
            avatar_base_url: DEFAULT_AVATAR_BASE_URL.to_string(),
            avatar_background: DEFAULT_AVATAR_BACKGROUND.to_string(),
            mock_latency_ms: 0,
            user_id: DEFAULT_USER_ID.to_string(),
            low_attendance_threshold: DEFAULT_LOW_ATTENDANCE_THRESHOLD,
        }
    }
}

impl Config {
    /// Set the key-value store directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Set the export directory
    pub fn with_export_dir(mut self, export_dir: impl Into<PathBuf>) -> Self {
        self.export_dir = export_dir.into();
        self
    }

    /// Disable seeding of sample students
    pub fn without_sample_data(mut self) -> Self {
        self.seed_sample_data = false;
        self
    }

    /// Set the simulated API latency
    pub fn with_mock_latency_ms(mut self, latency_ms: u64) -> Self {
        self.mock_latency_ms = latency_ms;
        self
    }

    /// Set the active user id
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Default config file location (`<config dir>/roster/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine config directory"))
    }

    /// Load a config file, falling back to defaults for absent fields
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        serde_json::from_str(&text).map_err(|e| {
            Error::json(format!("Invalid config file {}", path.display()), e)
        })
    }

    /// Load configuration: defaults, then file, then process environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Apply `ROSTER_*` overrides read through `lookup`
    ///
    /// Taking the lookup as a function keeps this testable without touching
    /// the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(dir) = var("DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = var("EXPORT_DIR") {
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(user) = var("USER") {
            self.user_id = user;
        }
        if let Some(latency) = var("MOCK_LATENCY_MS") {
            self.mock_latency_ms = latency.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{}MOCK_LATENCY_MS must be a whole number of milliseconds, got '{}'",
                    ENV_PREFIX, latency
                ))
            })?;
        }
        if let Some(seed) = var("SEED_SAMPLE_DATA") {
            self.seed_sample_data = parse_flag(&seed).ok_or_else(|| {
                Error::configuration(format!(
                    "{}SEED_SAMPLE_DATA must be true or false, got '{}'",
                    ENV_PREFIX, seed
                ))
            })?;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(Error::configuration("Data directory cannot be empty"));
        }
        if self.user_id.trim().is_empty() {
            return Err(Error::configuration("User id cannot be empty"));
        }
        if self.low_attendance_threshold > 100 {
            return Err(Error::configuration(format!(
                "Low attendance threshold must be 0-100, got {}",
                self.low_attendance_threshold
            )));
        }
        if !self.avatar_base_url.starts_with("http://")
            && !self.avatar_base_url.starts_with("https://")
        {
            return Err(Error::configuration(format!(
                "Avatar base URL must be http(s), got '{}'",
                self.avatar_base_url
            )));
        }
        Ok(())
    }

    /// Placeholder avatar URI derived from a display name
    pub fn placeholder_avatar(&self, name: &str) -> String {
        RecordDefaults::from(self).placeholder_avatar(name)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
