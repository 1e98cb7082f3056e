use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the agenda JSON files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// strftime-style format for dates shown in command output.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    Config::config_dir().unwrap_or_else(|_| PathBuf::from(".trainer-agenda"))
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

impl UiConfig {
    /// Display format for dates, validated. Falls back to the default when
    /// the configured string has malformed tokens or needs time-of-day
    /// fields a calendar date does not carry; printing with such a format
    /// would abort mid-command.
    pub fn checked_date_format(&self) -> &str {
        use std::fmt::Write as _;

        let mut rendered = String::new();
        if write!(rendered, "{}", NaiveDate::default().format(&self.date_format)).is_ok() {
            return &self.date_format;
        }
        tracing::warn!(
            "Cannot format dates with {:?}, falling back to {}",
            self.date_format,
            DEFAULT_DATE_FORMAT
        );
        DEFAULT_DATE_FORMAT
    }
}

impl Config {
    /// Get config directory path (~/.trainer-agenda/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".trainer-agenda"))
    }

    /// Get config file path (~/.trainer-agenda/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_file = Self::config_file()?;

        if !config_file.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_file).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        let config_file = Self::config_file()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(())
    }
}
