//! Configuration management for carpark
//!
//! Config stored at: ~/.config/carpark/config.json

use carpark_domain::DEFAULT_FEE_PER_HOUR;
use carpark_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Fee charged per started hour
    #[serde(default = "default_fee_per_hour")]
    pub fee_per_hour: u64,

    /// Default output format (table, json)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Prompt printed before each line is read
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Print the help hint at startup
    #[serde(default = "default_true")]
    pub show_hint: bool,
}

fn default_fee_per_hour() -> u64 {
    DEFAULT_FEE_PER_HOUR
}

fn default_prompt() -> String {
    "$ ".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fee_per_hour: default_fee_per_hour(),
            output_format: OutputFormat::default(),
            prompt: default_prompt(),
            show_hint: true,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("carpark");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)).into())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Carpark Configuration")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(f, "Fee per hour:   {}", self.fee_per_hour)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Prompt:         {:?}", self.prompt)?;
        writeln!(f, "Show hint:      {}", self.show_hint)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
