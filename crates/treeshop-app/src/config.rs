//! Configuration management for treeshop
//!
//! Config stored at: ~/.config/treeshop/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use treeshop_domain::service::AdaptiveRateConfig;
use treeshop_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Completion report store directory override
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Production rate overrides (TOML) path
    #[serde(default)]
    pub rates_file: Option<PathBuf>,

    /// Share of round-trip drive time billed to the customer
    #[serde(default = "default_transport_billing_fraction")]
    pub transport_billing_fraction: f64,

    /// Contingency buffer added to production + transport hours
    #[serde(default = "default_buffer_fraction")]
    pub buffer_fraction: f64,

    /// Adaptive production rate estimator settings
    #[serde(default)]
    pub adaptive: AdaptiveRateConfig,
}

fn default_transport_billing_fraction() -> f64 {
    0.5
}

fn default_buffer_fraction() -> f64 {
    0.10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Table,
            store_dir: None,
            rates_file: None,
            transport_billing_fraction: default_transport_billing_fraction(),
            buffer_fraction: default_buffer_fraction(),
            adaptive: AdaptiveRateConfig::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("treeshop");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the completion report store directory
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let store_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("treeshop");
        Ok(store_dir)
    }

    /// Get the production rates file path
    pub fn rates_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.rates_file {
            return Ok(path.clone());
        }
        Ok(Self::config_dir()?.join("rates.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "TreeShop Configuration")?;
        writeln!(f, "======================")?;
        writeln!(f)?;
        writeln!(f, "Output format:        {}", self.output_format)?;
        writeln!(
            f,
            "Store dir:            {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(
            f,
            "Rates file:           {}",
            self.rates_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Transport billed:     {:.0}%", self.transport_billing_fraction * 100.0)?;
        writeln!(f, "Buffer:               {:.0}%", self.buffer_fraction * 100.0)?;
        writeln!(f)?;
        writeln!(f, "Adaptive rates")?;
        writeln!(f, "  Lookback:           {} days", self.adaptive.lookback_days)?;
        writeln!(f, "  Minimum jobs:       {}", self.adaptive.minimum_data_points)?;
        writeln!(f, "  Outlier trim:       {:.0}%", self.adaptive.outlier_trim_percent * 100.0)?;
        writeln!(f, "  CV threshold:       {:.0}%", self.adaptive.confidence_threshold * 100.0)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:          {}", path.display())?;
        }

        Ok(())
    }
}
