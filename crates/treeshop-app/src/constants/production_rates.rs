//! Default production rates (points per hour) per service line
//!
//! Built-in values can be overridden from a TOML file:
//!
//! ```toml
//! [rates]
//! forestry_mulching = 1.3
//! stump_grinding = 420.0
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use treeshop_types::{ConfigError, Error, Result, ServiceType};

/// Built-in points-per-hour for a service line
pub fn builtin_rate(service: ServiceType) -> f64 {
    match service {
        ServiceType::ForestryMulching => 1.3,
        ServiceType::StumpGrinding => 400.0,
        // 24 crew hours per clearing point
        ServiceType::LandClearing => 1.0 / 24.0,
        ServiceType::TreeRemoval => 4000.0,
        ServiceType::TreeTrimming => 3000.0,
    }
}

/// On-disk layout, keyed by `ServiceType::key`
#[derive(Debug, Default, Serialize, Deserialize)]
struct RatesFile {
    #[serde(default)]
    rates: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionRates {
    /// Overrides; service lines not listed use the built-in rate
    pub rates: BTreeMap<ServiceType, f64>,
}

impl ProductionRates {
    /// Load rate overrides from a TOML file. A missing file means no overrides.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read rates file: {}",
                e
            )))
        })?;
        let rates = Self::load_from_str(&content)?;
        info!(path = %path.display(), overrides = rates.rates.len(), "loaded production rates");
        Ok(rates)
    }

    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: RatesFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse rates TOML: {}",
                e
            )))
        })?;

        let rates = file
            .rates
            .into_iter()
            .map(|(key, rate)| {
                ServiceType::from_key(&key)
                    .map(|service| (service, rate))
                    .ok_or_else(|| {
                        Error::Config(ConfigError::ParseError(format!(
                            "Unknown service type in rates file: {}",
                            key
                        )))
                    })
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { rates })
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = RatesFile {
            rates: self
                .rates
                .iter()
                .map(|(service, rate)| (service.key().to_string(), *rate))
                .collect(),
        };
        let content = toml::to_string_pretty(&file).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to serialize rates: {}",
                e
            )))
        })?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Effective rate for a service line
    pub fn rate_for(&self, service: ServiceType) -> f64 {
        self.rates
            .get(&service)
            .copied()
            .unwrap_or_else(|| builtin_rate(service))
    }

    pub fn set_rate(&mut self, service: ServiceType, rate: f64) {
        self.rates.insert(service, rate);
    }
}
