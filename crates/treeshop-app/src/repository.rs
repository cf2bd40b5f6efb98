//! Repository adapters for persistence layer

use std::path::PathBuf;

use treeshop_infra::persistence::FileCompletionReportRepository;
use treeshop_types::Result;

use crate::config::Config;
use crate::constants::ProductionRates;

/// Open file-based completion report repository
pub fn open_report_repo(config: &Config) -> Result<FileCompletionReportRepository> {
    open_report_repo_at(config.store_dir()?)
}

/// Open completion report repository at a custom directory
pub fn open_report_repo_at(store_dir: PathBuf) -> Result<FileCompletionReportRepository> {
    FileCompletionReportRepository::open(store_dir)
}

/// Load production rate overrides from the configured TOML file
pub fn load_production_rates(config: &Config) -> Result<ProductionRates> {
    ProductionRates::load_from_file(&config.rates_path()?)
}

/// Save production rate overrides to the configured TOML file
pub fn save_production_rates(config: &Config, rates: &ProductionRates) -> Result<()> {
    rates.save_to_file(&config.rates_path()?)
}
