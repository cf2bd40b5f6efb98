//! Catalogs and default rates

pub mod afiss_catalog;
pub mod production_rates;

pub use afiss_catalog::{afiss_multiplier_for, find_afiss_factor, resolve_afiss_factors, AFISS_CATALOG};
pub use production_rates::{builtin_rate, ProductionRates};
