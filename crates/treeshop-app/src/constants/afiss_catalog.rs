//! Catalog of AFISS site-complexity factors

use treeshop_domain::model::{AfissCategory, AfissFactor};
use treeshop_domain::service::afiss_multiplier;
use treeshop_types::{Error, Result};

/// A catalog entry, addressable by a short key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AfissCatalogEntry {
    pub key: &'static str,
    pub category: AfissCategory,
    pub name: &'static str,
    pub percentage: f64,
}

impl AfissCatalogEntry {
    pub fn to_factor(&self) -> AfissFactor {
        AfissFactor::new(self.category, self.name, self.percentage)
    }
}

const fn entry(
    key: &'static str,
    category: AfissCategory,
    name: &'static str,
    percentage: f64,
) -> AfissCatalogEntry {
    AfissCatalogEntry {
        key,
        category,
        name,
        percentage,
    }
}

pub const AFISS_CATALOG: &[AfissCatalogEntry] = &[
    // Access
    entry("narrow_gate", AfissCategory::Access, "Narrow gate (under 8 ft)", 0.10),
    entry("no_equipment_access", AfissCategory::Access, "No equipment access, hand carry", 0.25),
    entry("steep_slope", AfissCategory::Access, "Steep slope", 0.15),
    entry("soft_ground", AfissCategory::Access, "Soft ground or wetlands", 0.15),
    // Facilities
    entry("power_lines", AfissCategory::Facilities, "Power lines nearby", 0.20),
    entry("structures", AfissCategory::Facilities, "Structures within fall zone", 0.20),
    entry("underground_utilities", AfissCategory::Facilities, "Septic or underground utilities", 0.10),
    entry("hardscape", AfissCategory::Facilities, "Pool, fence or hardscape nearby", 0.10),
    // Irregularities
    entry("hazard_tree", AfissCategory::Irregularities, "Dead or hazardous tree", 0.15),
    entry("multi_stem", AfissCategory::Irregularities, "Multi-stem or codominant leaders", 0.10),
    entry("heavy_lean", AfissCategory::Irregularities, "Heavy lean", 0.10),
    entry("vines", AfissCategory::Irregularities, "Vines or invasive overgrowth", 0.05),
    // Site conditions
    entry("rocky_terrain", AfissCategory::SiteConditions, "Rocky terrain", 0.10),
    entry("restricted_haul", AfissCategory::SiteConditions, "Restricted debris haul-off", 0.10),
    entry("standing_water", AfissCategory::SiteConditions, "Standing water", 0.15),
    // Safety
    entry("traffic_control", AfissCategory::Safety, "Traffic control required", 0.15),
    entry("crane_required", AfissCategory::Safety, "Crane required", 0.30),
    entry("public_area", AfissCategory::Safety, "Public area with pedestrians", 0.10),
];

/// Look up a factor by key or by display name, ignoring case
pub fn find_afiss_factor(name: &str) -> Option<&'static AfissCatalogEntry> {
    let needle = name.trim().to_lowercase();
    let as_key = needle.replace(['-', ' '], "_");
    AFISS_CATALOG
        .iter()
        .find(|e| e.key == as_key || e.name.to_lowercase() == needle)
}

pub fn catalog_by_category(category: AfissCategory) -> impl Iterator<Item = &'static AfissCatalogEntry> {
    AFISS_CATALOG.iter().filter(move |e| e.category == category)
}

/// Resolve selected factor names to factors
pub fn resolve_afiss_factors<S: AsRef<str>>(names: &[S]) -> Result<Vec<AfissFactor>> {
    names
        .iter()
        .map(|n| {
            find_afiss_factor(n.as_ref())
                .map(AfissCatalogEntry::to_factor)
                .ok_or_else(|| Error::UnknownAfissFactor(n.as_ref().to_string()))
        })
        .collect()
}

/// Multiplier for a selection of catalog factors
pub fn afiss_multiplier_for<S: AsRef<str>>(names: &[S]) -> Result<f64> {
    Ok(afiss_multiplier(&resolve_afiss_factors(names)?))
}
