//! Measurement records that feed the service scoring formulas

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Forestry mulching package, named by the maximum stem DBH in inches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbhPackage {
    Inches4,
    Inches6,
    Inches8,
    Inches10,
    Inches15,
}

impl DbhPackage {
    pub const ALL: [DbhPackage; 5] = [
        DbhPackage::Inches4,
        DbhPackage::Inches6,
        DbhPackage::Inches8,
        DbhPackage::Inches10,
        DbhPackage::Inches15,
    ];

    pub fn inches(&self) -> f64 {
        match self {
            DbhPackage::Inches4 => 4.0,
            DbhPackage::Inches6 => 6.0,
            DbhPackage::Inches8 => 8.0,
            DbhPackage::Inches10 => 10.0,
            DbhPackage::Inches15 => 15.0,
        }
    }

    pub fn from_inches(inches: u32) -> Option<Self> {
        match inches {
            4 => Some(DbhPackage::Inches4),
            6 => Some(DbhPackage::Inches6),
            8 => Some(DbhPackage::Inches8),
            10 => Some(DbhPackage::Inches10),
            15 => Some(DbhPackage::Inches15),
            _ => None,
        }
    }
}

impl FromStr for DbhPackage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('"').trim_end_matches("in");
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(DbhPackage::from_inches)
            .ok_or_else(|| format!("DBH package must be one of 4, 6, 8, 10, 15 (got '{}')", s))
    }
}

/// Vegetation density for land clearing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearingDensity {
    Light,
    Average,
    Heavy,
}

impl ClearingDensity {
    pub fn multiplier(&self) -> f64 {
        match self {
            ClearingDensity::Light => 0.7,
            ClearingDensity::Average => 1.0,
            ClearingDensity::Heavy => 1.3,
        }
    }
}

impl FromStr for ClearingDensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ClearingDensity::Light),
            "average" => Ok(ClearingDensity::Average),
            "heavy" => Ok(ClearingDensity::Heavy),
            other => Err(format!("density must be light, average or heavy (got '{}')", other)),
        }
    }
}

/// Stump measurements in inches plus site condition flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StumpInputs {
    pub diameter_inches: f64,
    pub height_above_inches: f64,
    pub grind_depth_below_inches: f64,
    #[serde(default)]
    pub is_hardwood: bool,
    #[serde(default)]
    pub has_large_root_flare: bool,
    #[serde(default)]
    pub is_rotten: bool,
    #[serde(default)]
    pub has_rocks_in_root_zone: bool,
    #[serde(default)]
    pub is_tight_landscaping: bool,
}

/// Tree measurements used by the TreeShop Score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeInputs {
    pub height_feet: f64,
    pub dbh_inches: f64,
    pub canopy_radius_feet: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeTrimmingResult {
    pub full_tree_score: f64,
    pub trim_percentage: f64,
    pub trim_score: f64,
    pub breakdown: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearingScoreResult {
    /// Acres times density multiplier
    pub base_score: f64,
    /// Base score times the AFISS multiplier
    pub adjusted_score: f64,
    pub excavator_hours: f64,
    pub grubbing_hours: f64,
    pub total_hours: f64,
    /// Eight-hour working days, rounded up
    pub total_days: f64,
}
