//! AFISS site-complexity factors

use serde::{Deserialize, Serialize};

/// Access / Facilities / Irregularities / Site conditions / Safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfissCategory {
    Access,
    Facilities,
    Irregularities,
    SiteConditions,
    Safety,
}

impl AfissCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AfissCategory::Access => "Access",
            AfissCategory::Facilities => "Facilities",
            AfissCategory::Irregularities => "Irregularities",
            AfissCategory::SiteConditions => "Site Conditions",
            AfissCategory::Safety => "Safety",
        }
    }
}

/// A single surcharge; `percentage` is a fraction (0.10 = 10%)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AfissFactor {
    pub category: AfissCategory,
    pub name: String,
    pub percentage: f64,
}

impl AfissFactor {
    pub fn new(category: AfissCategory, name: impl Into<String>, percentage: f64) -> Self {
        Self {
            category,
            name: name.into(),
            percentage,
        }
    }
}
