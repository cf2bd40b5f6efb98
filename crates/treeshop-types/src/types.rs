//! Shared enums used across the pricing engine

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Service line a job or production rate belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    ForestryMulching,
    StumpGrinding,
    LandClearing,
    TreeRemoval,
    TreeTrimming,
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        ServiceType::ForestryMulching,
        ServiceType::StumpGrinding,
        ServiceType::LandClearing,
        ServiceType::TreeRemoval,
        ServiceType::TreeTrimming,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::ForestryMulching => "Forestry Mulching",
            ServiceType::StumpGrinding => "Stump Grinding",
            ServiceType::LandClearing => "Land Clearing",
            ServiceType::TreeRemoval => "Tree Removal",
            ServiceType::TreeTrimming => "Tree Trimming",
        }
    }

    /// Key used in config files and CSV columns
    pub fn key(&self) -> &'static str {
        match self {
            ServiceType::ForestryMulching => "forestry_mulching",
            ServiceType::StumpGrinding => "stump_grinding",
            ServiceType::LandClearing => "land_clearing",
            ServiceType::TreeRemoval => "tree_removal",
            ServiceType::TreeTrimming => "tree_trimming",
        }
    }

    /// Parse a config/CSV key, accepting `-` or `_` separators and any case
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized = key.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL.into_iter().find(|s| s.key() == normalized)
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Confidence in an adaptive production rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    Insufficient,
}

impl ConfidenceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Insufficient => "insufficient",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_from_key() {
        assert_eq!(ServiceType::from_key("stump_grinding"), Some(ServiceType::StumpGrinding));
        assert_eq!(ServiceType::from_key("Land-Clearing"), Some(ServiceType::LandClearing));
        assert_eq!(ServiceType::from_key("tree removal"), Some(ServiceType::TreeRemoval));
        assert_eq!(ServiceType::from_key("bulldozing"), None);
    }

    #[test]
    fn test_service_type_serde_matches_key() {
        for service in ServiceType::ALL {
            let json = serde_json::to_string(&service).unwrap();
            assert_eq!(json, format!("\"{}\"", service.key()));
        }
    }

    #[test]
    fn test_confidence_level_serializes_lowercase() {
        let json = serde_json::to_string(&ConfidenceLevel::Insufficient).unwrap();
        assert_eq!(json, "\"insufficient\"");
        assert_eq!(ConfidenceLevel::High.to_string(), "high");
    }
}
