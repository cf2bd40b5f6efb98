//! Margin tiers, billing rates, and project/clearing pricing records

use serde::{Deserialize, Serialize};

use super::scoring::ClearingDensity;

/// One of the five fixed gross-margin tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarginTier {
    Margin30,
    Margin40,
    Margin50,
    Margin60,
    Margin70,
}

impl MarginTier {
    pub const ALL: [MarginTier; 5] = [
        MarginTier::Margin30,
        MarginTier::Margin40,
        MarginTier::Margin50,
        MarginTier::Margin60,
        MarginTier::Margin70,
    ];

    /// Margin as a fraction of price
    pub fn fraction(&self) -> f64 {
        match self {
            MarginTier::Margin30 => 0.30,
            MarginTier::Margin40 => 0.40,
            MarginTier::Margin50 => 0.50,
            MarginTier::Margin60 => 0.60,
            MarginTier::Margin70 => 0.70,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarginTier::Margin30 => "30%",
            MarginTier::Margin40 => "40%",
            MarginTier::Margin50 => "50%",
            MarginTier::Margin60 => "60%",
            MarginTier::Margin70 => "70%",
        }
    }
}

/// Margin-adjusted rates for a single cost figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BillingRateOutputs {
    pub margin_30: f64,
    pub margin_40: f64,
    pub margin_50: f64,
    pub margin_60: f64,
    pub margin_70: f64,
}

impl BillingRateOutputs {
    pub fn for_tier(&self, tier: MarginTier) -> f64 {
        match tier {
            MarginTier::Margin30 => self.margin_30,
            MarginTier::Margin40 => self.margin_40,
            MarginTier::Margin50 => self.margin_50,
            MarginTier::Margin60 => self.margin_60,
            MarginTier::Margin70 => self.margin_70,
        }
    }

    /// Tiers paired with their rate, lowest margin first
    pub fn tiers(&self) -> impl Iterator<Item = (MarginTier, f64)> + '_ {
        MarginTier::ALL.into_iter().map(move |t| (t, self.for_tier(t)))
    }
}

/// Inputs for a full project quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectPricingInputs {
    /// Work volume in points
    pub score: f64,
    /// Production rate in points per hour
    pub production_rate: f64,
    /// One-way drive time in minutes
    pub drive_time_one_way_minutes: f64,
    /// Fraction of round-trip drive time that is billed (0.5 = half)
    pub transport_billing_fraction: f64,
    /// Loadout cost per hour
    pub loadout_hourly_rate: f64,
    /// Contingency buffer as a fraction of production + transport hours
    pub buffer_fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectPricingOutputs {
    pub production_hours: f64,
    pub transport_hours: f64,
    pub buffer_hours: f64,
    pub total_hours: f64,
    pub total_cost: f64,
    /// Quoted price at each margin tier
    pub prices: BillingRateOutputs,
}

/// Inputs for two-phase (excavator + grubbing) land clearing pricing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearingPricingInputs {
    pub acres: f64,
    pub density: ClearingDensity,
    pub afiss_multiplier: f64,
    pub loadout_hourly_rate: f64,
    pub excavator_rental_per_hour: f64,
    /// Debris truck loads; `None` means `ceil(acres * 2.5)`
    pub truck_loads: Option<f64>,
    pub cost_per_load: f64,
    pub excavator_margin: f64,
    pub grubbing_margin: f64,
    pub debris_margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearingPricingResult {
    pub adjusted_score: f64,
    pub excavator_hours: f64,
    pub grubbing_hours: f64,
    pub total_days: f64,
    pub truck_loads: f64,
    pub excavator_cost: f64,
    pub excavator_price: f64,
    pub grubbing_cost: f64,
    pub grubbing_price: f64,
    pub debris_cost: f64,
    pub debris_price: f64,
    pub total_cost: f64,
    pub total_price: f64,
    pub total_profit: f64,
}
