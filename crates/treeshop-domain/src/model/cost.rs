//! Equipment, employee, and loadout cost records

use serde::{Deserialize, Serialize};

/// Ownership and operating figures for one piece of equipment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentCostInputs {
    /// Purchase price in dollars
    pub purchase_price: f64,
    /// Useful life in years
    pub useful_life_years: f64,
    /// Operating hours per year
    pub annual_hours: f64,
    #[serde(default)]
    pub finance_cost_per_year: f64,
    #[serde(default)]
    pub insurance_per_year: f64,
    #[serde(default)]
    pub registration_per_year: f64,
    #[serde(default)]
    pub fuel_gallons_per_hour: f64,
    #[serde(default)]
    pub fuel_price_per_gallon: f64,
    #[serde(default)]
    pub maintenance_per_year: f64,
    #[serde(default)]
    pub repairs_per_year: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquipmentCostOutputs {
    pub ownership_cost_per_hour: f64,
    pub operating_cost_per_hour: f64,
    /// Always `ownership_cost_per_hour + operating_cost_per_hour`
    pub total_cost_per_hour: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCostInputs {
    pub base_hourly_rate: f64,
    /// Burden multiplier, typically 1.6 - 2.2
    pub burden_multiplier: f64,
}

/// Hourly costs of everything assigned to a loadout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadoutCostInputs {
    pub equipment_costs: Vec<f64>,
    pub employee_costs: Vec<f64>,
    pub overhead_per_hour: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadoutCostOutputs {
    pub equipment_cost: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub total_cost: f64,
}
