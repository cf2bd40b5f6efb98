//! Hourly cost and billing rate calculations
//!
//! Inputs are not validated. A zero `useful_life_years` or `annual_hours`
//! yields `inf`/`NaN`, and a margin of 1.0 or more yields an infinite or
//! negative price, following plain IEEE-754 arithmetic.

use crate::model::{
    BillingRateOutputs, EmployeeCostInputs, EquipmentCostInputs, EquipmentCostOutputs,
    LoadoutCostInputs, LoadoutCostOutputs,
};

/// Hourly ownership and operating cost of a piece of equipment
///
/// # Formula
/// ownership = (price / life + finance + insurance + registration) / annual_hours
/// operating = (fuel_gph x fuel_price x annual_hours + maintenance + repairs) / annual_hours
pub fn equipment_cost(inputs: &EquipmentCostInputs) -> EquipmentCostOutputs {
    let annual_ownership = inputs.purchase_price / inputs.useful_life_years
        + inputs.finance_cost_per_year
        + inputs.insurance_per_year
        + inputs.registration_per_year;
    let ownership_cost_per_hour = annual_ownership / inputs.annual_hours;

    let annual_fuel = inputs.fuel_gallons_per_hour * inputs.fuel_price_per_gallon * inputs.annual_hours;
    let annual_operating = annual_fuel + inputs.maintenance_per_year + inputs.repairs_per_year;
    let operating_cost_per_hour = annual_operating / inputs.annual_hours;

    EquipmentCostOutputs {
        ownership_cost_per_hour,
        operating_cost_per_hour,
        total_cost_per_hour: ownership_cost_per_hour + operating_cost_per_hour,
    }
}

/// Fully burdened hourly cost of an employee
pub fn employee_true_cost(base_hourly_rate: f64, burden_multiplier: f64) -> f64 {
    base_hourly_rate * burden_multiplier
}

pub fn employee_cost(inputs: &EmployeeCostInputs) -> f64 {
    employee_true_cost(inputs.base_hourly_rate, inputs.burden_multiplier)
}

/// Aggregate hourly cost of a loadout
pub fn loadout_cost(inputs: &LoadoutCostInputs) -> LoadoutCostOutputs {
    let equipment_cost: f64 = inputs.equipment_costs.iter().sum();
    let labor_cost: f64 = inputs.employee_costs.iter().sum();
    let overhead_cost = inputs.overhead_per_hour;

    LoadoutCostOutputs {
        equipment_cost,
        labor_cost,
        overhead_cost,
        total_cost: equipment_cost + labor_cost + overhead_cost,
    }
}

/// Price that yields `margin` (a fraction of price) over `cost`
pub fn price_with_margin(cost: f64, margin: f64) -> f64 {
    cost / (1.0 - margin)
}

/// Billing rates at the five fixed margin tiers
pub fn billing_rates(cost: f64) -> BillingRateOutputs {
    BillingRateOutputs {
        margin_30: price_with_margin(cost, 0.30),
        margin_40: price_with_margin(cost, 0.40),
        margin_50: price_with_margin(cost, 0.50),
        margin_60: price_with_margin(cost, 0.60),
        margin_70: price_with_margin(cost, 0.70),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MarginTier;
    use proptest::prelude::*;

    fn mulcher() -> EquipmentCostInputs {
        EquipmentCostInputs {
            purchase_price: 450_000.0,
            useful_life_years: 5.0,
            annual_hours: 1500.0,
            finance_cost_per_year: 12_000.0,
            insurance_per_year: 6_000.0,
            registration_per_year: 500.0,
            fuel_gallons_per_hour: 6.0,
            fuel_price_per_gallon: 4.0,
            maintenance_per_year: 15_000.0,
            repairs_per_year: 10_000.0,
        }
    }

    // ==========================================
    // Equipment
    // ==========================================

    #[test]
    fn test_equipment_cost_mulcher() {
        // ownership: (90000 + 12000 + 6000 + 500) / 1500 = 72.333...
        // operating: (6 x 4 x 1500 + 15000 + 10000) / 1500 = 40.666...
        let out = equipment_cost(&mulcher());
        assert!((out.ownership_cost_per_hour - 72.333_333).abs() < 0.001);
        assert!((out.operating_cost_per_hour - 40.666_667).abs() < 0.001);
        assert!((out.total_cost_per_hour - 113.0).abs() < 0.001);
    }

    #[test]
    fn test_equipment_cost_zero_hours_is_not_finite() {
        let inputs = EquipmentCostInputs {
            annual_hours: 0.0,
            ..mulcher()
        };
        let out = equipment_cost(&inputs);
        assert!(out.ownership_cost_per_hour.is_infinite());
        assert!(!out.total_cost_per_hour.is_finite());
    }

    #[test]
    fn test_equipment_cost_zero_life_is_infinite() {
        let inputs = EquipmentCostInputs {
            useful_life_years: 0.0,
            ..mulcher()
        };
        let out = equipment_cost(&inputs);
        assert_eq!(out.ownership_cost_per_hour, f64::INFINITY);
    }

    #[test]
    fn test_equipment_cost_all_zero_is_nan() {
        let out = equipment_cost(&EquipmentCostInputs::default());
        assert!(out.ownership_cost_per_hour.is_nan());
        assert!(out.operating_cost_per_hour.is_nan());
    }

    proptest! {
        #[test]
        fn prop_equipment_total_is_sum(
            price in 0.0f64..2_000_000.0,
            life in 0.5f64..30.0,
            hours in 1.0f64..5000.0,
            fuel in 0.0f64..20.0,
            maintenance in 0.0f64..100_000.0,
        ) {
            let inputs = EquipmentCostInputs {
                purchase_price: price,
                useful_life_years: life,
                annual_hours: hours,
                fuel_gallons_per_hour: fuel,
                fuel_price_per_gallon: 3.75,
                maintenance_per_year: maintenance,
                ..Default::default()
            };
            let out = equipment_cost(&inputs);
            prop_assert_eq!(out.total_cost_per_hour, out.ownership_cost_per_hour + out.operating_cost_per_hour);
        }
    }

    // ==========================================
    // Employees and loadouts
    // ==========================================

    #[test]
    fn test_employee_true_cost() {
        assert_eq!(employee_true_cost(20.0, 1.7), 34.0);
        let inputs = EmployeeCostInputs {
            base_hourly_rate: 25.0,
            burden_multiplier: 2.0,
        };
        assert_eq!(employee_cost(&inputs), 50.0);
    }

    #[test]
    fn test_loadout_cost() {
        let inputs = LoadoutCostInputs {
            equipment_costs: vec![113.0, 45.5],
            employee_costs: vec![34.0, 42.5],
            overhead_per_hour: 15.0,
        };
        let out = loadout_cost(&inputs);
        assert!((out.equipment_cost - 158.5).abs() < f64::EPSILON);
        assert!((out.labor_cost - 76.5).abs() < f64::EPSILON);
        assert!((out.total_cost - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_loadout_is_overhead_only() {
        let inputs = LoadoutCostInputs {
            overhead_per_hour: 20.0,
            ..Default::default()
        };
        let out = loadout_cost(&inputs);
        assert_eq!(out.equipment_cost, 0.0);
        assert_eq!(out.labor_cost, 0.0);
        assert_eq!(out.total_cost, 20.0);
    }

    // ==========================================
    // Billing rates
    // ==========================================

    #[test]
    fn test_billing_rates() {
        let rates = billing_rates(100.0);
        assert_eq!(rates.margin_50, 200.0);
        // 1.0 - 0.70 is not exactly 0.3 in binary
        assert!((rates.margin_70 - 100.0 / 0.3).abs() < 1e-9);
        assert!((rates.margin_70 - 333.33).abs() < 0.01);
        assert!((rates.margin_30 - 142.857).abs() < 0.001);
    }

    #[test]
    fn test_billing_rates_increase_with_margin() {
        let rates = billing_rates(250.0);
        let values: Vec<f64> = rates.tiers().map(|(_, v)| v).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(rates.for_tier(MarginTier::Margin40), price_with_margin(250.0, 0.40));
    }

    #[test]
    fn test_margin_of_one_is_infinite() {
        assert_eq!(price_with_margin(100.0, 1.0), f64::INFINITY);
        assert!(price_with_margin(100.0, 1.5) < 0.0);
    }
}
