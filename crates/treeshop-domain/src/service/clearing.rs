//! Land clearing: score, hours, and two-phase pricing
//!
//! Clearing runs as an excavator phase (two 8-hour days per point) followed
//! by a grubbing phase (one 8-hour day per point). Each phase, plus debris
//! haul-off, is priced with its own margin. Margins are not capped.

use crate::model::{ClearingDensity, ClearingPricingInputs, ClearingPricingResult, ClearingScoreResult};
use crate::service::cost_calculator::price_with_margin;

pub const EXCAVATOR_HOURS_PER_POINT: f64 = 16.0;
pub const GRUBBING_HOURS_PER_POINT: f64 = 8.0;
pub const HOURS_PER_DAY: f64 = 8.0;
pub const TRUCK_LOADS_PER_ACRE: f64 = 2.5;

pub fn clearing_score(acres: f64, density: ClearingDensity, afiss_multiplier: f64) -> ClearingScoreResult {
    let base_score = acres * density.multiplier();
    let adjusted_score = base_score * afiss_multiplier;
    let excavator_hours = adjusted_score * EXCAVATOR_HOURS_PER_POINT;
    let grubbing_hours = adjusted_score * GRUBBING_HOURS_PER_POINT;
    let total_hours = excavator_hours + grubbing_hours;

    ClearingScoreResult {
        base_score,
        adjusted_score,
        excavator_hours,
        grubbing_hours,
        total_hours,
        total_days: (total_hours / HOURS_PER_DAY).ceil(),
    }
}

/// Debris truck loads when none are given
pub fn default_truck_loads(acres: f64) -> f64 {
    (acres * TRUCK_LOADS_PER_ACRE).ceil()
}

pub fn clearing_pricing(inputs: &ClearingPricingInputs) -> ClearingPricingResult {
    let score = clearing_score(inputs.acres, inputs.density, inputs.afiss_multiplier);

    let excavator_cost =
        score.excavator_hours * (inputs.loadout_hourly_rate + inputs.excavator_rental_per_hour);
    let grubbing_cost = score.grubbing_hours * inputs.loadout_hourly_rate;
    let truck_loads = inputs
        .truck_loads
        .unwrap_or_else(|| default_truck_loads(inputs.acres));
    let debris_cost = truck_loads * inputs.cost_per_load;

    let excavator_price = price_with_margin(excavator_cost, inputs.excavator_margin);
    let grubbing_price = price_with_margin(grubbing_cost, inputs.grubbing_margin);
    let debris_price = price_with_margin(debris_cost, inputs.debris_margin);

    let total_cost = excavator_cost + grubbing_cost + debris_cost;
    let total_price = excavator_price + grubbing_price + debris_price;

    ClearingPricingResult {
        adjusted_score: score.adjusted_score,
        excavator_hours: score.excavator_hours,
        grubbing_hours: score.grubbing_hours,
        total_days: score.total_days,
        truck_loads,
        excavator_cost,
        excavator_price,
        grubbing_cost,
        grubbing_price,
        debris_cost,
        debris_price,
        total_cost,
        total_price,
        total_profit: total_price - total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_acre_job() -> ClearingPricingInputs {
        ClearingPricingInputs {
            acres: 2.0,
            density: ClearingDensity::Average,
            afiss_multiplier: 1.0,
            loadout_hourly_rate: 150.0,
            excavator_rental_per_hour: 50.0,
            truck_loads: None,
            cost_per_load: 300.0,
            excavator_margin: 0.5,
            grubbing_margin: 0.4,
            debris_margin: 0.2,
        }
    }

    #[test]
    fn test_clearing_score_average() {
        let result = clearing_score(2.0, ClearingDensity::Average, 1.0);
        assert_eq!(result.adjusted_score, 2.0);
        assert_eq!(result.excavator_hours, 32.0);
        assert_eq!(result.grubbing_hours, 16.0);
        assert_eq!(result.total_hours, 48.0);
        assert_eq!(result.total_days, 6.0);
    }

    #[test]
    fn test_clearing_score_heavy_with_afiss() {
        // 1.5 x 1.3 x 1.2 = 2.34 points -> 37.44 + 18.72 = 56.16h -> 8 days
        let result = clearing_score(1.5, ClearingDensity::Heavy, 1.2);
        assert!((result.base_score - 1.95).abs() < 1e-9);
        assert!((result.adjusted_score - 2.34).abs() < 1e-9);
        assert!((result.total_hours - 56.16).abs() < 1e-9);
        assert_eq!(result.total_days, 8.0);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        // 0.1 acre light: 0.07 points -> 1.68h -> 1 day
        let result = clearing_score(0.1, ClearingDensity::Light, 1.0);
        assert_eq!(result.total_days, 1.0);
    }

    #[test]
    fn test_default_truck_loads() {
        assert_eq!(default_truck_loads(2.0), 5.0);
        assert_eq!(default_truck_loads(1.1), 3.0);
        assert_eq!(default_truck_loads(0.0), 0.0);
    }

    #[test]
    fn test_clearing_pricing_phases() {
        let result = clearing_pricing(&two_acre_job());
        // excavator: 32h x (150 + 50) = 6400 -> /0.5 = 12800
        assert_eq!(result.excavator_cost, 6400.0);
        assert_eq!(result.excavator_price, 12800.0);
        // grubbing: 16h x 150 = 2400 -> /0.6 = 4000
        assert_eq!(result.grubbing_cost, 2400.0);
        assert!((result.grubbing_price - 4000.0).abs() < 1e-9);
        // debris: ceil(5) loads x 300 = 1500 -> /0.8 = 1875
        assert_eq!(result.truck_loads, 5.0);
        assert_eq!(result.debris_cost, 1500.0);
        assert!((result.debris_price - 1875.0).abs() < 1e-9);

        assert_eq!(result.total_cost, 10300.0);
        assert!((result.total_price - 18675.0).abs() < 1e-9);
        assert!((result.total_profit - 8375.0).abs() < 1e-9);
    }

    #[test]
    fn test_clearing_pricing_explicit_truck_loads() {
        let inputs = ClearingPricingInputs {
            truck_loads: Some(2.0),
            ..two_acre_job()
        };
        let result = clearing_pricing(&inputs);
        assert_eq!(result.truck_loads, 2.0);
        assert_eq!(result.debris_cost, 600.0);
    }

    #[test]
    fn test_margin_of_one_is_not_rejected() {
        let inputs = ClearingPricingInputs {
            excavator_margin: 1.0,
            ..two_acre_job()
        };
        let result = clearing_pricing(&inputs);
        assert!(result.excavator_price.is_infinite());
        assert!(result.total_profit.is_infinite());
    }
}
