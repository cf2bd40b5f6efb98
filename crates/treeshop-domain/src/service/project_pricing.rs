//! Full project quote: hours, cost, and margin-tier prices

use crate::model::{BillingRateOutputs, ProjectPricingInputs, ProjectPricingOutputs};
use crate::service::cost_calculator::billing_rates;

/// Quote a project from its score and loadout
///
/// production = score / rate
/// transport = (drive minutes x 2 / 60) x billing fraction
/// buffer = (production + transport) x buffer fraction
///
/// Each tier price is total hours times the loadout's billing rate at that margin.
pub fn project_pricing(inputs: &ProjectPricingInputs) -> ProjectPricingOutputs {
    let production_hours = inputs.score / inputs.production_rate;
    let transport_hours =
        (inputs.drive_time_one_way_minutes * 2.0 / 60.0) * inputs.transport_billing_fraction;
    let buffer_hours = (production_hours + transport_hours) * inputs.buffer_fraction;
    let total_hours = production_hours + transport_hours + buffer_hours;

    let rates = billing_rates(inputs.loadout_hourly_rate);
    let prices = BillingRateOutputs {
        margin_30: total_hours * rates.margin_30,
        margin_40: total_hours * rates.margin_40,
        margin_50: total_hours * rates.margin_50,
        margin_60: total_hours * rates.margin_60,
        margin_70: total_hours * rates.margin_70,
    };

    ProjectPricingOutputs {
        production_hours,
        transport_hours,
        buffer_hours,
        total_hours,
        total_cost: total_hours * inputs.loadout_hourly_rate,
        prices,
    }
}
