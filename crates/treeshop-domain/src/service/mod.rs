//! Domain services
//!
//! The pricing formulas are pure functions. `adaptive_rate` holds the only
//! configured component, the production rate estimator.

pub mod adaptive_rate;
pub mod clearing;
pub mod cost_calculator;
pub mod production_rate;
pub mod project_pricing;
pub mod scoring;

pub use adaptive_rate::{
    AdaptiveRateConfig, AdaptiveRateConfigOverride, AdaptiveRateEstimator, AdaptiveRateResult,
    RateComparison, RateDirection,
};
pub use clearing::{clearing_pricing, clearing_score};
pub use cost_calculator::{
    billing_rates, employee_cost, employee_true_cost, equipment_cost, loadout_cost,
    price_with_margin,
};
pub use production_rate::production_rate_from_gpm;
pub use project_pricing::project_pricing;
pub use scoring::{
    afiss_multiplier, forestry_mulching_score, stump_job_score, stump_score, tree_removal_score,
    tree_score, tree_trimming,
};
