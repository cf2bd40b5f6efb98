//! Domain model types

pub mod afiss;
pub mod completion_report;
pub mod cost;
pub mod pricing;
pub mod scoring;

pub use afiss::{AfissCategory, AfissFactor};
pub use completion_report::{CompletionReport, CrewExperience, JobMeasurements, WeatherImpact};
pub use cost::{
    EmployeeCostInputs, EquipmentCostInputs, EquipmentCostOutputs, LoadoutCostInputs,
    LoadoutCostOutputs,
};
pub use pricing::{
    BillingRateOutputs, ClearingPricingInputs, ClearingPricingResult, MarginTier,
    ProjectPricingInputs, ProjectPricingOutputs,
};
pub use scoring::{
    ClearingDensity, ClearingScoreResult, DbhPackage, StumpInputs, TreeInputs,
    TreeTrimmingResult,
};
