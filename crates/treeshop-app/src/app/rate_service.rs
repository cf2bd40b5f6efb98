//! Rate Service - recalibrate production rates from completion history
//!
//! 1. Load completion reports from the repository
//! 2. Run the adaptive estimator per service line against its current rate
//! 3. Compare each result with the current rate
//! 4. Optionally adopt confident results into the rate table

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use treeshop_domain::repository::CompletionReportRepository;
use treeshop_domain::service::{AdaptiveRateEstimator, AdaptiveRateResult, RateComparison};
use treeshop_types::{ConfidenceLevel, Result, ServiceType};

use crate::constants::ProductionRates;

/// Outcome of recalibrating one service line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRecalibration {
    pub service: ServiceType,
    /// Rate in effect before recalibration
    pub default_rate: f64,
    pub result: AdaptiveRateResult,
    pub comparison: RateComparison,
    pub description: String,
}

impl RateRecalibration {
    /// Whether the result is trustworthy enough to replace the current rate
    pub fn is_adoptable(&self) -> bool {
        !self.result.is_using_defaults
            && matches!(
                self.result.confidence_level,
                ConfidenceLevel::High | ConfidenceLevel::Medium
            )
    }
}

pub fn recalibrate_service<R: CompletionReportRepository + ?Sized>(
    repo: &R,
    estimator: &AdaptiveRateEstimator,
    rates: &ProductionRates,
    service: ServiceType,
    now: DateTime<Utc>,
) -> Result<RateRecalibration> {
    let reports = repo.find_by_service(service)?;
    let default_rate = rates.rate_for(service);
    let result = estimator.calculate_adaptive_rate_at(&reports, default_rate, now);
    Ok(build(estimator, service, default_rate, result))
}

/// Recalibrate every service line. The repository is read once.
pub fn recalibrate_all<R: CompletionReportRepository + ?Sized>(
    repo: &R,
    estimator: &AdaptiveRateEstimator,
    rates: &ProductionRates,
    now: DateTime<Utc>,
) -> Result<Vec<RateRecalibration>> {
    let reports = repo.find_all()?;
    let recalibrations = ServiceType::ALL
        .iter()
        .map(|&service| {
            let default_rate = rates.rate_for(service);
            let result = estimator.calculate_for_service(&reports, service, default_rate, now);
            build(estimator, service, default_rate, result)
        })
        .collect();
    Ok(recalibrations)
}

/// Write adoptable rates into `rates`. Returns the service lines that changed.
pub fn apply_recalibrations(
    rates: &mut ProductionRates,
    recalibrations: &[RateRecalibration],
) -> Vec<ServiceType> {
    let mut updated = Vec::new();
    for recal in recalibrations.iter().filter(|r| r.is_adoptable()) {
        info!(
            service = %recal.service,
            from = recal.default_rate,
            to = recal.result.adaptive_rate,
            "adopting adaptive production rate"
        );
        rates.set_rate(recal.service, recal.result.adaptive_rate);
        updated.push(recal.service);
    }
    updated
}

fn build(
    estimator: &AdaptiveRateEstimator,
    service: ServiceType,
    default_rate: f64,
    result: AdaptiveRateResult,
) -> RateRecalibration {
    RateRecalibration {
        service,
        default_rate,
        comparison: estimator.compare_to_default(result.adaptive_rate, default_rate),
        description: estimator.confidence_description(&result),
        result,
    }
}
