//! Adaptive production rates from job completion history
//!
//! The estimator takes the actual points-per-hour of recently completed jobs,
//! trims outliers from both ends, and reports the trimmed mean together with
//! a confidence level. Configuration is fixed at construction and every
//! method takes `&self`, so one instance can be shared freely.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use treeshop_types::{ConfidenceLevel, ServiceType};

use crate::model::CompletionReport;

/// Samples at or above this size with CV below `HIGH_CONFIDENCE_CV` are high confidence
pub const HIGH_CONFIDENCE_SAMPLES: usize = 20;
pub const HIGH_CONFIDENCE_CV: f64 = 0.10;
/// Samples below this size are never better than insufficient
pub const MEDIUM_CONFIDENCE_SAMPLES: usize = 10;
/// Trimming only applies to samples of at least this size
pub const MIN_TRIM_SAMPLE: usize = 4;
/// Differences within this many percent count as "same"
pub const SAME_RATE_DEAD_ZONE_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveRateConfig {
    /// Only reports completed within this many days are used
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
    #[serde(default = "default_minimum_data_points")]
    pub minimum_data_points: usize,
    /// Fraction trimmed from each end of the sorted sample
    #[serde(default = "default_outlier_trim_percent")]
    pub outlier_trim_percent: f64,
    /// Coefficient of variation below which a sample is medium confidence
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

fn default_lookback_days() -> i64 {
    90
}

fn default_minimum_data_points() -> usize {
    10
}

fn default_outlier_trim_percent() -> f64 {
    0.10
}

fn default_confidence_threshold() -> f64 {
    0.15
}

impl Default for AdaptiveRateConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            minimum_data_points: default_minimum_data_points(),
            outlier_trim_percent: default_outlier_trim_percent(),
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

/// Partial configuration; unset fields keep their defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveRateConfigOverride {
    pub lookback_days: Option<i64>,
    pub minimum_data_points: Option<usize>,
    pub outlier_trim_percent: Option<f64>,
    pub confidence_threshold: Option<f64>,
}

impl AdaptiveRateConfig {
    pub fn with_overrides(overrides: AdaptiveRateConfigOverride) -> Self {
        let defaults = Self::default();
        Self {
            lookback_days: overrides.lookback_days.unwrap_or(defaults.lookback_days),
            minimum_data_points: overrides
                .minimum_data_points
                .unwrap_or(defaults.minimum_data_points),
            outlier_trim_percent: overrides
                .outlier_trim_percent
                .unwrap_or(defaults.outlier_trim_percent),
            confidence_threshold: overrides
                .confidence_threshold
                .unwrap_or(defaults.confidence_threshold),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveRateResult {
    /// Trimmed mean of actual PpH, or the default rate when data is insufficient
    pub adaptive_rate: f64,
    pub confidence_level: ConfidenceLevel,
    /// Reports inside the lookback window
    pub sample_size: usize,
    /// Values left after outlier trimming
    pub trimmed_sample_size: usize,
    pub standard_deviation: f64,
    pub coefficient_of_variation: f64,
    pub min_rate: f64,
    pub max_rate: f64,
    pub median_rate: f64,
    pub is_using_defaults: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateDirection {
    Faster,
    Slower,
    Same,
}

impl RateDirection {
    pub fn label(&self) -> &'static str {
        match self {
            RateDirection::Faster => "faster",
            RateDirection::Slower => "slower",
            RateDirection::Same => "same",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateComparison {
    pub percent_difference: f64,
    pub direction: RateDirection,
    pub recommendation: String,
}

/// Descriptive statistics of a sample. All zero for an empty sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleStats {
    pub mean: f64,
    pub standard_deviation: f64,
    pub coefficient_of_variation: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleStats {
    /// `sorted` must be in ascending order
    pub fn from_sorted(sorted: &[f64]) -> Self {
        let n = sorted.len();
        if n == 0 {
            return Self::default();
        }

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        let standard_deviation = variance.sqrt();
        let coefficient_of_variation = if mean != 0.0 {
            standard_deviation / mean
        } else {
            0.0
        };
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        Self {
            mean,
            standard_deviation,
            coefficient_of_variation,
            median,
            min: sorted[0],
            max: sorted[n - 1],
        }
    }
}

/// Drop `floor(n x fraction)` values from each end of a sorted sample.
/// Samples smaller than four are returned whole.
pub fn trim_outliers(sorted: &[f64], fraction: f64) -> &[f64] {
    let n = sorted.len();
    if n < MIN_TRIM_SAMPLE {
        return sorted;
    }
    let cut = ((n as f64 * fraction).floor().max(0.0) as usize).min(n / 2);
    &sorted[cut..n - cut]
}

#[derive(Debug, Clone, Default)]
pub struct AdaptiveRateEstimator {
    config: AdaptiveRateConfig,
}

impl AdaptiveRateEstimator {
    pub fn new(config: AdaptiveRateConfig) -> Self {
        Self { config }
    }

    pub fn with_overrides(overrides: AdaptiveRateConfigOverride) -> Self {
        Self::new(AdaptiveRateConfig::with_overrides(overrides))
    }

    pub fn config(&self) -> &AdaptiveRateConfig {
        &self.config
    }

    /// Recalibrate against the current time
    pub fn calculate_adaptive_rate(&self, reports: &[CompletionReport], default_rate: f64) -> AdaptiveRateResult {
        self.calculate_adaptive_rate_at(reports, default_rate, Utc::now())
    }

    /// Only reports of `service` are considered
    pub fn calculate_for_service(
        &self,
        reports: &[CompletionReport],
        service: ServiceType,
        default_rate: f64,
        now: DateTime<Utc>,
    ) -> AdaptiveRateResult {
        let matching: Vec<CompletionReport> = reports
            .iter()
            .filter(|r| r.service_type == service)
            .cloned()
            .collect();
        self.calculate_adaptive_rate_at(&matching, default_rate, now)
    }

    pub fn calculate_adaptive_rate_at(
        &self,
        reports: &[CompletionReport],
        default_rate: f64,
        now: DateTime<Utc>,
    ) -> AdaptiveRateResult {
        // a window reaching past the representable calendar has no cutoff
        let cutoff = TimeDelta::try_days(self.config.lookback_days)
            .and_then(|window| now.checked_sub_signed(window));
        let mut rates: Vec<f64> = reports
            .iter()
            .filter(|r| cutoff.map_or(true, |c| r.completed_date >= c))
            .map(|r| r.actual_pph)
            .collect();
        let sample_size = rates.len();

        if sample_size < self.config.minimum_data_points {
            debug!(
                sample_size,
                minimum = self.config.minimum_data_points,
                "not enough recent reports, using default rate"
            );
            return AdaptiveRateResult {
                adaptive_rate: default_rate,
                confidence_level: ConfidenceLevel::Insufficient,
                sample_size,
                trimmed_sample_size: 0,
                standard_deviation: 0.0,
                coefficient_of_variation: 0.0,
                min_rate: 0.0,
                max_rate: 0.0,
                median_rate: 0.0,
                is_using_defaults: true,
            };
        }

        rates.sort_by(|a, b| a.total_cmp(b));
        let trimmed = trim_outliers(&rates, self.config.outlier_trim_percent);
        let stats = SampleStats::from_sorted(trimmed);
        let confidence_level = self.classify(trimmed.len(), stats.coefficient_of_variation);

        debug!(
            sample_size,
            trimmed = trimmed.len(),
            rate = stats.mean,
            cv = stats.coefficient_of_variation,
            confidence = %confidence_level,
            "adaptive rate calculated"
        );

        AdaptiveRateResult {
            adaptive_rate: stats.mean,
            confidence_level,
            sample_size,
            trimmed_sample_size: trimmed.len(),
            standard_deviation: stats.standard_deviation,
            coefficient_of_variation: stats.coefficient_of_variation,
            min_rate: stats.min,
            max_rate: stats.max,
            median_rate: stats.median,
            is_using_defaults: false,
        }
    }

    fn classify(&self, trimmed_count: usize, cv: f64) -> ConfidenceLevel {
        if trimmed_count < self.config.minimum_data_points {
            ConfidenceLevel::Insufficient
        } else if trimmed_count >= HIGH_CONFIDENCE_SAMPLES && cv < HIGH_CONFIDENCE_CV {
            ConfidenceLevel::High
        } else if trimmed_count >= MEDIUM_CONFIDENCE_SAMPLES && cv < self.config.confidence_threshold {
            ConfidenceLevel::Medium
        } else if trimmed_count >= MEDIUM_CONFIDENCE_SAMPLES {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::Insufficient
        }
    }

    pub fn confidence_description(&self, result: &AdaptiveRateResult) -> String {
        let cv_percent = result.coefficient_of_variation * 100.0;
        match result.confidence_level {
            ConfidenceLevel::High => format!(
                "High confidence: {} recent jobs with consistent results ({:.1}% variation).",
                result.trimmed_sample_size, cv_percent
            ),
            ConfidenceLevel::Medium => format!(
                "Medium confidence: {} recent jobs with moderate variation ({:.1}%).",
                result.trimmed_sample_size, cv_percent
            ),
            ConfidenceLevel::Low => format!(
                "Low confidence: {} recent jobs with high variation ({:.1}%). Review outliers before adopting this rate.",
                result.trimmed_sample_size, cv_percent
            ),
            ConfidenceLevel::Insufficient if result.is_using_defaults => format!(
                "Insufficient data: {} jobs in the last {} days, at least {} needed. Using the default rate.",
                result.sample_size, self.config.lookback_days, self.config.minimum_data_points
            ),
            ConfidenceLevel::Insufficient => format!(
                "Insufficient data: {} jobs left after outlier trimming ({:.1}% variation), at least {} needed.",
                result.trimmed_sample_size, cv_percent, self.config.minimum_data_points
            ),
        }
    }

    /// Percent difference of the adaptive rate from the default. A zero
    /// default compares as 0%.
    ///
    /// The dead zone is inclusive (`<= 5`), not strictly under 5%: a
    /// difference of exactly 5%, such as 105 against 100, is `Same`.
    pub fn compare_to_default(&self, adaptive_rate: f64, default_rate: f64) -> RateComparison {
        let percent_difference = if default_rate != 0.0 {
            (adaptive_rate - default_rate) / default_rate * 100.0
        } else {
            0.0
        };

        let direction = if percent_difference.abs() <= SAME_RATE_DEAD_ZONE_PERCENT {
            RateDirection::Same
        } else if percent_difference > 0.0 {
            RateDirection::Faster
        } else {
            RateDirection::Slower
        };

        let recommendation = match direction {
            RateDirection::Faster => format!(
                "Crews are producing {:.1}% faster than the default. Consider raising the default to {:.2} PpH to keep quotes competitive.",
                percent_difference, adaptive_rate
            ),
            RateDirection::Slower => format!(
                "Crews are producing {:.1}% slower than the default. Consider lowering the default to {:.2} PpH to protect margins.",
                percent_difference.abs(), adaptive_rate
            ),
            RateDirection::Same => format!(
                "Actual production is within {:.0}% of the default rate. No change needed.",
                SAME_RATE_DEAD_ZONE_PERCENT
            ),
        };

        RateComparison {
            percent_difference,
            direction,
            recommendation,
        }
    }
}
