//! Job completion reports used to recalibrate production rates

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use treeshop_types::ServiceType;

/// How much weather slowed the crew down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherImpact {
    #[default]
    None,
    Minor,
    Moderate,
    Severe,
}

/// Experience tier of the crew that did the job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrewExperience {
    Novice,
    #[default]
    Intermediate,
    Experienced,
    Expert,
}

impl FromStr for WeatherImpact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(WeatherImpact::None),
            "minor" => Ok(WeatherImpact::Minor),
            "moderate" => Ok(WeatherImpact::Moderate),
            "severe" => Ok(WeatherImpact::Severe),
            other => Err(format!(
                "weather impact must be none, minor, moderate or severe (got '{}')",
                other
            )),
        }
    }
}

impl FromStr for CrewExperience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "novice" => Ok(CrewExperience::Novice),
            "intermediate" => Ok(CrewExperience::Intermediate),
            "experienced" => Ok(CrewExperience::Experienced),
            "expert" => Ok(CrewExperience::Expert),
            other => Err(format!(
                "crew experience must be novice, intermediate, experienced or expert (got '{}')",
                other
            )),
        }
    }
}

/// Outcome of one finished job. Created at close-out and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub id: String,
    pub job_id: String,
    pub service_type: ServiceType,
    pub completed_date: DateTime<Utc>,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub estimated_score: f64,
    pub actual_score: f64,
    /// Points per hour the quote assumed
    pub estimated_pph: f64,
    /// Points per hour the crew achieved
    pub actual_pph: f64,
    /// Hours overrun in percent of the estimate (negative = finished early)
    pub variance_percent: f64,
    #[serde(default)]
    pub weather_impact: WeatherImpact,
    #[serde(default)]
    pub crew_experience: CrewExperience,
    #[serde(default)]
    pub equipment_issues: bool,
    /// AFISS multiplier realised on site
    #[serde(default = "default_site_complexity")]
    pub site_complexity_multiplier: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_site_complexity() -> f64 {
    1.0
}

/// Estimated vs actual hours and score for a job
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobMeasurements {
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub estimated_score: f64,
    pub actual_score: f64,
}

impl CompletionReport {
    /// Stable id for a job: the same job id on the same service line always
    /// maps to the same report id.
    pub fn report_id(service_type: ServiceType, job_id: &str) -> String {
        let name = format!("{}/{}", service_type.key(), job_id.trim());
        uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
    }

    /// Whether both reports describe the same job
    pub fn is_same_job(&self, other: &CompletionReport) -> bool {
        self.id == other.id
            || (self.service_type == other.service_type && self.job_id.trim() == other.job_id.trim())
    }

    /// Build a report, deriving PpH and variance from the measurements.
    /// Zero hours give a PpH of 0 and a zero estimate gives a variance of 0.
    pub fn from_job(
        job_id: impl Into<String>,
        service_type: ServiceType,
        completed_date: DateTime<Utc>,
        measurements: JobMeasurements,
    ) -> Self {
        let JobMeasurements {
            estimated_hours,
            actual_hours,
            estimated_score,
            actual_score,
        } = measurements;

        let job_id = job_id.into();
        Self {
            id: Self::report_id(service_type, &job_id),
            job_id,
            service_type,
            completed_date,
            estimated_hours,
            actual_hours,
            estimated_score,
            actual_score,
            estimated_pph: safe_ratio(estimated_score, estimated_hours),
            actual_pph: safe_ratio(actual_score, actual_hours),
            variance_percent: if estimated_hours != 0.0 {
                (actual_hours - estimated_hours) / estimated_hours * 100.0
            } else {
                0.0
            },
            weather_impact: WeatherImpact::None,
            crew_experience: CrewExperience::Intermediate,
            equipment_issues: false,
            site_complexity_multiplier: default_site_complexity(),
            notes: None,
        }
    }

    pub fn with_conditions(
        mut self,
        weather_impact: WeatherImpact,
        crew_experience: CrewExperience,
        equipment_issues: bool,
    ) -> Self {
        self.weather_impact = weather_impact;
        self.crew_experience = crew_experience;
        self.equipment_issues = equipment_issues;
        self
    }

    pub fn with_site_complexity(mut self, multiplier: f64) -> Self {
        self.site_complexity_multiplier = multiplier;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn measurements() -> JobMeasurements {
        JobMeasurements {
            estimated_hours: 10.0,
            actual_hours: 12.5,
            estimated_score: 20.0,
            actual_score: 20.0,
        }
    }

    #[test]
    fn test_from_job_derives_rates() {
        let date = Utc.with_ymd_and_hms(2026, 3, 1, 17, 0, 0).unwrap();
        let report = CompletionReport::from_job("WO-1", ServiceType::ForestryMulching, date, measurements());
        assert!((report.estimated_pph - 2.0).abs() < f64::EPSILON);
        assert!((report.actual_pph - 1.6).abs() < 1e-12);
        assert!((report.variance_percent - 25.0).abs() < 1e-12);
        assert_eq!(report.job_id, "WO-1");
        assert!(!report.id.is_empty());
    }

    #[test]
    fn test_report_id_is_stable_per_job() {
        let date = Utc.with_ymd_and_hms(2026, 3, 1, 17, 0, 0).unwrap();
        let first = CompletionReport::from_job("WO-1", ServiceType::StumpGrinding, date, measurements());
        let again = CompletionReport::from_job("WO-1", ServiceType::StumpGrinding, date, measurements());
        let other_line = CompletionReport::from_job("WO-1", ServiceType::TreeRemoval, date, measurements());
        assert_eq!(first.id, again.id);
        assert_ne!(first.id, other_line.id);
        assert!(first.is_same_job(&again));
        assert!(!first.is_same_job(&other_line));
    }

    #[test]
    fn test_from_job_zero_hours() {
        let date = Utc.with_ymd_and_hms(2026, 3, 1, 17, 0, 0).unwrap();
        let report = CompletionReport::from_job(
            "WO-2",
            ServiceType::StumpGrinding,
            date,
            JobMeasurements {
                estimated_hours: 0.0,
                actual_hours: 0.0,
                estimated_score: 100.0,
                actual_score: 100.0,
            },
        );
        assert_eq!(report.actual_pph, 0.0);
        assert_eq!(report.estimated_pph, 0.0);
        assert_eq!(report.variance_percent, 0.0);
    }

    #[test]
    fn test_json_defaults_for_conditions() {
        let json = r#"{
            "id": "r1",
            "job_id": "WO-3",
            "service_type": "land_clearing",
            "completed_date": "2026-02-10T12:00:00Z",
            "estimated_hours": 48.0,
            "actual_hours": 50.0,
            "estimated_score": 2.0,
            "actual_score": 2.0,
            "estimated_pph": 0.0417,
            "actual_pph": 0.04,
            "variance_percent": 4.17
        }"#;
        let report: CompletionReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.weather_impact, WeatherImpact::None);
        assert_eq!(report.crew_experience, CrewExperience::Intermediate);
        assert!((report.site_complexity_multiplier - 1.0).abs() < f64::EPSILON);
        assert!(report.notes.is_none());
    }

    #[test]
    fn test_condition_parsing() {
        assert_eq!("Severe".parse::<WeatherImpact>(), Ok(WeatherImpact::Severe));
        assert_eq!(" expert ".parse::<CrewExperience>(), Ok(CrewExperience::Expert));
        assert!("hurricane".parse::<WeatherImpact>().is_err());
    }
}
