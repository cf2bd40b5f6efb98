//! CSV import of job completion reports
//!
//! Expected header row:
//! job_id, service_type, completed_date, estimated_hours, actual_hours,
//! estimated_score, actual_score, [weather_impact], [crew_experience],
//! [equipment_issues], [site_complexity_multiplier], [notes]
//!
//! Rows that fail to parse are skipped with a warning.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use treeshop_domain::model::{CompletionReport, CrewExperience, JobMeasurements, WeatherImpact};
use treeshop_types::{Error, RepositoryError, Result, ServiceType};

const REQUIRED_COLUMNS: [&str; 7] = [
    "job_id",
    "service_type",
    "completed_date",
    "estimated_hours",
    "actual_hours",
    "estimated_score",
    "actual_score",
];

#[derive(Debug, Deserialize)]
struct CompletionRow {
    job_id: String,
    service_type: String,
    completed_date: String,
    estimated_hours: f64,
    actual_hours: f64,
    estimated_score: f64,
    actual_score: f64,
    #[serde(default)]
    weather_impact: Option<String>,
    #[serde(default)]
    crew_experience: Option<String>,
    #[serde(default)]
    equipment_issues: Option<bool>,
    #[serde(default)]
    site_complexity_multiplier: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
}

/// Load completion reports from a CSV file
pub fn load_reports_from_csv(path: &Path) -> Result<Vec<CompletionReport>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Err(RepositoryError::EmptyFile(path.display().to_string()).into());
    }
    let reports = load_reports_from_reader(file)?;
    info!(path = %path.display(), count = reports.len(), "imported completion reports");
    Ok(reports)
}

/// Load completion reports from any CSV source
pub fn load_reports_from_reader<R: Read>(reader: R) -> Result<Vec<CompletionReport>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(Error::InvalidInput(format!(
            "CSV is missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut reports = Vec::new();
    for (index, row) in csv_reader.deserialize::<CompletionRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!(line, error = %e, "skipping unreadable CSV row");
                continue;
            }
        };
        match row_to_report(row) {
            Ok(report) => reports.push(report),
            Err(e) => warn!(line, error = %e, "skipping invalid CSV row"),
        }
    }
    Ok(reports)
}

fn row_to_report(row: CompletionRow) -> Result<CompletionReport> {
    let service = ServiceType::from_key(&row.service_type)
        .ok_or_else(|| Error::InvalidInput(format!("unknown service type '{}'", row.service_type)))?;
    let completed_date = parse_completed_date(&row.completed_date)
        .ok_or_else(|| Error::InvalidInput(format!("unrecognised date '{}'", row.completed_date)))?;

    let weather: WeatherImpact = parse_condition(row.weather_impact.as_deref())?;
    let crew: CrewExperience = parse_condition(row.crew_experience.as_deref())?;

    let mut report = CompletionReport::from_job(
        row.job_id,
        service,
        completed_date,
        JobMeasurements {
            estimated_hours: row.estimated_hours,
            actual_hours: row.actual_hours,
            estimated_score: row.estimated_score,
            actual_score: row.actual_score,
        },
    )
    .with_conditions(
        weather,
        crew,
        row.equipment_issues.unwrap_or(false),
    );
    if let Some(multiplier) = row.site_complexity_multiplier {
        report = report.with_site_complexity(multiplier);
    }
    if let Some(notes) = row.notes.filter(|n| !n.is_empty()) {
        report = report.with_notes(notes);
    }
    Ok(report)
}

/// Blank cells take the default; values are matched case-insensitively
fn parse_condition<T>(cell: Option<&str>) -> Result<T>
where
    T: Default + std::str::FromStr<Err = String>,
{
    match cell.map(str::trim).filter(|c| !c.is_empty()) {
        Some(value) => value.parse().map_err(Error::InvalidInput),
        None => Ok(T::default()),
    }
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM`, or plain dates (taken as midnight UTC)
pub fn parse_completed_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Some(dt.and_utc());
    }
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}
