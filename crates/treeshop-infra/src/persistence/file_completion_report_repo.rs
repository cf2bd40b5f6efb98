//! File-based completion report repository
//!
//! Reports are kept in `completion_reports.json` under the store directory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use treeshop_domain::model::CompletionReport;
use treeshop_domain::repository::CompletionReportRepository;
use treeshop_types::{RepositoryError, Result};

pub const REPORTS_FILE_NAME: &str = "completion_reports.json";

/// Stores completion reports in a JSON file on disk
pub struct FileCompletionReportRepository {
    store_path: PathBuf,
    reports: RefCell<HashMap<String, CompletionReport>>,
}

impl FileCompletionReportRepository {
    /// Create or load a report repository
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(REPORTS_FILE_NAME);

        let reports: HashMap<String, CompletionReport> = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader)?
        } else {
            HashMap::new()
        };
        info!(path = %store_path.display(), count = reports.len(), "opened completion report store");

        Ok(Self {
            store_path,
            reports: RefCell::new(reports),
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Save store to disk
    fn persist(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &*self.reports.borrow())?;
        Ok(())
    }

    /// Whether a report for the same job is already stored
    pub fn contains_job(&self, report: &CompletionReport) -> bool {
        is_recorded(&self.reports.borrow(), report)
    }

    /// Save several reports with a single write. Reports for jobs already
    /// stored are skipped. Returns the number of reports added.
    pub fn save_all(&self, reports: &[CompletionReport]) -> Result<usize> {
        let mut added = 0;
        {
            let mut stored = self.reports.borrow_mut();
            for report in reports {
                if is_recorded(&stored, report) {
                    debug!(job_id = %report.job_id, service = %report.service_type, "skipping duplicate report");
                    continue;
                }
                stored.insert(report.id.clone(), report.clone());
                added += 1;
            }
        }
        if added > 0 {
            self.persist()?;
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }

    /// All reports, newest first
    pub fn all_reports(&self) -> Vec<CompletionReport> {
        let mut reports: Vec<_> = self.reports.borrow().values().cloned().collect();
        reports.sort_by(|a, b| b.completed_date.cmp(&a.completed_date));
        reports
    }
}

/// Matches on id, or on job id within the same service line
fn is_recorded(stored: &HashMap<String, CompletionReport>, report: &CompletionReport) -> bool {
    stored.contains_key(&report.id) || stored.values().any(|r| r.is_same_job(report))
}

impl CompletionReportRepository for FileCompletionReportRepository {
    fn save(&self, report: &CompletionReport) -> Result<()> {
        if self.contains_job(report) {
            return Err(RepositoryError::Duplicate(format!(
                "{} ({})",
                report.job_id, report.service_type
            ))
            .into());
        }
        self.reports
            .borrow_mut()
            .insert(report.id.clone(), report.clone());
        self.persist()
    }

    fn find_all(&self) -> Result<Vec<CompletionReport>> {
        Ok(self.all_reports())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::tempdir;
    use treeshop_domain::model::JobMeasurements;
    use treeshop_types::{Error, ServiceType};

    fn report(service: ServiceType, day: u32) -> CompletionReport {
        CompletionReport::from_job(
            format!("WO-{}", day),
            service,
            Utc.with_ymd_and_hms(2026, 5, day, 16, 0, 0).unwrap(),
            JobMeasurements {
                estimated_hours: 8.0,
                actual_hours: 9.0,
                estimated_score: 12.0,
                actual_score: 12.0,
            },
        )
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        {
            let repo = FileCompletionReportRepository::open(dir.path().to_path_buf()).unwrap();
            repo.save(&report(ServiceType::ForestryMulching, 1)).unwrap();
            repo.save(&report(ServiceType::StumpGrinding, 2)).unwrap();
        }
        let repo = FileCompletionReportRepository::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(repo.len(), 2);
        assert!(repo.store_path().ends_with(REPORTS_FILE_NAME));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let dir = tempdir().unwrap();
        let repo = FileCompletionReportRepository::open(dir.path().to_path_buf()).unwrap();
        let r = report(ServiceType::TreeRemoval, 3);
        repo.save(&r).unwrap();
        let err = repo.save(&r).unwrap_err();
        assert!(matches!(err, Error::Repository(RepositoryError::Duplicate(_))));
    }

    #[test]
    fn test_save_all_skips_duplicates() {
        let dir = tempdir().unwrap();
        let repo = FileCompletionReportRepository::open(dir.path().to_path_buf()).unwrap();
        let r = report(ServiceType::LandClearing, 4);
        let added = repo.save_all(&[r.clone(), r, report(ServiceType::LandClearing, 5)]).unwrap();
        assert_eq!(added, 2);
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_same_job_with_foreign_id_rejected() {
        let dir = tempdir().unwrap();
        let repo = FileCompletionReportRepository::open(dir.path().to_path_buf()).unwrap();
        repo.save(&report(ServiceType::StumpGrinding, 6)).unwrap();

        // a report written by an older build with a random id
        let mut legacy = report(ServiceType::StumpGrinding, 6);
        legacy.id = "0b9f5c1e-legacy".to_string();
        assert!(repo.contains_job(&legacy));
        assert!(repo.save(&legacy).is_err());
        assert_eq!(repo.save_all(&[legacy]).unwrap(), 0);

        // same job id on another service line is a different job
        repo.save(&report(ServiceType::TreeRemoval, 6)).unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_find_all_newest_first() {
        let dir = tempdir().unwrap();
        let repo = FileCompletionReportRepository::open(dir.path().to_path_buf()).unwrap();
        repo.save(&report(ServiceType::TreeTrimming, 1)).unwrap();
        repo.save(&report(ServiceType::TreeTrimming, 20)).unwrap();
        repo.save(&report(ServiceType::TreeTrimming, 10)).unwrap();
        let all = repo.find_all().unwrap();
        let jobs: Vec<&str> = all.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(jobs, vec!["WO-20", "WO-10", "WO-1"]);
    }

    #[test]
    fn test_find_by_service_and_since() {
        let dir = tempdir().unwrap();
        let repo = FileCompletionReportRepository::open(dir.path().to_path_buf()).unwrap();
        repo.save(&report(ServiceType::ForestryMulching, 1)).unwrap();
        repo.save(&report(ServiceType::ForestryMulching, 15)).unwrap();
        repo.save(&report(ServiceType::StumpGrinding, 15)).unwrap();

        assert_eq!(repo.find_by_service(ServiceType::ForestryMulching).unwrap().len(), 2);
        let since = Utc.with_ymd_and_hms(2026, 5, 15, 0, 0, 0).unwrap() - Duration::hours(1);
        assert_eq!(repo.find_since(since).unwrap().len(), 2);
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(REPORTS_FILE_NAME), "not json").unwrap();
        let result = FileCompletionReportRepository::open(dir.path().to_path_buf());
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
