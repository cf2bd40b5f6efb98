//! Repository trait definitions for data persistence

use chrono::{DateTime, Utc};

use crate::model::CompletionReport;
use treeshop_types::{Result, ServiceType};

/// Storage for job completion reports
pub trait CompletionReportRepository {
    /// Save a new report. Reports are never updated once saved.
    fn save(&self, report: &CompletionReport) -> Result<()>;

    /// Find all reports
    fn find_all(&self) -> Result<Vec<CompletionReport>>;

    /// Find reports for one service line
    fn find_by_service(&self, service: ServiceType) -> Result<Vec<CompletionReport>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|r| r.service_type == service)
            .collect())
    }

    /// Find reports completed at or after `since`
    fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<CompletionReport>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|r| r.completed_date >= since)
            .collect())
    }
}
