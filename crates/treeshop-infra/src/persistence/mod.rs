//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod file_completion_report_repo;

pub use file_completion_report_repo::FileCompletionReportRepository;
