//! Domain layer: pricing formulas, adaptive production rates, and repository traits

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::CompletionReportRepository;
