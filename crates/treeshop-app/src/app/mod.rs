//! Use cases

pub mod rate_service;

pub use rate_service::{apply_recalibrations, recalibrate_all, recalibrate_service, RateRecalibration};
