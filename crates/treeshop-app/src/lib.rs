//! Application service layer - config, catalogs, rate recalibration

pub mod app;
pub mod config;
pub mod constants;
pub mod repository;
