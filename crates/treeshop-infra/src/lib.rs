//! Infrastructure layer - persistence implementations, loaders

pub mod completion_csv;
pub mod persistence;
