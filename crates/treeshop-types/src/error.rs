//! Error types for treeshop

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Completion report storage errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Duplicate completion report: {0}")]
    Duplicate(String),

    #[error("Report file is empty: {0}")]
    EmptyFile(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unknown AFISS factor: {0}")]
    UnknownAfissFactor(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_wraps_into_error() {
        let err: Error = ConfigError::ParseError("bad value".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Failed to parse configuration: bad value"
        );
    }

    #[test]
    fn test_repository_error_message() {
        let err: Error = RepositoryError::Duplicate("abc".to_string()).into();
        assert!(err.to_string().contains("abc"));
    }
}
