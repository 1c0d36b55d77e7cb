//! Error types and handling for the exhibit front end
//!
//! Nothing in the rendering pipeline is fatal: loaders return `AppError`,
//! the session logs it and the view falls back to its loading state.

use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fetch failed: {0}")]
    FetchFailed(String),
    #[error("Parse failed: {0}")]
    ParseFailed(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Index error: {0}")]
    Index(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::FetchFailed(_) => "fetch_failed",
            AppError::ParseFailed(_) => "parse_failed",
            AppError::NotFound(_) => "not_found",
            AppError::Index(_) => "index_error",
            AppError::Config(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Process exit code used by the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) | AppError::Config(_) => 1,
            AppError::FetchFailed(_) | AppError::ParseFailed(_) => 2,
            AppError::NotFound(_) => 3,
            AppError::Index(_) | AppError::Internal(_) => 5,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            AppError::NotFound(err.to_string())
        } else if err.is_decode() {
            AppError::ParseFailed(err.to_string())
        } else {
            AppError::FetchFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseFailed(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(err.to_string())
        } else {
            AppError::FetchFailed(err.to_string())
        }
    }
}

impl From<tantivy::TantivyError> for AppError {
    fn from(err: tantivy::TantivyError) -> Self {
        AppError::Index(err.to_string())
    }
}

/// Reject route parameters that would escape the data directory
pub fn validate_resource_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::InvalidInput("Resource name cannot be empty".to_string()));
    }

    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(AppError::InvalidInput(format!(
            "Invalid resource name: {}",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::NotFound("data/Q1.json".to_string());
        assert_eq!(error.to_string(), "Not found: data/Q1.json");

        let error = AppError::FetchFailed("connection refused".to_string());
        assert_eq!(error.to_string(), "Fetch failed: connection refused");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidInput(String::new()).error_code(), "invalid_input");
        assert_eq!(AppError::ParseFailed(String::new()).error_code(), "parse_failed");
        assert_eq!(AppError::Index(String::new()).error_code(), "index_error");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::InvalidInput(String::new()).exit_code(), 1);
        assert_eq!(AppError::FetchFailed(String::new()).exit_code(), 2);
        assert_eq!(AppError::NotFound(String::new()).exit_code(), 3);
        assert_eq!(AppError::Internal(String::new()).exit_code(), 5);
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::ParseFailed(_)));
    }

    #[test]
    fn test_from_io_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::NotFound(_)));
    }

    #[test]
    fn test_validate_resource_name() {
        assert!(validate_resource_name("Q42").is_ok());
        assert!(validate_resource_name("entity_list").is_ok());
        assert!(validate_resource_name("").is_err());
        assert!(validate_resource_name("../secret").is_err());
        assert!(validate_resource_name("a/b").is_err());
    }
}
