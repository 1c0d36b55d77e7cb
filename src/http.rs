//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with a timeout. System proxy
//! variables (HTTP_PROXY, HTTPS_PROXY, NO_PROXY) are honored by reqwest.

use std::time::Duration;

use reqwest::Client;

use crate::error::AppError;

/// Build a Client with the given request timeout
pub fn client_with_timeout(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("exhibit/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(client_with_timeout(Duration::from_secs(5)).is_ok());
    }
}
