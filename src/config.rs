//! Environment-driven configuration.
//!
//! Priority: environment variables (including a local `.env`) > defaults.

use crate::client::RetryPolicy;
use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the platform API, e.g. `https://api.unburden.app/api`.
    pub api_base_url: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Retries after the initial attempt for transient failures.
    pub retries: u32,
    /// Base backoff delay in milliseconds.
    pub retry_delay_ms: u64,
    /// Delay for debounced availability checks in milliseconds.
    pub debounce_ms: u64,
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}

/// Load configuration from the environment.
pub fn load() -> Result<Config> {
    // A missing .env is fine; real env vars still apply.
    dotenvy::dotenv().ok();

    let api_base_url = env::var("API_BASE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string());
    validate_url(&api_base_url, "API_BASE_URL")?;

    let request_timeout_ms = env_parsed("REQUEST_TIMEOUT_MS").unwrap_or(8000);
    let request_timeout_ms =
        validate_in_range(request_timeout_ms, 1000, 60000, "REQUEST_TIMEOUT_MS")?;

    let retries = env_parsed("HTTP_RETRIES").unwrap_or(3);
    let retries = validate_in_range(retries, 0, 10, "HTTP_RETRIES")?;

    let retry_delay_ms = env_parsed("RETRY_DELAY_MS").unwrap_or(500);
    let retry_delay_ms = validate_in_range(retry_delay_ms, 100, 10000, "RETRY_DELAY_MS")?;

    let debounce_ms = env_parsed("DEBOUNCE_MS").unwrap_or(450);
    let debounce_ms = validate_in_range(debounce_ms, 100, 2000, "DEBOUNCE_MS")?;

    Ok(Config {
        api_base_url,
        request_timeout_ms,
        retries,
        retry_delay_ms,
        debounce_ms,
    })
}

impl Config {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_validation_rejects_out_of_bounds() {
        assert!(validate_in_range(5u64, 1, 10, "X").is_ok());
        assert!(validate_in_range(0u64, 1, 10, "X").is_err());
        assert!(validate_in_range(11u64, 1, 10, "X").is_err());
    }

    #[test]
    fn url_validation_requires_http_scheme() {
        assert!(validate_url("https://api.example.com", "API_BASE_URL").is_ok());
        assert!(validate_url("ftp://api.example.com", "API_BASE_URL").is_err());
        assert!(validate_url("", "API_BASE_URL").is_err());
    }
}
