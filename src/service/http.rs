use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// One provider request should never hang; an unresponsive endpoint must
/// eventually fail so the caller can fall back.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Factory for the outbound HTTP client used for provider calls.
pub fn create_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")
}
