//! Hosted PageSpeed provider.
//!
//! Issues one GET against the PageSpeed API and returns the raw lighthouse
//! payload untouched. Network, status and decode failures map onto the three
//! adapter error kinds; the synthesizer treats them all the same way.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{AuditProvider, RawAuditPayload};
use crate::error::{AuditError, Result};
use crate::service::http::create_client;

const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Category selectors sent with every request.
const CATEGORIES: [&str; 4] = ["performance", "accessibility", "best-practices", "seo"];

/// Environment-driven configuration for the hosted provider.
#[derive(Debug, Clone)]
pub struct PagespeedSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub strategy: String,
}

impl Default for PagespeedSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            strategy: "desktop".to_string(),
        }
    }
}

impl PagespeedSettings {
    const API_KEY_ENV: &'static str = "SITEINSIKT_PAGESPEED_API_KEY";
    const ENDPOINT_ENV: &'static str = "SITEINSIKT_PAGESPEED_ENDPOINT";

    /// Load settings from environment variables, falling back to the hosted
    /// endpoint and keyless access.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(key) = std::env::var(Self::API_KEY_ENV) {
            if !key.trim().is_empty() {
                settings.api_key = Some(key.trim().to_string());
            }
        }
        if let Ok(endpoint) = std::env::var(Self::ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                settings.endpoint = endpoint.trim().to_string();
            }
        }
        settings
    }
}

/// Ensure the target URL carries a scheme, defaulting to https.
pub fn canonicalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Provider adapter for the hosted PageSpeed API.
pub struct PagespeedProvider {
    http: Client,
    endpoint: Url,
    settings: PagespeedSettings,
}

impl PagespeedProvider {
    pub fn new(settings: PagespeedSettings) -> anyhow::Result<Self> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|e| anyhow::anyhow!("Invalid provider endpoint {}: {}", settings.endpoint, e))?;
        Ok(Self {
            http: create_client()?,
            endpoint,
            settings,
        })
    }

    fn request_url(&self, target: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("url", target);
            for category in CATEGORIES {
                query.append_pair("category", category);
            }
            query.append_pair("strategy", &self.settings.strategy);
            if let Some(key) = &self.settings.api_key {
                query.append_pair("key", key);
            }
        }
        url
    }
}

#[async_trait]
impl AuditProvider for PagespeedProvider {
    async fn audit_raw(&self, url: &str) -> Result<RawAuditPayload> {
        let target = canonicalize_url(url);
        tracing::debug!("Requesting provider audit for {}", target);

        let response = self
            .http
            .get(self.request_url(&target))
            .send()
            .await
            .map_err(|e| AuditError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuditError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AuditError::transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| AuditError::decode(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "pagespeed"
    }
}
