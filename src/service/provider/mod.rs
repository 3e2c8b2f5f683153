//! Audit providers.
//!
//! A provider fetches raw, loosely-structured category/audit data for a
//! single URL. No interpretation happens here; turning the raw payload into
//! a report is the synthesizer's job.

mod pagespeed;
mod types;

pub use pagespeed::{canonicalize_url, PagespeedProvider, PagespeedSettings};
pub use types::*;

use async_trait::async_trait;

use crate::error::Result;

/// Strategy trait for fetching raw audit data.
#[async_trait]
pub trait AuditProvider: Send + Sync {
    /// Fetch the provider's raw payload for a single URL.
    /// Exactly one outbound call per invocation; no retries.
    async fn audit_raw(&self, url: &str) -> Result<RawAuditPayload>;

    /// Human-readable name for this provider.
    fn name(&self) -> &'static str;
}
