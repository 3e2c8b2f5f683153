//! Service bootstrap.
//!
//! Wires the default provider stack and configures logging for embedders
//! that want the batteries included.

use anyhow::Result;

use crate::service::provider::{PagespeedProvider, PagespeedSettings};
use crate::service::synthesizer::ReportSynthesizer;

/// Initialize logging with tracing_subscriber.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("siteinsikt=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

/// Build the default synthesizer: hosted provider, configured from the
/// environment.
pub fn default_synthesizer() -> Result<ReportSynthesizer<PagespeedProvider>> {
    let provider = PagespeedProvider::new(PagespeedSettings::from_env())?;
    Ok(ReportSynthesizer::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_synthesizer_builds_without_configuration() {
        default_synthesizer().expect("default stack should build");
    }
}
